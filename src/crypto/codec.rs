//! # 密钥加解密
//!
//! 使用 AES-256-GCM 对入库的集成密钥做可逆加密。
//! 密文格式为 base64(nonce || ciphertext)，便于存入单个文本列。

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

const NONCE_LEN: usize = 12;

/// 加解密错误
#[derive(Debug, Error)]
pub enum CodecError {
    /// 密文为空
    #[error("密文为空")]
    Empty,
    /// base64 解码失败
    #[error("密文格式错误: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// 密文长度不足以包含随机数
    #[error("密文长度错误")]
    Truncated,
    /// AES-GCM 运算失败
    #[error("AES-GCM 运算失败")]
    Cipher,
    /// 解密结果不是合法 UTF-8
    #[error("解密后的数据不是有效的UTF-8字符串")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// 集成密钥加解密器
#[derive(Clone)]
pub struct SecretCodec {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for SecretCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCodec").finish_non_exhaustive()
    }
}

impl SecretCodec {
    /// 使用 32 字节密钥创建
    #[must_use]
    pub fn new(key: &[u8; 32]) -> Self {
        let key: [u8; 32] = *key;
        let cipher = Aes256Gcm::new(&key.into());
        Self { cipher }
    }

    /// 由配置中的签名密钥派生 AES 密钥（SHA-256）
    #[must_use]
    pub fn from_signing_key(signing_key: &str) -> Self {
        let digest = Sha256::digest(signing_key.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self::new(&key)
    }

    /// 加密字符串
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CodecError::Cipher)?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);

        Ok(general_purpose::STANDARD.encode(payload))
    }

    /// 解密字符串
    pub fn decrypt(&self, encoded: &str) -> Result<String, CodecError> {
        if encoded.is_empty() {
            return Err(CodecError::Empty);
        }

        let payload = general_purpose::STANDARD.decode(encoded)?;
        if payload.len() <= NONCE_LEN {
            return Err(CodecError::Truncated);
        }

        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CodecError::Cipher)?;

        Ok(String::from_utf8(plaintext)?)
    }

    /// 生成新的随机密钥（十六进制）
    #[must_use]
    pub fn generate_key() -> String {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        hex::encode(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let codec = SecretCodec::new(&[7u8; 32]);

        let encrypted = codec.encrypt("client_secret_12345").unwrap();
        assert_ne!(encrypted, "client_secret_12345");
        assert_eq!(codec.decrypt(&encrypted).unwrap(), "client_secret_12345");
    }

    #[test]
    fn test_nonce_is_random() {
        let codec = SecretCodec::from_signing_key("signing-key");

        let first = codec.encrypt("same").unwrap();
        let second = codec.encrypt("same").unwrap();
        assert_ne!(first, second);
        assert_eq!(codec.decrypt(&first).unwrap(), "same");
        assert_eq!(codec.decrypt(&second).unwrap(), "same");
    }

    #[test]
    fn test_empty_plaintext_round_trips() {
        let codec = SecretCodec::from_signing_key("signing-key");
        let encrypted = codec.encrypt("").unwrap();
        assert_eq!(codec.decrypt(&encrypted).unwrap(), "");
    }

    #[test]
    fn test_decrypt_failures() {
        let codec = SecretCodec::from_signing_key("signing-key");

        assert!(matches!(codec.decrypt(""), Err(CodecError::Empty)));
        assert!(matches!(codec.decrypt("not base64!"), Err(CodecError::Encoding(_))));
        assert!(matches!(
            codec.decrypt(&general_purpose::STANDARD.encode([0u8; 8])),
            Err(CodecError::Truncated)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = SecretCodec::from_signing_key("key-a").encrypt("secret").unwrap();
        let result = SecretCodec::from_signing_key("key-b").decrypt(&encrypted);
        assert!(matches!(result, Err(CodecError::Cipher)));
    }

    #[test]
    fn test_generate_key() {
        let key1 = SecretCodec::generate_key();
        let key2 = SecretCodec::generate_key();

        assert_eq!(key1.len(), 64);
        assert_ne!(key1, key2);
    }
}
