//! # 密钥处理模块
//!
//! 集成密钥的加解密与脱敏

mod codec;
mod mask;

pub use codec::{CodecError, SecretCodec};
pub use mask::{is_unchanged, mask_secret};
