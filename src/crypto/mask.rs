//! # 密钥脱敏
//!
//! 返回给前端的密钥只包含脱敏后的形式。管理员提交表单时如果未修改密钥，
//! 提交的就是这个脱敏值，服务端通过重新计算脱敏值判断密钥是否变更。
//!
//! 已知边界：如果真实密钥恰好等于旧密钥的脱敏结果，会被视为“未修改”。

const MASK_CHAR: char = '*';
const VISIBLE_PREFIX: usize = 3;
const VISIBLE_SUFFIX: usize = 3;

/// 对明文做保长脱敏。
///
/// 不超过 6 个字符时全部替换为 `*`；否则保留首尾各 3 个字符。
#[must_use]
pub fn mask_secret(plaintext: &str) -> String {
    let len = plaintext.chars().count();
    if len <= VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return MASK_CHAR.to_string().repeat(len);
    }

    plaintext
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            if index < VISIBLE_PREFIX || index >= len - VISIBLE_SUFFIX {
                ch
            } else {
                MASK_CHAR
            }
        })
        .collect()
}

/// 提交的值是否就是 `stored_plaintext` 的脱敏结果
#[must_use]
pub fn is_unchanged(submitted: &str, stored_plaintext: &str) -> bool {
    submitted == mask_secret(stored_plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("a", "*")]
    #[case("abcdef", "******")]
    #[case("abcdefg", "abc*efg")]
    #[case("client_secret_value", "cli*************lue")]
    #[case("密钥密钥密钥密钥", "密钥密**钥密钥")]
    fn test_mask_secret(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mask_secret(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("a-much-longer-secret-value")]
    fn test_mask_is_idempotent(#[case] input: &str) {
        let masked = mask_secret(input);
        assert_eq!(mask_secret(&masked), masked);
    }

    #[test]
    fn test_mask_preserves_length() {
        let secret = "0123456789abcdef";
        assert_eq!(mask_secret(secret).chars().count(), secret.chars().count());
    }

    #[test]
    fn test_is_unchanged() {
        let secret = "s3cr3t-value";
        assert!(is_unchanged(&mask_secret(secret), secret));
        assert!(!is_unchanged(secret, secret));
        assert!(!is_unchanged("s3c******lue", secret));
        assert!(!is_unchanged("", secret));
    }

    #[test]
    fn test_secret_equal_to_its_own_mask_collides() {
        // 与脱敏结果相同的“新密钥”无法与未修改区分
        let old = "abc123xyz";
        let new_secret = mask_secret(old);
        assert!(is_unchanged(&new_secret, old));
    }
}
