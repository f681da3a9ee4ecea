//! # 缓存键命名规范

use std::fmt;

/// 缓存键类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    /// 平台对外访问地址 - `api_host`
    ApiHost,
}

impl CacheKey {
    /// 生成缓存键字符串
    #[must_use]
    pub fn build(&self) -> String {
        match self {
            Self::ApiHost => "api_host".to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_host_key_is_shared_with_platform() {
        assert_eq!(CacheKey::ApiHost.build(), "api_host");
    }

    #[test]
    fn test_display_matches_build() {
        assert_eq!(CacheKey::ApiHost.to_string(), CacheKey::ApiHost.build());
    }
}
