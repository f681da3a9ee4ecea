//! # 平台对外地址
//!
//! 优先读取缓存中的 `api_host`，缺失时回退到配置的 `platform.public_url`

use std::sync::Arc;

use tracing::warn;

use crate::cache::{CacheKey, UnifiedCacheManager};

/// OAuth2 授权回调路径
pub const OAUTH2_CALLBACK_PATH: &str = "/admin/api/base/auth2/callback";

/// 平台对外地址解析器
#[derive(Clone)]
pub struct PublicHostResolver {
    cache: Arc<UnifiedCacheManager>,
    fallback: String,
}

impl PublicHostResolver {
    #[must_use]
    pub fn new(cache: Arc<UnifiedCacheManager>, fallback: impl Into<String>) -> Self {
        Self {
            cache,
            fallback: fallback.into(),
        }
    }

    /// 解析平台对外地址
    ///
    /// 缓存读取失败只记录日志，不向上返回错误
    pub async fn resolve(&self) -> String {
        match self.cache.get(&CacheKey::ApiHost.build()).await {
            Ok(Some(host)) if !host.trim().is_empty() => host,
            Ok(_) => self.fallback.clone(),
            Err(e) => {
                warn!(error = %e, "读取 api_host 缓存失败，使用配置地址");
                self.fallback.clone()
            }
        }
    }

    /// 默认 OAuth2 回调地址
    pub async fn oauth2_callback_url(&self) -> String {
        callback_url(&self.resolve().await)
    }
}

fn callback_url(host: &str) -> String {
    format!("{}{OAUTH2_CALLBACK_PATH}", host.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> (Arc<UnifiedCacheManager>, PublicHostResolver) {
        let cache = Arc::new(UnifiedCacheManager::memory(8));
        let resolver = PublicHostResolver::new(cache.clone(), "http://fallback.local");
        (cache, resolver)
    }

    #[tokio::test]
    async fn test_falls_back_when_cache_is_empty() {
        let (_, resolver) = resolver();
        assert_eq!(resolver.resolve().await, "http://fallback.local");
        assert_eq!(
            resolver.oauth2_callback_url().await,
            "http://fallback.local/admin/api/base/auth2/callback"
        );
    }

    #[tokio::test]
    async fn test_prefers_cached_host() {
        let (cache, resolver) = resolver();
        cache
            .set("api_host", "https://gw.example.com/", None)
            .await
            .unwrap();

        assert_eq!(resolver.resolve().await, "https://gw.example.com/");
        assert_eq!(
            resolver.oauth2_callback_url().await,
            "https://gw.example.com/admin/api/base/auth2/callback"
        );
    }
}
