//! # 缓存抽象层
//!
//! 提供统一的缓存接口，支持内存缓存和Redis缓存

use std::time::{Duration, Instant};

use moka::future::Cache;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::config::{CacheConfig, CacheType};
use crate::error::{AdminError, Result};

/// 缓存项
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: String, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|t| Instant::now() + t),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() > expires_at)
    }
}

/// 内存缓存实现
#[derive(Clone)]
pub struct MemoryCache {
    data: Cache<String, CacheEntry>,
}

impl MemoryCache {
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        Self {
            data: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.data
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl))
            .await;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.data.get(key).await {
            Some(entry) if entry.is_expired() => {
                self.data.invalidate(key).await;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value)),
            None => Ok(None),
        }
    }
}

/// Redis缓存实现
#[derive(Clone)]
pub struct RedisCache {
    connection_manager: ConnectionManager,
}

impl RedisCache {
    /// 建立 Redis 连接
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AdminError::cache_with_source("创建Redis客户端失败", e))?;

        let connection_manager = ConnectionManager::new(client)
            .await
            .map_err(|e| AdminError::cache_with_source("建立 Redis 连接失败", e))?;

        Ok(Self { connection_manager })
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection_manager.clone();

        match ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await,
            None => conn.set::<_, _, ()>(key, value).await,
        }
        .map_err(|e| AdminError::cache_with_source(format!("设置缓存失败: {key}"), e))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection_manager.clone();

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| AdminError::cache_with_source(format!("Redis GET失败: {key}"), e))
    }
}

/// 缓存提供者枚举
#[derive(Clone)]
pub enum CacheProviderType {
    Memory(MemoryCache),
    Redis(RedisCache),
}

impl CacheProviderType {
    /// 设置缓存值
    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl).await,
            Self::Redis(cache) => cache.set(key, value, ttl).await,
        }
    }

    /// 获取缓存值
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Redis(cache) => cache.get(key).await,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

/// 统一缓存管理器
#[derive(Clone)]
pub struct UnifiedCacheManager {
    provider: CacheProviderType,
}

impl UnifiedCacheManager {
    /// 根据配置创建缓存管理器
    pub async fn new(config: &CacheConfig) -> Result<Self> {
        let provider = match config.cache_type {
            CacheType::Memory => {
                info!(max_entries = config.memory_max_entries, "使用内存缓存");
                CacheProviderType::Memory(MemoryCache::new(config.memory_max_entries))
            }
            CacheType::Redis => {
                let redis = config
                    .redis
                    .as_ref()
                    .ok_or_else(|| AdminError::config("cache_type = redis 时必须配置 cache.redis"))?;
                info!(url = %redis.url, "使用Redis缓存");
                CacheProviderType::Redis(RedisCache::connect(&redis.url).await?)
            }
        };

        Ok(Self { provider })
    }

    /// 直接使用内存缓存
    #[must_use]
    pub fn memory(max_entries: u64) -> Self {
        Self {
            provider: CacheProviderType::Memory(MemoryCache::new(max_entries)),
        }
    }

    /// 设置缓存值
    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        debug!(backend = self.provider.kind(), key, "设置缓存");
        self.provider.set(key, value, ttl).await
    }

    /// 获取缓存值
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.provider.get(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_set_get() {
        let cache = UnifiedCacheManager::memory(16);

        assert_eq!(cache.get("api_host").await.unwrap(), None);
        cache.set("api_host", "https://a.example.com", None).await.unwrap();
        assert_eq!(
            cache.get("api_host").await.unwrap().as_deref(),
            Some("https://a.example.com")
        );
    }

    #[tokio::test]
    async fn test_memory_entry_expires() {
        let cache = UnifiedCacheManager::memory(16);

        cache
            .set("short", "v", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_backend_requires_section() {
        let config = CacheConfig {
            cache_type: CacheType::Redis,
            redis: None,
            ..CacheConfig::default()
        };

        let result = UnifiedCacheManager::new(&config).await;
        assert!(matches!(result, Err(AdminError::Config { .. })));
    }
}
