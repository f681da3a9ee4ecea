//! # 缓存模块
//!
//! 内存缓存和 Redis 缓存的统一访问入口

pub mod abstract_cache;
pub mod keys;

pub use abstract_cache::{CacheProviderType, MemoryCache, RedisCache, UnifiedCacheManager};
pub use keys::CacheKey;
