//! # 应用配置结构定义

use serde::{Deserialize, Serialize};

/// 应用主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 管理端 HTTP 服务配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// 缓存配置
    #[serde(default)]
    pub cache: CacheConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 平台对外地址配置
    #[serde(default)]
    pub platform: PlatformConfig,
    /// 出站 HTTP 客户端配置
    #[serde(default)]
    pub http: HttpClientConfig,
    /// 第三方集成端点配置
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// 管理端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// API前缀
    pub api_prefix: String,
    /// 是否启用CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            api_prefix: "/api".to_string(),
            enable_cors: true,
        }
    }
}

/// 缓存类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    /// 内存缓存
    #[default]
    Memory,
    /// Redis缓存
    Redis,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 缓存类型
    pub cache_type: CacheType,
    /// 内存缓存最大条目数
    pub memory_max_entries: u64,
    /// Redis 缓存配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis: Option<RedisConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::Memory,
            memory_max_entries: 10000,
            redis: None,
        }
    }
}

/// Redis配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis连接URL
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".to_string(),
        }
    }
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// 签名密钥，集成密钥的加密密钥由它派生
    pub signing_key: String,
}

/// 平台对外地址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// 缓存中没有 `api_host` 时使用的公网地址
    pub public_url: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            public_url: "http://localhost".to_string(),
        }
    }
}

/// 出站 HTTP 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

/// 第三方集成端点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    /// 钉钉开放平台地址
    pub dingtalk_base_url: String,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            dingtalk_base_url: "https://oapi.dingtalk.com".to_string(),
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        let prefix = self.server.api_prefix.trim_end_matches('/');
        if prefix.is_empty() || !prefix.starts_with('/') {
            return Err(format!(
                "server.api_prefix must be a non-root path starting with '/': {:?}",
                self.server.api_prefix
            ));
        }

        // 验证数据库配置
        if self.database.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }

        match self.cache.cache_type {
            CacheType::Memory => {
                if self.cache.redis.is_some() {
                    return Err("cache.redis 配置仅在 cache_type = \"redis\" 时可用".to_string());
                }
            }
            CacheType::Redis => {
                let redis = self
                    .cache
                    .redis
                    .as_ref()
                    .ok_or_else(|| "Redis cache configuration must be provided".to_string())?;

                if redis.url.is_empty() {
                    return Err("Redis URL cannot be empty".to_string());
                }
            }
        }

        if self.security.signing_key.trim().is_empty() {
            return Err("security.signing_key cannot be empty".to_string());
        }

        Ok(())
    }
}
