//! # 配置管理器
//!
//! 加载 TOML 配置文件并应用 `ADMIN_` 前缀的环境变量覆盖

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{AppConfig, CacheType, RedisConfig};
use crate::error::{AdminError, Result};

/// 环境变量覆盖前缀
const ENV_PREFIX: &str = "ADMIN_";

/// 配置管理器
pub struct ConfigManager {
    /// 配置文件路径
    path: PathBuf,
    /// 当前配置
    config: AppConfig,
    /// 已应用的环境变量覆盖数量
    override_count: usize,
}

impl ConfigManager {
    /// 按默认规则定位配置文件并加载
    ///
    /// 优先使用 `ADMIN_CONFIG_PATH`，否则使用 `config/config.{RUST_ENV}.toml`
    pub fn new() -> Result<Self> {
        Self::from_file(default_config_path())
    }

    /// 从指定文件创建配置管理器
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let mut config = Self::load_config_file(&path)?;

        let overrides = Self::build_env_overrides(env::vars());
        Self::apply_env_overrides(&mut config, &overrides)?;

        config
            .validate()
            .map_err(|e| AdminError::config(format!("配置校验失败: {e}")))?;

        info!(
            path = %path.display(),
            overrides = overrides.len(),
            "配置加载完成"
        );

        Ok(Self {
            path,
            config,
            override_count: overrides.len(),
        })
    }

    /// 取出配置
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// 配置文件路径
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 已应用的环境变量覆盖数量
    #[must_use]
    pub const fn override_count(&self) -> usize {
        self.override_count
    }

    /// 加载配置文件
    fn load_config_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(AdminError::config(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AdminError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            AdminError::config_with_source(
                format!("TOML解析失败 - 配置文件: {}", path.display()),
                e,
            )
        })
    }

    /// 构建环境变量覆盖映射
    ///
    /// 例如: `ADMIN_SERVER_PORT` -> `server.port`
    fn build_env_overrides(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> HashMap<String, String> {
        let overrides: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .filter(|rest| *rest != "CONFIG_PATH")
                    .map(|rest| (rest.to_lowercase().replace('_', "."), value))
            })
            .collect();

        debug!("发现 {} 个环境变量覆盖", overrides.len());
        overrides
    }

    /// 应用环境变量覆盖
    fn apply_env_overrides(
        config: &mut AppConfig,
        overrides: &HashMap<String, String>,
    ) -> Result<()> {
        for (path, value) in overrides {
            debug!(
                "应用环境变量覆盖: {} = {}",
                path,
                if path.contains("key") || path.contains("secret") || path.contains("password") {
                    "***"
                } else {
                    value
                }
            );
            Self::apply_override_to_config(config, path, value)?;
        }
        Ok(())
    }

    /// 将环境变量覆盖应用到配置对象
    fn apply_override_to_config(config: &mut AppConfig, path: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => config.server.host = value.to_string(),
            ["server", "port"] => config.server.port = parse_value(value, "无效的端口号")?,
            ["server", "api", "prefix"] => config.server.api_prefix = value.to_string(),
            ["database", "url"] => config.database.url = value.to_string(),
            ["database", "max", "connections"] => {
                config.database.max_connections = parse_value(value, "无效的最大连接数")?;
            }
            ["cache", "type"] => {
                config.cache.cache_type = match value.to_lowercase().as_str() {
                    "memory" => CacheType::Memory,
                    "redis" => CacheType::Redis,
                    other => {
                        return Err(AdminError::config(format!("无效的缓存类型: {other}")));
                    }
                };
            }
            ["redis", "url"] | ["cache", "redis", "url"] => {
                config
                    .cache
                    .redis
                    .get_or_insert_with(RedisConfig::default)
                    .url = value.to_string();
            }
            ["security", "signing", "key"] => config.security.signing_key = value.to_string(),
            ["platform", "public", "url"] => config.platform.public_url = value.to_string(),
            ["http", "timeout", "seconds"] => {
                config.http.timeout_seconds = parse_value(value, "无效的超时时间")?;
            }
            ["integrations", "dingtalk", "base", "url"] => {
                config.integrations.dingtalk_base_url = value.to_string();
            }
            _ => warn!("未知的配置路径，忽略环境变量覆盖: {}", path),
        }

        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    env::var("ADMIN_CONFIG_PATH").map_or_else(
        |_| {
            let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            PathBuf::from(format!("config/config.{env}.toml"))
        },
        PathBuf::from,
    )
}

fn parse_value<T>(value: &str, message: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .map_err(|e| AdminError::config_with_source(format!("{message}: {value}"), e))
}
