//! # Integration Admin Library
//!
//! 管理后台的第三方集成配置服务：OAuth2 单点登录与钉钉的配置、
//! 密钥加密存储以及保存前的连通性检查

pub mod app;
pub mod cache;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod integration;
pub mod logging;
pub mod management;
pub mod platform;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AdminError, Result};
