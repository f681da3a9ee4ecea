//! # 集成配置错误
//!
//! 每个错误的展示文本都带有失败阶段的前缀，直接返回给管理端调用方

use axum::http::StatusCode;
use thiserror::Error;

/// 集成配置相关错误
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// 更新时找不到对应分类的配置记录
    #[error("集成配置不存在: classify={classify}")]
    NotFound { classify: i32 },

    /// 新密钥加密失败
    #[error("AppSecret加密失败: {0}")]
    SecretEncryptionFailed(String),

    /// OAuth2 必填项缺失
    #[error("请填写完整的 OAuth2 配置信息")]
    IncompleteConfig,

    /// ServerURL 协议不合法
    #[error("ServerURL 必须以 http:// 或 https:// 开头")]
    InvalidUrlScheme,

    /// 传输层失败
    #[error("连接 OAuth2 服务器失败: {0}")]
    ConnectionFailed(#[source] reqwest::Error),

    /// 授权服务器返回非 200 状态码
    #[error("OAuth2 服务器返回错误状态码: {status} (URL: {url})")]
    UnexpectedStatus { status: u16, url: String },

    /// 响应体读取失败
    #[error("OAuth2 响应读取失败: {0}")]
    Io(#[source] reqwest::Error),

    /// 授权服务器显式返回的错误信息
    #[error("OAuth2 Error: {0}")]
    ProviderError(String),

    /// 未知的集成分类
    #[error("不支持的集成类型: {0}")]
    UnsupportedIntegrationType(i32),

    /// 库中保存的配置 JSON 无法解析
    #[error("解析集成配置失败: {0}")]
    MalformedStoredConfig(#[source] serde_json::Error),

    /// 钉钉获取 access token 失败
    #[error("钉钉连接失败: {0}")]
    MessagingConnectionFailed(String),

    /// 连接测试失败（包装具体原因）
    #[error("连接失败: {0}")]
    ConnectionTestFailed(#[source] Box<IntegrationError>),

    /// 数据库操作失败
    #[error("数据库操作失败: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl IntegrationError {
    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub const fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "INTEGRATION_NOT_FOUND"),
            Self::SecretEncryptionFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SECRET_ENCRYPTION_FAILED")
            }
            Self::IncompleteConfig => (StatusCode::BAD_REQUEST, "INCOMPLETE_CONFIG"),
            Self::InvalidUrlScheme => (StatusCode::BAD_REQUEST, "INVALID_URL_SCHEME"),
            Self::ConnectionFailed(_) | Self::Io(_) => (StatusCode::BAD_GATEWAY, "CONNECTION_FAILED"),
            Self::UnexpectedStatus { .. } => (StatusCode::BAD_GATEWAY, "UNEXPECTED_STATUS"),
            Self::ProviderError(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            Self::UnsupportedIntegrationType(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_INTEGRATION")
            }
            Self::MalformedStoredConfig(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MALFORMED_STORED_CONFIG")
            }
            Self::MessagingConnectionFailed(_) => (StatusCode::BAD_GATEWAY, "MESSAGING_CONNECTION_FAILED"),
            Self::ConnectionTestFailed(_) => (StatusCode::BAD_REQUEST, "CONNECTION_TEST_FAILED"),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        }
    }

    /// 包装为连接测试失败
    #[must_use]
    pub fn connection_test_failed(self) -> Self {
        Self::ConnectionTestFailed(Box::new(self))
    }
}

/// 集成模块的 `Result` 类型
pub type IntegrationResult<T> = std::result::Result<T, IntegrationError>;
