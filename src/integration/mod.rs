//! # 系统集成模块
//!
//! OAuth2 单点登录与钉钉等第三方集成的配置管理与连通性检查

mod error;
mod model;
mod repository;
mod service;
pub mod tester;

pub use error::{IntegrationError, IntegrationResult};
pub use model::{
    Classification, DingTalkTokenResponse, IntegrationConfig, OAuth2ErrorPayload, OAuth2Settings,
};
pub use repository::IntegrationRepository;
pub use service::IntegrationService;
pub use tester::{
    ConnectionTester, DingTalkConnectionTest, OAuth2ConnectionTest, ProviderConnectionTester,
};
