//! # 连接测试
//!
//! 按集成分类分发到具体服务商的连通性检查

mod dingtalk;
mod oauth2;

use async_trait::async_trait;
use tracing::debug;

pub use dingtalk::DingTalkConnectionTest;
pub use oauth2::{OAuth2ConnectionTest, build_token_url, resolve_redirect_uri};

use super::error::IntegrationResult;
use super::model::{Classification, IntegrationConfig};

/// 连通性检查能力
///
/// `config.app_secret` 在这里必须已经是明文
#[async_trait]
pub trait ConnectionTester: Send + Sync {
    async fn test_connection(&self, config: &IntegrationConfig, code: &str) -> IntegrationResult<()>;
}

/// 按分类分发的连接测试器
#[derive(Clone)]
pub struct ProviderConnectionTester {
    dingtalk: DingTalkConnectionTest,
    oauth2: OAuth2ConnectionTest,
}

impl ProviderConnectionTester {
    #[must_use]
    pub const fn new(dingtalk: DingTalkConnectionTest, oauth2: OAuth2ConnectionTest) -> Self {
        Self { dingtalk, oauth2 }
    }
}

#[async_trait]
impl ConnectionTester for ProviderConnectionTester {
    async fn test_connection(&self, config: &IntegrationConfig, code: &str) -> IntegrationResult<()> {
        let classification = Classification::try_from(config.classify)?;
        debug!(classify = config.classify, ?classification, "执行连接测试");

        match classification {
            Classification::DingTalk => self.dingtalk.test_connection(config, code).await,
            Classification::OAuth2 => self.oauth2.test_connection(config, code).await,
        }
    }
}
