//! 应用上下文
//!
//! 统一持有跨模块共享的服务实例，便于在测试中注入替身实现。

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::cache::UnifiedCacheManager;
use crate::config::AppConfig;
use crate::crypto::SecretCodec;
use crate::error::{AdminError, Result};
use crate::integration::{
    DingTalkConnectionTest, IntegrationRepository, IntegrationService, OAuth2ConnectionTest,
    ProviderConnectionTester,
};
use crate::platform::PublicHostResolver;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub host_resolver: PublicHostResolver,
    pub integration_service: IntegrationService,
}

impl AppContext {
    /// 按配置组装全部服务
    pub fn new(
        config: Arc<AppConfig>,
        db: Arc<DatabaseConnection>,
        cache: Arc<UnifiedCacheManager>,
    ) -> Result<Self> {
        let http_client = build_http_client(config.http.timeout_seconds)?;
        let codec = Arc::new(SecretCodec::from_signing_key(&config.security.signing_key));
        let host_resolver = PublicHostResolver::new(cache, config.platform.public_url.clone());

        let tester = ProviderConnectionTester::new(
            DingTalkConnectionTest::new(
                http_client.clone(),
                config.integrations.dingtalk_base_url.clone(),
            ),
            OAuth2ConnectionTest::new(http_client, host_resolver.clone()),
        );

        let integration_service = IntegrationService::new(
            IntegrationRepository::new(db),
            codec,
            Arc::new(tester),
        );

        debug!("应用上下文初始化完成");

        Ok(Self {
            config,
            host_resolver,
            integration_service,
        })
    }
}

fn build_http_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("integration-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AdminError::server_init_with_source("创建 HTTP 客户端失败", e))
}
