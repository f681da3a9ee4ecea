//! # 钉钉连接测试

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ConnectionTester;
use crate::integration::error::{IntegrationError, IntegrationResult};
use crate::integration::model::{DingTalkTokenResponse, IntegrationConfig};

/// 使用 `app_key`/`app_secret` 获取 access token
#[derive(Debug, Clone)]
pub struct DingTalkConnectionTest {
    http_client: reqwest::Client,
    base_url: String,
}

impl DingTalkConnectionTest {
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    fn token_url(&self) -> String {
        format!("{}/gettoken", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ConnectionTester for DingTalkConnectionTest {
    async fn test_connection(&self, config: &IntegrationConfig, _code: &str) -> IntegrationResult<()> {
        let url = self.token_url();
        debug!(url = %url, app_key = %config.app_key, "请求钉钉 access token");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("appkey", config.app_key.as_str()),
                ("appsecret", config.app_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IntegrationError::MessagingConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "钉钉返回错误状态码");
            return Err(IntegrationError::MessagingConnectionFailed(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }

        let token: DingTalkTokenResponse = response
            .json()
            .await
            .map_err(|e| IntegrationError::MessagingConnectionFailed(e.to_string()))?;

        if token.errcode != 0 {
            return Err(IntegrationError::MessagingConnectionFailed(format!(
                "{} ({})",
                token.errmsg, token.errcode
            )));
        }

        debug!(expires_in = token.expires_in, "钉钉 access token 获取成功");
        Ok(())
    }
}
