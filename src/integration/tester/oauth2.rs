//! # OAuth2 连接测试
//!
//! 用授权码向 token 端点发起一次 `authorization_code` 交换，
//! 只确认服务器可达且没有返回显式错误，不校验令牌内容

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::ConnectionTester;
use crate::integration::error::{IntegrationError, IntegrationResult};
use crate::integration::model::{IntegrationConfig, OAuth2ErrorPayload, OAuth2Settings};
use crate::platform::PublicHostResolver;

/// OAuth2 授权码交换测试
#[derive(Clone)]
pub struct OAuth2ConnectionTest {
    http_client: reqwest::Client,
    host_resolver: PublicHostResolver,
}

impl OAuth2ConnectionTest {
    #[must_use]
    pub const fn new(http_client: reqwest::Client, host_resolver: PublicHostResolver) -> Self {
        Self {
            http_client,
            host_resolver,
        }
    }
}

/// 拼接 token 端点地址，保证两段之间只有一个 `/`
#[must_use]
pub fn build_token_url(server_url: &str, token_url: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        token_url.trim_start_matches('/')
    )
}

/// 配置了回调地址时使用配置值，否则使用默认回调地址
#[must_use]
pub fn resolve_redirect_uri(settings: &OAuth2Settings, default_callback: &str) -> String {
    let configured = settings.redirect_uri.trim();
    if configured.is_empty() {
        default_callback.to_string()
    } else {
        configured.to_string()
    }
}

fn validate(settings: &OAuth2Settings, config: &IntegrationConfig) -> IntegrationResult<()> {
    if settings.server_url.is_empty()
        || settings.token_url.is_empty()
        || config.app_id.is_empty()
        || config.app_secret.is_empty()
    {
        return Err(IntegrationError::IncompleteConfig);
    }

    if !settings.server_url.starts_with("http://") && !settings.server_url.starts_with("https://") {
        return Err(IntegrationError::InvalidUrlScheme);
    }

    Ok(())
}

#[async_trait]
impl ConnectionTester for OAuth2ConnectionTest {
    async fn test_connection(&self, config: &IntegrationConfig, code: &str) -> IntegrationResult<()> {
        let settings = config.oauth2_settings()?;

        if code.trim().is_empty() {
            debug!("未提供授权码，跳过 OAuth2 连通性检查");
            return Ok(());
        }

        validate(&settings, config)?;

        let default_callback = self.host_resolver.oauth2_callback_url().await;
        let redirect_uri = resolve_redirect_uri(&settings, &default_callback);

        let url = build_token_url(&settings.server_url, &settings.token_url);
        let basic_auth = settings.uses_basic_auth();

        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ];
        if !basic_auth {
            form.push(("client_id", config.app_id.as_str()));
            form.push(("client_secret", config.app_secret.as_str()));
        }

        info!(url = %url, redirect_uri = %redirect_uri, basic_auth, "发起 OAuth2 授权码交换测试");

        let mut request = self.http_client.post(&url).form(&form);
        if basic_auth {
            request = request.basic_auth(&config.app_id, Some(&config.app_secret));
        }

        let response = request
            .send()
            .await
            .map_err(IntegrationError::ConnectionFailed)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "OAuth2 服务器返回错误状态码");
            return Err(IntegrationError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(IntegrationError::Io)?;

        if let Ok(payload) = serde_json::from_str::<OAuth2ErrorPayload>(&body) {
            if payload.code != 0 {
                warn!(url = %url, code = payload.code, "OAuth2 服务器返回错误信息");
                return Err(IntegrationError::ProviderError(payload.info));
            }
        }

        debug!(url = %url, "OAuth2 连通性检查通过");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://idp.example.com/", "/oauth/token", "https://idp.example.com/oauth/token")]
    #[case("https://idp.example.com", "oauth/token", "https://idp.example.com/oauth/token")]
    #[case("https://idp.example.com//", "//oauth/token", "https://idp.example.com/oauth/token")]
    #[case("http://127.0.0.1:8080", "/token", "http://127.0.0.1:8080/token")]
    fn test_build_token_url(#[case] server: &str, #[case] token: &str, #[case] expected: &str) {
        assert_eq!(build_token_url(server, token), expected);
    }

    #[test]
    fn test_configured_redirect_uri_is_trimmed() {
        let settings = OAuth2Settings {
            redirect_uri: "  https://app.example.com/cb  ".to_string(),
            ..OAuth2Settings::default()
        };
        assert_eq!(
            resolve_redirect_uri(&settings, "http://fallback/cb"),
            "https://app.example.com/cb"
        );
    }

    #[test]
    fn test_blank_redirect_uri_uses_default() {
        let settings = OAuth2Settings {
            redirect_uri: "   ".to_string(),
            ..OAuth2Settings::default()
        };
        assert_eq!(resolve_redirect_uri(&settings, "http://fallback/cb"), "http://fallback/cb");
    }

    fn complete() -> (OAuth2Settings, IntegrationConfig) {
        let settings = OAuth2Settings {
            server_url: "https://idp.example.com".to_string(),
            token_url: "/oauth/token".to_string(),
            ..OAuth2Settings::default()
        };
        let config = IntegrationConfig {
            app_id: "client".to_string(),
            app_secret: "secret".to_string(),
            ..IntegrationConfig::new(2)
        };
        (settings, config)
    }

    #[test]
    fn test_validate_requires_all_fields() {
        let (settings, mut config) = complete();
        assert!(validate(&settings, &config).is_ok());

        config.app_secret.clear();
        assert!(matches!(
            validate(&settings, &config),
            Err(IntegrationError::IncompleteConfig)
        ));
    }

    #[rstest]
    #[case("ftp://x.com")]
    #[case("idp.example.com")]
    #[case("HTTPS//idp")]
    fn test_validate_rejects_scheme(#[case] server_url: &str) {
        let (mut settings, config) = complete();
        settings.server_url = server_url.to_string();
        assert!(matches!(
            validate(&settings, &config),
            Err(IntegrationError::InvalidUrlScheme)
        ));
    }
}
