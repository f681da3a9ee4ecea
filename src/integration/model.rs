//! # 集成配置领域类型

use entity::system_integrations;
use serde::{Deserialize, Serialize};

use super::error::{IntegrationError, IntegrationResult};

/// 集成分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// 钉钉
    DingTalk,
    /// OAuth2 单点登录
    OAuth2,
}

impl Classification {
    /// 数据库中保存的分类编号
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::DingTalk => 1,
            Self::OAuth2 => 2,
        }
    }
}

impl TryFrom<i32> for Classification {
    type Error = IntegrationError;

    fn try_from(value: i32) -> IntegrationResult<Self> {
        match value {
            1 => Ok(Self::DingTalk),
            2 => Ok(Self::OAuth2),
            other => Err(IntegrationError::UnsupportedIntegrationType(other)),
        }
    }
}

/// 集成配置
///
/// `app_secret` 的含义随所处阶段变化：从库中读出时是密文，
/// 返回给调用方时是脱敏值，提交更新时是脱敏值或新的明文
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub classify: i32,
    pub status: bool,
    /// 服务商相关配置 JSON
    pub config: String,
    pub app_id: String,
    pub app_secret: String,
    pub corp_id: String,
    pub agent_id: String,
    pub app_key: String,
}

impl IntegrationConfig {
    /// 指定分类的空配置
    #[must_use]
    pub fn new(classify: i32) -> Self {
        Self {
            classify,
            config: "{}".to_string(),
            ..Self::default()
        }
    }

    /// 解析 OAuth2 配置
    pub fn oauth2_settings(&self) -> IntegrationResult<OAuth2Settings> {
        serde_json::from_str(&self.config).map_err(IntegrationError::MalformedStoredConfig)
    }
}

impl From<system_integrations::Model> for IntegrationConfig {
    fn from(model: system_integrations::Model) -> Self {
        Self {
            classify: model.classify,
            status: model.status,
            config: model.config,
            app_id: model.app_id,
            app_secret: model.app_secret,
            corp_id: model.corp_id,
            agent_id: model.agent_id,
            app_key: model.app_key,
        }
    }
}

/// OAuth2 服务商配置，保存在 `config` 字段中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuth2Settings {
    pub server_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub logout_url: String,
    pub user_name_field: String,
    pub user_email_field: String,
    pub user_id_field: String,
    pub redirect_uri: String,
    pub token_auth_method: String,
}

impl OAuth2Settings {
    /// 序列化为 `config` 字段内容
    pub fn to_config_blob(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 是否使用 HTTP Basic 传递客户端凭证
    #[must_use]
    pub fn uses_basic_auth(&self) -> bool {
        self.token_auth_method
            .trim()
            .eq_ignore_ascii_case("client_secret_basic")
    }
}

/// 部分授权服务器在 HTTP 200 中返回的错误结构
#[derive(Debug, Clone, Deserialize)]
pub struct OAuth2ErrorPayload {
    pub code: i64,
    #[serde(default)]
    pub info: String,
}

/// 钉钉 `gettoken` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct DingTalkTokenResponse {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_codes() {
        assert_eq!(Classification::try_from(1).unwrap(), Classification::DingTalk);
        assert_eq!(Classification::try_from(2).unwrap(), Classification::OAuth2);
        assert_eq!(Classification::OAuth2.code(), 2);
        assert!(matches!(
            Classification::try_from(7),
            Err(IntegrationError::UnsupportedIntegrationType(7))
        ));
    }

    #[test]
    fn test_settings_missing_keys_default_to_empty() {
        let config = IntegrationConfig {
            config: r#"{"server_url":"https://idp.example.com"}"#.to_string(),
            ..IntegrationConfig::new(2)
        };

        let settings = config.oauth2_settings().unwrap();
        assert_eq!(settings.server_url, "https://idp.example.com");
        assert!(settings.token_url.is_empty());
        assert!(!settings.uses_basic_auth());
    }

    #[test]
    fn test_malformed_blob() {
        let config = IntegrationConfig {
            config: "not json".to_string(),
            ..IntegrationConfig::new(2)
        };

        assert!(matches!(
            config.oauth2_settings(),
            Err(IntegrationError::MalformedStoredConfig(_))
        ));
    }

    #[test]
    fn test_config_blob_reads_back_as_settings() {
        let settings = OAuth2Settings {
            server_url: "https://idp.example.com".to_string(),
            redirect_uri: "https://app.example.com/cb".to_string(),
            token_auth_method: "client_secret_post".to_string(),
            ..OAuth2Settings::default()
        };
        let config = IntegrationConfig {
            config: settings.to_config_blob().unwrap(),
            ..IntegrationConfig::new(2)
        };

        let parsed = config.oauth2_settings().unwrap();
        assert_eq!(parsed.server_url, settings.server_url);
        assert_eq!(parsed.redirect_uri, settings.redirect_uri);
        assert_eq!(parsed.token_auth_method, settings.token_auth_method);
    }

    #[test]
    fn test_basic_auth_method_is_case_insensitive() {
        let settings = OAuth2Settings {
            token_auth_method: " Client_Secret_Basic ".to_string(),
            ..OAuth2Settings::default()
        };
        assert!(settings.uses_basic_auth());
    }
}
