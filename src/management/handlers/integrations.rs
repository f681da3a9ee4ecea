//! # 系统集成配置处理器
//!
//! OAuth2 与钉钉配置的读取和保存

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AdminError;
use crate::integration::{Classification, IntegrationConfig, IntegrationError, OAuth2Settings};
use crate::management::response;
use crate::management::server::AppState;

/// OAuth2 配置展示结构，`app_secret` 为脱敏值
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuth2ConfigView {
    pub classify: i32,
    pub status: bool,
    #[serde(flatten)]
    pub settings: OAuth2Settings,
    pub app_id: String,
    pub app_secret: String,
}

/// `GET /gaia/system/oauth2` 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuth2ConfigResponse {
    pub host: String,
    pub config: OAuth2ConfigView,
}

/// `POST /gaia/system/oauth2` 请求
#[derive(Debug, Deserialize)]
pub struct OAuth2ConfigRequest {
    #[serde(flatten)]
    pub settings: OAuth2Settings,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_secret: String,
    /// 授权码，仅在交互式测试后保存时存在
    #[serde(default)]
    pub code: String,
    /// 只测试不保存
    #[serde(default)]
    pub test: bool,
}

/// 钉钉配置展示结构，`app_secret` 与 `corp_id` 为脱敏值
#[derive(Debug, Serialize, Deserialize)]
pub struct DingTalkConfigView {
    pub classify: i32,
    pub status: bool,
    pub app_key: String,
    pub app_secret: String,
    pub agent_id: String,
    pub corp_id: String,
}

/// `GET /gaia/system/dingtalk` 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DingTalkConfigResponse {
    pub config: DingTalkConfigView,
}

/// `POST /gaia/system/dingtalk` 请求
#[derive(Debug, Deserialize)]
pub struct DingTalkConfigRequest {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub app_secret: String,
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub corp_id: String,
    #[serde(default)]
    pub test: bool,
}

fn invalid_body(rejection: &JsonRejection) -> Response {
    response::app_error(AdminError::validation(
        format!("请求参数错误: {}", rejection.body_text()),
        None,
    ))
}

fn saved_message(test: bool) -> &'static str {
    if test { "连接测试成功" } else { "设置成功" }
}

/// 获取 OAuth2 集成配置
pub async fn get_oauth2_config(State(state): State<AppState>) -> Response {
    let config = match state
        .integration_service
        .get_config(Classification::OAuth2.code())
        .await
    {
        Ok(config) => config,
        Err(e) => return response::app_error(e),
    };

    let settings = match config.oauth2_settings() {
        Ok(settings) => settings,
        Err(e) => return response::app_error(e),
    };

    let host = state.host_resolver.resolve().await;

    response::success(OAuth2ConfigResponse {
        host,
        config: OAuth2ConfigView {
            classify: config.classify,
            status: config.status,
            settings,
            app_id: config.app_id,
            app_secret: config.app_secret,
        },
    })
}

/// 修改 OAuth2 集成配置
pub async fn set_oauth2_config(
    State(state): State<AppState>,
    payload: Result<Json<OAuth2ConfigRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };

    let blob = match request.settings.to_config_blob() {
        Ok(blob) => blob,
        Err(e) => return response::app_error(e),
    };

    let incoming = IntegrationConfig {
        classify: Classification::OAuth2.code(),
        status: request.status,
        config: blob,
        app_id: request.app_id,
        app_secret: request.app_secret,
        ..IntegrationConfig::default()
    };

    set_config(&state, incoming, &request.code, request.test).await
}

/// 获取钉钉集成配置
pub async fn get_dingtalk_config(State(state): State<AppState>) -> Response {
    match state
        .integration_service
        .get_config(Classification::DingTalk.code())
        .await
    {
        Ok(config) => response::success(DingTalkConfigResponse {
            config: DingTalkConfigView {
                classify: config.classify,
                status: config.status,
                app_key: config.app_key,
                app_secret: config.app_secret,
                agent_id: config.agent_id,
                corp_id: config.corp_id,
            },
        }),
        Err(e) => response::app_error(e),
    }
}

/// 修改钉钉集成配置
pub async fn set_dingtalk_config(
    State(state): State<AppState>,
    payload: Result<Json<DingTalkConfigRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };

    let incoming = IntegrationConfig {
        status: request.status,
        app_key: request.app_key,
        app_secret: request.app_secret,
        agent_id: request.agent_id,
        corp_id: request.corp_id,
        ..IntegrationConfig::new(Classification::DingTalk.code())
    };

    set_config(&state, incoming, "", request.test).await
}

async fn set_config(state: &AppState, incoming: IntegrationConfig, code: &str, test: bool) -> Response {
    let classify = incoming.classify;
    let result: Result<(), IntegrationError> = state
        .integration_service
        .set_config(incoming, code, test)
        .await;

    match result {
        Ok(()) => {
            info!(classify, test, "集成配置请求处理完成");
            response::success_without_data(saved_message(test))
        }
        Err(e) => response::app_error(e),
    }
}
