//! 管理 API 端到端测试

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use integration_admin::AppConfig;
use integration_admin::app::AppContext;
use integration_admin::cache::UnifiedCacheManager;
use integration_admin::management::server::{AppState, build_router};
use migration::{Migrator, MigratorTrait};
use pretty_assertions::assert_eq;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_app(dingtalk_base_url: &str) -> Router {
    let config: AppConfig = toml::from_str(&format!(
        r#"
        [database]
        url = "sqlite::memory:"
        max_connections = 1
        connect_timeout = 5

        [security]
        signing_key = "management-api-test"

        [platform]
        public_url = "http://admin.local"

        [integrations]
        dingtalk_base_url = "{dingtalk_base_url}"
        "#
    ))
    .expect("parse config");

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");

    let cache = Arc::new(UnifiedCacheManager::memory(8));
    let config = Arc::new(config);
    let context = AppContext::new(config.clone(), Arc::new(db), cache).expect("build context");

    build_router(AppState::new(Arc::new(context)), &config.server)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn ping_returns_pong() {
    let app = setup_app("http://127.0.0.1:9").await;

    let response = app.clone().oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn get_oauth2_returns_host_and_default_config() {
    let app = setup_app("http://127.0.0.1:9").await;

    let (status, body) = send(&app, get("/api/gaia/system/oauth2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["host"], json!("http://admin.local"));
    assert_eq!(body["data"]["config"]["classify"], json!(2));
    assert_eq!(body["data"]["config"]["status"], json!(false));
    assert_eq!(body["data"]["config"]["app_secret"], json!(""));
    assert_eq!(body["data"]["config"]["server_url"], json!(""));
}

#[tokio::test]
async fn post_oauth2_before_get_is_not_found() {
    let app = setup_app("http://127.0.0.1:9").await;

    let (status, body) = send(
        &app,
        post_json("/api/gaia/system/oauth2", &json!({ "app_secret": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("INTEGRATION_NOT_FOUND"));
}

#[tokio::test]
async fn saved_oauth2_secret_is_masked() {
    let app = setup_app("http://127.0.0.1:9").await;
    send(&app, get("/api/gaia/system/oauth2")).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/gaia/system/oauth2",
            &json!({
                "status": false,
                "server_url": "https://idp.example.com",
                "token_url": "/oauth/token",
                "user_name_field": "name",
                "token_auth_method": "client_secret_basic",
                "app_id": "client-id",
                "app_secret": "client_secret_value"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("设置成功"));

    let (_, body) = send(&app, get("/api/gaia/system/oauth2")).await;
    let config = &body["data"]["config"];
    assert_eq!(config["app_secret"], json!("cli*************lue"));
    assert_eq!(config["app_id"], json!("client-id"));
    assert_eq!(config["server_url"], json!("https://idp.example.com"));
    assert_eq!(config["user_name_field"], json!("name"));
    assert_eq!(config["token_auth_method"], json!("client_secret_basic"));
}

#[tokio::test]
async fn failed_oauth2_test_reports_stage() {
    let app = setup_app("http://127.0.0.1:9").await;
    send(&app, get("/api/gaia/system/oauth2")).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/gaia/system/oauth2",
            &json!({
                "status": true,
                "server_url": "ftp://x.com",
                "token_url": "/oauth/token",
                "app_id": "client-id",
                "app_secret": "secret",
                "code": "auth-code"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("CONNECTION_TEST_FAILED"));
    assert_eq!(
        body["error"]["message"],
        json!("连接失败: ServerURL 必须以 http:// 或 https:// 开头")
    );

    let (_, body) = send(&app, get("/api/gaia/system/oauth2")).await;
    assert_eq!(body["data"]["config"]["status"], json!(false));
}

#[tokio::test]
async fn invalid_body_is_validation_error() {
    let app = setup_app("http://127.0.0.1:9").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/gaia/system/dingtalk")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"status\": \"yes\""))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn dingtalk_round_trip() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "token",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = setup_app(&mock_server.uri()).await;
    let (_, body) = send(&app, get("/api/gaia/system/dingtalk")).await;
    assert_eq!(body["data"]["config"]["classify"], json!(1));

    let (status, body) = send(
        &app,
        post_json(
            "/api/gaia/system/dingtalk",
            &json!({
                "status": true,
                "app_key": "ding-key",
                "app_secret": "ding-secret-value",
                "agent_id": "10001",
                "corp_id": "dingcorp1234567"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = send(&app, get("/api/gaia/system/dingtalk")).await;
    let config = &body["data"]["config"];
    assert_eq!(config["status"], json!(true));
    assert_eq!(config["app_key"], json!("ding-key"));
    assert_eq!(config["app_secret"], json!("din***********lue"));
    assert_eq!(config["corp_id"], json!("din*********567"));
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = setup_app("http://127.0.0.1:9").await;

    let (status, body) = send(&app, get("/api/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}
