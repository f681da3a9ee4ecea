//! # 路由配置

use axum::Router;
use axum::routing::get;

use crate::management::handlers::integrations;
use crate::management::server::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .nest("/gaia/system", system_integration_routes())
        .with_state(state)
}

/// 系统集成配置路由
fn system_integration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/oauth2",
            get(integrations::get_oauth2_config).post(integrations::set_oauth2_config),
        )
        .route(
            "/dingtalk",
            get(integrations::get_dingtalk_config).post(integrations::set_dingtalk_config),
        )
}
