//! # 管理服务器
//!
//! Axum HTTP服务器，提供集成配置管理API

use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::AppContext;
use crate::config::ServerConfig;
use crate::error::{AdminError, Result};
use crate::management::{handlers, response};

/// 管理服务器应用状态
#[derive(Clone)]
pub struct AppState {
    context: Arc<AppContext>,
}

impl AppState {
    #[must_use]
    pub const fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }
}

impl Deref for AppState {
    type Target = AppContext;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// 管理服务器
pub struct ManagementServer {
    config: ServerConfig,
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    #[must_use]
    pub fn new(context: Arc<AppContext>) -> Self {
        let config = context.config.server.clone();
        let router = build_router(AppState::new(context), &config);
        Self { config, router }
    }

    /// 启动服务器
    pub async fn serve(self) -> Result<()> {
        let ip = self.config.host.parse::<std::net::IpAddr>().map_err(|e| {
            AdminError::config_with_source(format!("无效的监听地址: {}", self.config.host), e)
        })?;
        let addr = SocketAddr::new(ip, self.config.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AdminError::server_init_with_source(format!("绑定端口失败: {addr}"), e))?;

        info!(%addr, api_prefix = %self.config.api_prefix, "管理服务器启动");

        axum::serve(listener, self.router)
            .await
            .map_err(|e| AdminError::network_with_source("管理服务器运行错误", e))
    }
}

/// 组装完整路由，包括中间件
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api_routes = super::routes::create_routes(state);

    let app = Router::new()
        .nest(config.api_prefix.trim_end_matches('/'), api_routes)
        .route("/ping", get(handlers::system::ping_handler))
        .fallback(|| async { response::error(StatusCode::NOT_FOUND, "NOT_FOUND", "接口不存在") });

    let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors_layer = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
                axum::http::header::ORIGIN,
            ])
            .allow_origin(Any);

        app.layer(service_builder.layer(cors_layer))
    } else {
        app.layer(service_builder)
    }
}
