//! # 管理API模块
//!
//! 提供集成配置的 RESTful API 接口

pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;

pub use routes::create_routes;
pub use server::{AppState, ManagementServer};
