//! # 日志配置模块

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 默认过滤规则，屏蔽数据库查询的详细日志
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},integration_admin=debug,sqlx::query=off,sea_orm::query=warn")
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先于命令行传入的日志级别
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();

    tracing::debug!(filter = %log_filter, "日志系统初始化完成");
}
