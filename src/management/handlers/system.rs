//! # 系统信息处理器

/// Ping 处理器
pub async fn ping_handler() -> &'static str {
    "pong"
}
