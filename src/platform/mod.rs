//! # 平台信息模块

mod host;

pub use host::{OAUTH2_CALLBACK_PATH, PublicHostResolver};
