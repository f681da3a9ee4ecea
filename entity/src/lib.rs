//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod system_integrations;

pub use system_integrations::Entity as SystemIntegrations;

#[cfg(test)]
mod tests;
