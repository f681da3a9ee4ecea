//! # 系统集成配置实体定义
//!
//! 每种集成分类（OAuth2、钉钉等）对应一行配置记录

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 系统集成配置实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "system_integrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 集成分类，唯一
    #[sea_orm(unique)]
    pub classify: i32,
    /// 是否启用
    pub status: bool,
    /// 服务商相关配置（JSON 字符串，值均为字符串）
    #[sea_orm(column_type = "Text")]
    pub config: String,
    /// 应用 ID（明文）
    pub app_id: String,
    /// 应用密钥（AES-GCM 密文）
    #[sea_orm(column_type = "Text")]
    pub app_secret: String,
    pub corp_id: String,
    pub agent_id: String,
    pub app_key: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
