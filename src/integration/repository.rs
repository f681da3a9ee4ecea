//! # 集成配置存储

use std::sync::Arc;

use chrono::Utc;
use entity::system_integrations;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, warn};

use super::error::IntegrationResult;
use super::model::IntegrationConfig;

/// 集成配置存储，每个分类一行
#[derive(Debug, Clone)]
pub struct IntegrationRepository {
    db: Arc<DatabaseConnection>,
}

impl IntegrationRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 按分类查询
    pub async fn find_by_classify(
        &self,
        classify: i32,
    ) -> IntegrationResult<Option<system_integrations::Model>> {
        let model = system_integrations::Entity::find()
            .filter(system_integrations::Column::Classify.eq(classify))
            .one(&*self.db)
            .await?;
        Ok(model)
    }

    /// 创建未启用的默认记录
    ///
    /// 并发创建触发唯一索引冲突时，返回已经存在的那一行
    pub async fn create_default(&self, classify: i32) -> IntegrationResult<system_integrations::Model> {
        let now = Utc::now().naive_utc();
        let defaults = IntegrationConfig::new(classify);

        let record = system_integrations::ActiveModel {
            classify: Set(classify),
            status: Set(false),
            config: Set(defaults.config),
            app_id: Set(String::new()),
            app_secret: Set(String::new()),
            corp_id: Set(String::new()),
            agent_id: Set(String::new()),
            app_key: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match record.insert(&*self.db).await {
            Ok(model) => {
                debug!(classify, id = model.id, "创建默认集成配置");
                Ok(model)
            }
            Err(err) => {
                warn!(classify, error = %err, "创建默认集成配置失败，重新查询");
                match self.find_by_classify(classify).await? {
                    Some(model) => Ok(model),
                    None => Err(err.into()),
                }
            }
        }
    }

    /// 单次更新可写字段
    pub async fn update_fields(&self, id: i32, config: &IntegrationConfig) -> IntegrationResult<()> {
        let update_model = system_integrations::ActiveModel {
            config: Set(config.config.clone()),
            status: Set(config.status),
            agent_id: Set(config.agent_id.clone()),
            app_key: Set(config.app_key.clone()),
            app_secret: Set(config.app_secret.clone()),
            corp_id: Set(config.corp_id.clone()),
            app_id: Set(config.app_id.clone()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = system_integrations::Entity::update_many()
            .filter(system_integrations::Column::Id.eq(id))
            .set(update_model)
            .exec(&*self.db)
            .await?;

        debug!(id, rows_affected = result.rows_affected, "更新集成配置");
        Ok(())
    }
}
