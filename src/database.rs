//! # 数据库模块
//!
//! 数据库连接和迁移管理

use std::path::Path;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, error, info, warn};

use crate::config::DatabaseConfig;

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!(
        sqlite = config.is_sqlite(),
        max_connections = config.max_connections,
        "正在连接数据库"
    );

    if config.is_sqlite() && !config.is_memory_database() {
        ensure_sqlite_file(&config.url)?;
    }

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    info!("数据库连接成功");
    Ok(db)
}

/// SQLite 数据库文件及其目录不存在时创建
fn ensure_sqlite_file(database_url: &str) -> Result<(), DbErr> {
    let db_path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    let db_file_path = Path::new(db_path);

    if let Some(parent_dir) = db_file_path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            debug!("创建数据库目录: {}", parent_dir.display());
            std::fs::create_dir_all(parent_dir).map_err(|e| {
                DbErr::Custom(format!("无法创建数据库目录 {}: {e}", parent_dir.display()))
            })?;
        }
    }

    if !db_file_path.exists() {
        debug!("创建数据库文件: {}", db_file_path.display());
        std::fs::File::create(db_file_path).map_err(|e| {
            DbErr::Custom(format!("无法创建数据库文件 {}: {e}", db_file_path.display()))
        })?;
    }

    Ok(())
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("开始运行数据库迁移...");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("数据库迁移完成");
            Ok(())
        }
        Err(e) => {
            error!("数据库迁移失败: {}", e);
            Err(e)
        }
    }
}

/// 检查数据库状态
pub async fn check_database_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = ::migration::Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        info!("所有迁移都已应用");
    } else {
        warn!("有 {} 个待应用的迁移", pending.len());
    }

    Ok(())
}
