//! # Integration Admin 主程序

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use integration_admin::{
    AdminError, Result,
    error::Context,
    app::AppContext,
    cache::UnifiedCacheManager,
    config::ConfigManager,
    crypto::SecretCodec,
    database, logging,
    management::ManagementServer,
};
use tracing::{error, info};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "integration-admin", version, about = "第三方集成配置管理服务")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, env = "ADMIN_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long)]
    log_level: Option<String>,

    /// 生成一个随机签名密钥并退出
    #[arg(long)]
    generate_key: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_key {
        println!("{}", SecretCodec::generate_key());
        return Ok(());
    }

    logging::init_logging(args.log_level.as_deref());

    if let Err(e) = run(args).await {
        error!("服务启动失败: {e:?}");
        std::process::exit(1);
    }

    info!("服务正常关闭");
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config_manager = match args.config {
        Some(path) => ConfigManager::from_file(path)?,
        None => ConfigManager::new()?,
    };
    info!(
        path = %config_manager.path().display(),
        overrides = config_manager.override_count(),
        "配置已加载"
    );
    let config = Arc::new(config_manager.into_config());

    let db = database::init_database(&config.database)
        .await
        .map_err(|e| AdminError::database_with_source("数据库连接失败", e))?;
    database::run_migrations(&db)
        .await
        .map_err(|e| AdminError::database_with_source("数据库迁移失败", e))?;
    database::check_database_status(&db)
        .await
        .context("检查数据库迁移状态失败")?;

    let cache = Arc::new(UnifiedCacheManager::new(&config.cache).await?);
    let context = Arc::new(AppContext::new(config, Arc::new(db), cache)?);

    ManagementServer::new(context).serve().await
}
