use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // 未设置 DATABASE_URL 时由 CLI 参数 -u 指定，默认指向 data/admin.db
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL 未设置，可使用 -u sqlite://data/admin.db 指定数据库");
    }
    cli::run_cli(migration::Migrator).await;
}
