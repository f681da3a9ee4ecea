use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemIntegrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemIntegrations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::Classify)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::Config)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::AppId)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::AppSecret)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::CorpId)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::AgentId)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::AppKey)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SystemIntegrations::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 每种分类只允许一条配置
        manager
            .create_index(
                Index::create()
                    .name("idx_system_integrations_classify")
                    .table(SystemIntegrations::Table)
                    .col(SystemIntegrations::Classify)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemIntegrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SystemIntegrations {
    Table,
    Id,
    Classify,
    Status,
    Config,
    AppId,
    AppSecret,
    CorpId,
    AgentId,
    AppKey,
    CreatedAt,
    UpdatedAt,
}
