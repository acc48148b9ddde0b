//! Create `service` table.
//!
//! One row per tracked site/app; settings edited through the service form.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(string_len(Service::Name, 64).not_null())
                    .col(text(Service::Link).not_null())
                    .col(boolean(Service::RespectDnt).not_null())
                    .col(boolean(Service::CollectIps).not_null())
                    .col(text(Service::IgnoredIps).not_null())
                    .col(boolean(Service::IgnoreRobots).not_null())
                    .col(text(Service::HideReferrerRegex).not_null())
                    .col(text(Service::Origins).not_null())
                    .col(text(Service::ScriptInject).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Name,
    Link,
    RespectDnt,
    CollectIps,
    IgnoredIps,
    IgnoreRobots,
    HideReferrerRegex,
    Origins,
    ScriptInject,
    CreatedAt,
    UpdatedAt,
}
