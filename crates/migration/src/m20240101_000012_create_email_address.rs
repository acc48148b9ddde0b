//! Create `email_address` table with FK to `user`.
//!
//! Links any number of addresses to an account. Addresses are not unique:
//! lookups pick the earliest row. `email_lower` is the Unicode lower-cased
//! address, folded by the application (SQL `lower()` is ASCII-only on SQLite).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailAddress::Table)
                    .if_not_exists()
                    .col(uuid(EmailAddress::Id).primary_key())
                    .col(uuid(EmailAddress::UserId).not_null())
                    .col(string_len(EmailAddress::Email, 255).not_null())
                    .col(string_len(EmailAddress::EmailLower, 255).not_null())
                    .col(boolean(EmailAddress::Verified).not_null())
                    .col(boolean(EmailAddress::IsPrimary).not_null())
                    .col(timestamp_with_time_zone(EmailAddress::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_address_user")
                            .from(EmailAddress::Table, EmailAddress::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EmailAddress::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EmailAddress { Table, Id, UserId, Email, EmailLower, Verified, IsPrimary, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
