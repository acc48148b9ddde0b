use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // EmailAddress: lookups by address (exact and case-folded) and by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_email_address_email")
                    .table(EmailAddress::Table)
                    .col(EmailAddress::Email)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_email_address_email_lower")
                    .table(EmailAddress::Table)
                    .col(EmailAddress::EmailLower)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_email_address_user")
                    .table(EmailAddress::Table)
                    .col(EmailAddress::UserId)
                    .to_owned(),
            )
            .await?;

        // ServiceCollaborator: composite unique (service_id, user_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_service_collaborator")
                    .table(ServiceCollaborator::Table)
                    .col(ServiceCollaborator::ServiceId)
                    .col(ServiceCollaborator::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_service_collaborator").table(ServiceCollaborator::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_email_address_user").table(EmailAddress::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_email_address_email_lower").table(EmailAddress::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_email_address_email").table(EmailAddress::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum EmailAddress { Table, Email, EmailLower, UserId }

#[derive(DeriveIden)]
enum ServiceCollaborator { Table, ServiceId, UserId }
