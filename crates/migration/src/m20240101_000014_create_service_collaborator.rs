//! Create `service_collaborator` join table (service <-> user).
//!
//! `position` keeps the order collaborators were entered in.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCollaborator::Table)
                    .if_not_exists()
                    .col(uuid(ServiceCollaborator::Id).primary_key())
                    .col(uuid(ServiceCollaborator::ServiceId).not_null())
                    .col(uuid(ServiceCollaborator::UserId).not_null())
                    .col(integer(ServiceCollaborator::Position).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_collaborator_service")
                            .from(ServiceCollaborator::Table, ServiceCollaborator::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_collaborator_user")
                            .from(ServiceCollaborator::Table, ServiceCollaborator::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceCollaborator::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceCollaborator { Table, Id, ServiceId, UserId, Position }

#[derive(DeriveIden)]
enum Service { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
