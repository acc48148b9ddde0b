//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000011_create_user;
mod m20240101_000012_create_email_address;
mod m20240101_000013_create_service;
mod m20240101_000014_create_service_collaborator;
mod m20240101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000011_create_user::Migration),
            Box::new(m20240101_000012_create_email_address::Migration),
            Box::new(m20240101_000013_create_service::Migration),
            Box::new(m20240101_000014_create_service_collaborator::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_indexes::Migration),
        ]
    }
}
