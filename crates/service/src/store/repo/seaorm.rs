use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use models::{service, service_collaborator};

use crate::directory::Account;
use crate::errors::ServiceError;
use crate::service_form::CleanedService;
use crate::store::domain::ServiceRecord;
use crate::store::repository::ServiceStore;

/// SeaORM-backed store; settings and collaborator set are written in one transaction.
pub struct SeaOrmServiceStore {
    pub db: DatabaseConnection,
}

fn user_ids(cleaned: &CleanedService) -> Vec<Uuid> {
    cleaned.collaborators.iter().map(|a| a.id).collect()
}

impl SeaOrmServiceStore {
    async fn load(&self, model: service::Model) -> Result<ServiceRecord, ServiceError> {
        let collaborators = service_collaborator::list_users(&self.db, model.id)
            .await?
            .into_iter()
            .map(Account::from)
            .collect();
        Ok(ServiceRecord {
            id: model.id,
            settings: service::Settings::from(&model),
            collaborators,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait::async_trait]
impl ServiceStore for SeaOrmServiceStore {
    async fn create(&self, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError> {
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let created = service::create(&txn, &cleaned.settings).await?;
        service_collaborator::replace_for_service(&txn, created.id, &user_ids(cleaned)).await?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(service_id = %created.id, collaborators = cleaned.collaborators.len(), "service_created");
        self.load(created).await
    }

    async fn update(&self, id: Uuid, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError> {
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let updated = service::update(&txn, id, &cleaned.settings)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))?;
        service_collaborator::replace_for_service(&txn, id, &user_ids(cleaned)).await?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(service_id = %id, collaborators = cleaned.collaborators.len(), "service_updated");
        self.load(updated).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<ServiceRecord>, ServiceError> {
        let found = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        match found {
            Some(model) => Ok(Some(self.load(model).await?)),
            None => Ok(None),
        }
    }
}
