use async_trait::async_trait;
use uuid::Uuid;

use super::domain::ServiceRecord;
use crate::errors::ServiceError;
use crate::service_form::CleanedService;

/// Persistence abstraction receiving cleaned form output.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn create(&self, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError>;
    /// Replace settings and collaborators; `ServiceError::NotFound` when `id` is unknown.
    async fn update(&self, id: Uuid, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<ServiceRecord>, ServiceError>;
}

/// Simple in-memory mock store for tests and doc examples
pub mod mock {
    use super::*;
    use crate::store::domain::distinct_accounts;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockServiceStore {
        records: Mutex<HashMap<Uuid, ServiceRecord>>, // key: service id
    }

    impl MockServiceStore {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, ServiceRecord>>, ServiceError> {
            self.records.lock().map_err(|_| ServiceError::Db("store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl ServiceStore for MockServiceStore {
        async fn create(&self, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError> {
            let now = Utc::now().fixed_offset();
            let record = ServiceRecord {
                id: Uuid::new_v4(),
                settings: cleaned.settings.clone(),
                collaborators: distinct_accounts(&cleaned.collaborators),
                created_at: now,
                updated_at: now,
            };
            self.lock()?.insert(record.id, record.clone());
            Ok(record)
        }

        async fn update(&self, id: Uuid, cleaned: &CleanedService) -> Result<ServiceRecord, ServiceError> {
            let mut records = self.lock()?;
            let record = records.get_mut(&id).ok_or_else(|| ServiceError::not_found("service"))?;
            record.settings = cleaned.settings.clone();
            record.collaborators = distinct_accounts(&cleaned.collaborators);
            record.updated_at = Utc::now().fixed_offset();
            Ok(record.clone())
        }

        async fn get(&self, id: Uuid) -> Result<Option<ServiceRecord>, ServiceError> {
            Ok(self.lock()?.get(&id).cloned())
        }
    }
}
