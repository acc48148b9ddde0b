use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::directory::repo::seaorm::SeaOrmAccountDirectory;
use service::directory::AccountDirectory;
use service::service_form::ServiceFormService;
use service::store::repo::seaorm::SeaOrmServiceStore;
use service::store::ServiceStore;

pub type DynServiceForms = ServiceFormService<dyn AccountDirectory, dyn ServiceStore>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<DynServiceForms>,
}

impl AppState {
    pub fn new(directory: Arc<dyn AccountDirectory>, store: Arc<dyn ServiceStore>) -> Self {
        Self { forms: Arc::new(ServiceFormService::new(directory, store)) }
    }

    /// SeaORM-backed directory and store over one connection pool.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let directory = Arc::new(SeaOrmAccountDirectory { db: db.clone() });
        let store = Arc::new(SeaOrmServiceStore { db });
        Self::new(directory, store)
    }
}
