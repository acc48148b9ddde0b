use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account (business view). `email` is the primary address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<models::user::Model> for Account {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, email: u.email, name: u.name }
    }
}
