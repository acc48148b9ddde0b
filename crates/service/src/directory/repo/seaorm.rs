use sea_orm::{DatabaseConnection, EntityTrait};

use crate::directory::domain::Account;
use crate::directory::errors::DirectoryError;
use crate::directory::repository::AccountDirectory;

/// Directory backed by the `email_address` and `user` tables.
pub struct SeaOrmAccountDirectory {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountDirectory for SeaOrmAccountDirectory {
    async fn find_account_by_email(&self, email: &str, case_insensitive: bool) -> Result<Option<Account>, DirectoryError> {
        let Some(linked) = models::email_address::find_first_by_email(&self.db, email, case_insensitive).await? else {
            return Ok(None);
        };
        let owner = models::user::Entity::find_by_id(linked.user_id)
            .one(&self.db)
            .await
            .map_err(|e| DirectoryError::Repository(e.to_string()))?;
        Ok(owner.map(Account::from))
    }
}
