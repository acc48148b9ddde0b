#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::user;

/// Fresh migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

/// Register one account per address (primary, verified).
pub async fn seed_accounts(db: &DatabaseConnection, emails: &[&str]) -> Result<Vec<user::Model>, anyhow::Error> {
    let mut users = Vec::with_capacity(emails.len());
    for email in emails {
        let name = email.split('@').next().unwrap_or(email);
        users.push(user::register(db, email, name).await?);
    }
    Ok(users)
}
