use sea_orm::{entity::prelude::*, Set, TransactionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::email_address;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    EmailAddress,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::EmailAddress => Entity::has_many(email_address::Entity).into() }
    }
}

impl Related<email_address::Entity> for Entity {
    fn to() -> RelationDef { Relation::EmailAddress.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    if email.len() > 255 { return Err(errors::ModelError::Validation("email too long (<=255)".into())); }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.len() > 128 { return Err(errors::ModelError::Validation("name too long (<=128)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str, name: &str) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.trim().to_string()),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Create a user together with its primary, verified email address row.
pub async fn register(db: &DatabaseConnection, email: &str, name: &str) -> Result<Model, errors::ModelError> {
    let txn = db.begin().await?;
    let user = create(&txn, email, name).await?;
    email_address::create(&txn, user.id, &user.email, true, true).await?;
    txn.commit().await?;
    Ok(user)
}
