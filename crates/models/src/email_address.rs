use sea_orm::{entity::prelude::*, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_address")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    /// `email` folded with Unicode lower-casing; target of case-insensitive lookups.
    pub email_lower: String,
    pub verified: bool,
    pub is_primary: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into() }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    email: &str,
    is_primary: bool,
    verified: bool,
) -> Result<Model, errors::ModelError> {
    user::validate_email(email)?;
    let email = email.trim();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        email: Set(email.to_string()),
        email_lower: Set(fold_case(email)),
        verified: Set(verified),
        is_primary: Set(is_primary),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Case folding shared by stored rows and lookups.
pub fn fold_case(email: &str) -> String {
    email.to_lowercase()
}

/// Earliest address row matching `email`, optionally ignoring case.
pub async fn find_first_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
    case_insensitive: bool,
) -> Result<Option<Model>, errors::ModelError> {
    let query = if case_insensitive {
        Entity::find().filter(Column::EmailLower.eq(fold_case(email)))
    } else {
        Entity::find().filter(Column::Email.eq(email))
    };
    let found = query
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(found)
}

pub async fn list_for_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}
