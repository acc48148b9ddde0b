use std::collections::{HashMap, HashSet};

use sea_orm::{entity::prelude::*, QueryOrder, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{service, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_collaborator")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Service,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity).from(Column::ServiceId).to(service::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Replace the collaborator set of a service.
///
/// Repeated user ids collapse to their first occurrence; positions follow that order.
pub async fn replace_for_service<C: ConnectionTrait>(db: &C, service_id: Uuid, user_ids: &[Uuid]) -> Result<(), errors::ModelError> {
    Entity::delete_many().filter(Column::ServiceId.eq(service_id)).exec(db).await?;

    let mut seen = HashSet::new();
    let rows: Vec<ActiveModel> = user_ids
        .iter()
        .filter(|id| seen.insert(**id))
        .enumerate()
        .map(|(position, user_id)| ActiveModel {
            id: Set(Uuid::new_v4()),
            service_id: Set(service_id),
            user_id: Set(*user_id),
            position: Set(position as i32),
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }
    Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Collaborating users of a service in saved order.
pub async fn list_users<C: ConnectionTrait>(db: &C, service_id: Uuid) -> Result<Vec<user::Model>, errors::ModelError> {
    let links = Entity::find()
        .filter(Column::ServiceId.eq(service_id))
        .order_by_asc(Column::Position)
        .all(db)
        .await?;
    if links.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = links.iter().map(|l| l.user_id).collect();
    let mut users: HashMap<Uuid, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    Ok(links.iter().filter_map(|l| users.remove(&l.user_id)).collect())
}
