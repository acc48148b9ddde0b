use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub link: String,
    pub respect_dnt: bool,
    pub collect_ips: bool,
    pub ignored_ips: String,
    pub ignore_robots: bool,
    pub hide_referrer_regex: String,
    pub origins: String,
    pub script_inject: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Editable settings of a service, as written by the settings form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub name: String,
    pub link: String,
    pub respect_dnt: bool,
    pub collect_ips: bool,
    pub ignored_ips: String,
    pub ignore_robots: bool,
    pub hide_referrer_regex: String,
    pub origins: String,
    pub script_inject: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            link: String::new(),
            respect_dnt: true,
            collect_ips: true,
            ignored_ips: String::new(),
            ignore_robots: false,
            hide_referrer_regex: String::new(),
            origins: "*".into(),
            script_inject: String::new(),
        }
    }
}

impl From<&Model> for Settings {
    fn from(m: &Model) -> Self {
        Self {
            name: m.name.clone(),
            link: m.link.clone(),
            respect_dnt: m.respect_dnt,
            collect_ips: m.collect_ips,
            ignored_ips: m.ignored_ips.clone(),
            ignore_robots: m.ignore_robots,
            hide_referrer_regex: m.hide_referrer_regex.clone(),
            origins: m.origins.clone(),
            script_inject: m.script_inject.clone(),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name too long (<={})", NAME_MAX_LEN)));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, settings: &Settings) -> Result<Model, errors::ModelError> {
    validate_name(&settings.name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(settings.name.clone()),
        link: Set(settings.link.clone()),
        respect_dnt: Set(settings.respect_dnt),
        collect_ips: Set(settings.collect_ips),
        ignored_ips: Set(settings.ignored_ips.clone()),
        ignore_robots: Set(settings.ignore_robots),
        hide_referrer_regex: Set(settings.hide_referrer_regex.clone()),
        origins: Set(settings.origins.clone()),
        script_inject: Set(settings.script_inject.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite all settings of an existing service. `Ok(None)` when `id` is unknown.
pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, settings: &Settings) -> Result<Option<Model>, errors::ModelError> {
    validate_name(&settings.name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.name = Set(settings.name.clone());
    am.link = Set(settings.link.clone());
    am.respect_dnt = Set(settings.respect_dnt);
    am.collect_ips = Set(settings.collect_ips);
    am.ignored_ips = Set(settings.ignored_ips.clone());
    am.ignore_robots = Set(settings.ignore_robots);
    am.hide_referrer_regex = Set(settings.hide_referrer_regex.clone());
    am.origins = Set(settings.origins.clone());
    am.script_inject = Set(settings.script_inject.clone());
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
