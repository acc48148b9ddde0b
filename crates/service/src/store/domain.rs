use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use models::service::Settings;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::Account;

/// A saved service (business view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub settings: Settings,
    pub collaborators: Vec<Account>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Collaborators as a set: repeats collapse onto their first occurrence.
pub fn distinct_accounts(accounts: &[Account]) -> Vec<Account> {
    let mut seen = HashSet::new();
    accounts.iter().filter(|a| seen.insert(a.id)).cloned().collect()
}
