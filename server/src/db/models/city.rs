//! City Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// City used to filter establishments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
}

/// Create city payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityCreate {
    pub name: String,
}
