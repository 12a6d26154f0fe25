//! Dish Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dish line item belonging to an establishment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning establishment
    #[serde(with = "serde_helpers::record_id")]
    pub establishment: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default = "default_count")]
    pub count: i64,
    pub price: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub publish: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_count() -> i64 {
    1
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub establishment: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default = "default_count")]
    pub count: i64,
    pub price: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
}
