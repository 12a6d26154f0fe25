//! Decoration Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Decoration line item belonging to a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning service
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default)]
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

/// Create decoration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorationCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
}
