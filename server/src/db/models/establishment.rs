//! Establishment Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Bookable venue (cafe, restaurant) belonging to a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Establishment {
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
    pub address: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// City reference for filtering
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub city: Option<RecordId>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub publish: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Remaining table capacity; reservations decrement it, never below zero
    #[serde(default)]
    pub total_tables: u32,
    /// Opening time, "HH:MM"
    pub opening_time: String,
    /// Closing time, "HH:MM"
    pub closing_time: String,
}

fn default_true() -> bool {
    true
}

/// Create establishment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    pub address: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub city: Option<RecordId>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_tables: u32,
    /// Defaults to "10:00"
    #[serde(default)]
    pub opening_time: Option<String>,
    /// Defaults to "22:00"
    #[serde(default)]
    pub closing_time: Option<String>,
}
