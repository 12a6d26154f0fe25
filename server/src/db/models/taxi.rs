//! Taxi Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Taxi ride line item belonging to a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxi {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning service
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    pub boarding_address: String,
    pub dropoff_address: String,
    /// Pickup date and time
    pub date_time: DateTime<Utc>,
    /// Price, falls back to 15.00 when unspecified at creation
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

/// Create taxi payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    pub boarding_address: String,
    pub dropoff_address: String,
    pub date_time: DateTime<Utc>,
    /// Defaults to 15.00 when omitted
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub comment: Option<String>,
}
