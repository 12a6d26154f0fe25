//! Reservation Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Table reservation at an establishment.
///
/// Created only through the reservation manager and immutable afterwards;
/// there is no cancel/release operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub establishment: RecordId,
    pub reserved_tables: u32,
    pub reservation_time: DateTime<Utc>,
}
