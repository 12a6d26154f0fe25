//! Review Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User review of a service. Rating is held in 1..=5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Reviewed service
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    /// Author; detached (set to null) when the author account is deleted
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub author: Option<RecordId>,
    pub text: String,
    pub rating: u8,
    pub data: DateTime<Utc>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub author: Option<RecordId>,
    pub text: String,
    pub rating: u8,
}
