//! Auth Token Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Opaque bearer token.
///
/// The `key` is the credential itself; validating a request is a lookup on
/// the unique key index, and logout deletes the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub key: String,
    /// Owning user
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub created_at: DateTime<Utc>,
}
