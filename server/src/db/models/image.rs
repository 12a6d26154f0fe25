//! Image Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Stored image reference. The binary lives on disk; `src` is its path/URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub src: String,
    pub alt: String,
}

/// Create image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCreate {
    pub src: String,
    pub alt: String,
}
