//! Service Model
//!
//! A Service is a purchasable bundle of line items (flowers, venues with
//! dishes, taxi rides, decorations) with a whole-number percentage discount.

use super::serde_helpers;
use super::{Decoration, Establishment, Flowers, Taxi};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Service entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Optional image reference
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    /// Whole-number percentage, held in [0, 100]
    #[serde(default)]
    pub discount: u32,
    /// Promotion window start
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    /// Promotion window end
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
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

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default)]
    pub discount: u32,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Service summary returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub photo: Option<RecordId>,
    #[serde(default)]
    pub discount: u32,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Fully composed service detail: the service, every attached line-item
/// collection, and the computed display price.
///
/// Assembled as a single read by the catalog query service; the price is
/// derived at read time and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub flowers: Vec<Flowers>,
    pub establishments: Vec<EstablishmentWithDishes>,
    pub taxis: Vec<Taxi>,
    pub decorations: Vec<Decoration>,
    /// Computed by the pricing engine, rounded to 2 decimals for display
    #[serde(default)]
    pub price: Decimal,
}

/// Establishment together with its dishes (detail eager load)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentWithDishes {
    #[serde(flatten)]
    pub establishment: Establishment,
    pub dishes: Vec<super::Dish>,
}
