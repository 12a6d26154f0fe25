//! Pricing Engine
//!
//! Derives a service's price from its line items at read time. Nothing here
//! touches storage; prices are exact [`Decimal`] arithmetic and only rounded
//! for display.

mod calculator;

pub use calculator::{compute_price, display_price};
