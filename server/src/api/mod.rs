//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`accounts`] - registration, login and profile endpoints
//! - [`services`] - service catalog and reviews
//! - [`cities`] - city directory
//! - [`establishments`] - establishment search and reservations

pub mod accounts;
pub mod cities;
pub mod establishments;
pub mod health;
pub mod services;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
