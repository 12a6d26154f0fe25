//! Reservation Manager
//!
//! Atomic table reservations against establishment capacity.

mod manager;

pub use manager::{ReservationError, ReservationManager};
