//! Shared types for the Celebra platform
//!
//! Request/response DTOs used by the HTTP API plus small utilities
//! (timestamps, one-time code generation) shared between server and clients.

pub mod client;
pub mod util;

pub use client::*;
