//! Authentication module
//!
//! Opaque bearer tokens backed by the `auth_token` table. A token is valid
//! exactly until its row is deleted, so logout and account deletion revoke
//! access immediately.

pub mod middleware;
pub mod token;

pub use middleware::require_auth;
pub use token::{CurrentUser, TokenService};
