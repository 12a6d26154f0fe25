//! City directory API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /list-city/ | GET | none |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/list-city/", get(handler::list))
}
