//! Establishment API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /establishments/ | GET | none |
//! | /establishments/{id}/reserve/ | POST | bearer token |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/establishments/", get(handler::list))
        .route("/establishments/{id}/reserve/", post(handler::reserve))
}
