//! Service catalog API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /list-services/ | GET | none |
//! | /services/{id}/ | GET | none |
//! | /services/{id}/reviews/ | GET | none |
//! | /services/{id}/reviews/ | POST | bearer token |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/list-services/", get(handler::list))
        .route("/services/{id}/", get(handler::detail))
        .route(
            "/services/{id}/reviews/",
            get(handler::list_reviews).post(handler::create_review),
        )
}
