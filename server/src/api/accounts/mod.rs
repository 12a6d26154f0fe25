//! Account API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /register/ | POST | none |
//! | /verify-email/ | POST | none |
//! | /login/ | POST | none |
//! | /password-reset/ | POST | none |
//! | /password-reset/confirm/ | POST | none |
//! | /google-login/ | POST | none |
//! | /logout/ | POST | bearer token |
//! | /user-details/ | GET, PATCH | bearer token |
//! | /delete-user/ | DELETE | bearer token |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register/", post(handler::register))
        .route("/verify-email/", post(handler::verify_email))
        .route("/login/", post(handler::login))
        .route("/password-reset/", post(handler::password_reset))
        .route(
            "/password-reset/confirm/",
            post(handler::password_reset_confirm),
        )
        .route("/google-login/", post(handler::google_login))
        .route("/logout/", post(handler::logout))
        .route(
            "/user-details/",
            get(handler::user_details).patch(handler::update_user_details),
        )
        .route("/delete-user/", delete(handler::delete_user))
}
