//! Authentication middleware
//!
//! Validates `Authorization: Bearer <key>` on protected routes and injects
//! [`CurrentUser`] into request extensions. Public catalog and account
//! bootstrap routes pass through untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes that require a valid token.
///
/// Review creation shares its path with the public review listing, so the
/// method decides.
fn is_protected(method: &http::Method, path: &str) -> bool {
    matches!(path, "/logout/" | "/user-details/" | "/delete-user/")
        || (method == http::Method::POST
            && ((path.starts_with("/establishments/") && path.ends_with("/reserve/"))
                || (path.starts_with("/services/") && path.ends_with("/reviews/"))))
}

/// Require a logged-in user on protected routes
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !is_protected(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let key = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?
        .to_string();

    match state.get_token_service().authenticate(&key).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(err) => {
            tracing::warn!(target: "http_access", "auth failed on {}: {}", req.uri(), err);
            Err(err)
        }
    }
}
