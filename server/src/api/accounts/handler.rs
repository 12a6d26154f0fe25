//! Account API handlers

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};
use shared::{
    GoogleLoginRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, ProfileUpdateRequest, RegisterRequest, UserInfo, VerifyEmailRequest,
};

/// POST /register/ - create an inactive account, dispatch verification code
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<UserInfo>>)> {
    let accounts = state.get_account_service();
    let info = accounts.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(info, "Verification code sent"),
    ))
}

/// POST /verify-email/ - activate an account with its emailed code,
/// handing back a bearer token
pub async fn verify_email(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let accounts = state.get_account_service();
    let response = accounts.verify_email(payload).await?;
    Ok(ok(response))
}

/// POST /login/ - exchange credentials for a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let accounts = state.get_account_service();
    let response = accounts.login(payload).await?;
    Ok(ok(response))
}

/// POST /password-reset/ - dispatch a reset code
pub async fn password_reset(
    State(state): State<ServerState>,
    Json(payload): Json<PasswordResetRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let accounts = state.get_account_service();
    accounts.request_password_reset(payload).await?;
    Ok(ok_with_message((), "Password reset code sent"))
}

/// POST /password-reset/confirm/ - replace the password with a valid code
pub async fn password_reset_confirm(
    State(state): State<ServerState>,
    Json(payload): Json<PasswordResetConfirmRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let accounts = state.get_account_service();
    accounts.confirm_password_reset(payload).await?;
    Ok(ok_with_message((), "Password updated"))
}

/// POST /google-login/ - federated login, creating the account on first use
pub async fn google_login(
    State(state): State<ServerState>,
    Json(payload): Json<GoogleLoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let accounts = state.get_account_service();
    let response = accounts.google_login(payload).await?;
    Ok(ok(response))
}

/// POST /logout/ - revoke the presented token (idempotent)
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<()>>> {
    let accounts = state.get_account_service();
    accounts.logout(&user).await?;
    Ok(ok_with_message((), "Logged out"))
}

/// GET /user-details/ - current profile
pub async fn user_details(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let accounts = state.get_account_service();
    let info = accounts.profile(&user).await?;
    Ok(ok(info))
}

/// PATCH /user-details/ - partial profile update
pub async fn update_user_details(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let accounts = state.get_account_service();
    let info = accounts.update_profile(&user, payload).await?;
    Ok(ok(info))
}

/// DELETE /delete-user/ - delete the account and its credentials
pub async fn delete_user(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<StatusCode> {
    let accounts = state.get_account_service();
    accounts.delete_account(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}
