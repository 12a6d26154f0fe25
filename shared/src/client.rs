//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Account API DTOs
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password1: String,
    pub password2: String,
}

/// Email verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public user information (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    pub is_verified: bool,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

/// Password reset request (code dispatched by email)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

/// Password reset confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub email: String,
    pub code: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// Federated (Google) login request — idempotent upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub google_id: String,
}

/// Partial profile update — only non-sensitive fields are writable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

// =============================================================================
// Booking API DTOs
// =============================================================================

/// Table reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub tables: u32,
    pub when: chrono::DateTime<chrono::Utc>,
}

/// Review creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn register_request_rejects_bad_email() {
        let req = RegisterRequest {
            first_name: None,
            email: "not-an-email".to_string(),
            password1: "longenough1".to_string(),
            password2: "longenough1".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_request_rejects_short_password() {
        let req = RegisterRequest {
            first_name: Some("Ana".to_string()),
            email: "ana@example.com".to_string(),
            password1: "short".to_string(),
            password2: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
