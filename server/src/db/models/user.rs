//! User Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::UserInfo;
use surrealdb::RecordId;

/// User account.
///
/// Created inactive by registration and activated by email verification.
/// Federated (Google) users are created active and password-less
/// (`hash_pass = None`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// One-time email verification code; cleared on use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_code: Option<String>,
    /// One-time password reset code; independent of the verification code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_code: Option<String>,
    /// Argon2 PHC string; None for federated password-less accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_pass: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_staff: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_verified: bool,
}

/// Create user payload (repository-level; handlers go through the account service)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    /// Already-hashed password; None for federated accounts
    #[serde(default)]
    pub hash_pass: Option<String>,
    #[serde(default)]
    pub verify_code: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
}

/// Partial profile update. Email, flags and date_joined are deliberately
/// absent: they are never writable through the profile path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfileUpdate {
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

impl User {
    /// Verify a password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let Some(hash) = &self.hash_pass else {
            // Password-less federated account
            return Ok(false);
        };
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Public projection of this user (never exposes hash or codes)
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            about_me: self.about_me.clone(),
            city: self.city.clone(),
            photo: self.photo.clone(),
            is_verified: self.is_verified,
            date_joined: self.date_joined,
        }
    }
}
