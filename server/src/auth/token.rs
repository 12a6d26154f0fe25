//! Token Service
//!
//! Issues and validates the opaque bearer tokens stored in `auth_token`.

use crate::db::models::{AuthToken, User};
use crate::utils::{AppError, AppResult};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "auth_token";

/// Authenticated caller, injected into request extensions by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: RecordId,
    pub email: String,
    pub is_staff: bool,
    pub is_verified: bool,
    /// The bearer key this request authenticated with; logout revokes it
    pub token: String,
}

#[derive(Clone)]
pub struct TokenService {
    db: Surreal<Db>,
}

impl TokenService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Return the user's existing token, or mint a fresh one.
    ///
    /// Repeated logins share a token until it is revoked.
    pub async fn get_or_create(&self, user: &RecordId) -> AppResult<AuthToken> {
        let mut result = self
            .db
            .query("SELECT * FROM auth_token WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let tokens: Vec<AuthToken> = result
            .take(0)
            .map_err(|e| AppError::Database(e.to_string()))?;
        if let Some(token) = tokens.into_iter().next() {
            return Ok(token);
        }

        let token = AuthToken {
            id: None,
            key: uuid::Uuid::new_v4().simple().to_string(),
            user: user.clone(),
            created_at: chrono::Utc::now(),
        };
        let created: Option<AuthToken> = self
            .db
            .create(TABLE)
            .content(token)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        created.ok_or_else(|| AppError::Database("Failed to create token".to_string()))
    }

    /// Resolve a presented bearer key to its user.
    ///
    /// Unknown keys and keys whose user is gone or deactivated both come
    /// back as [`AppError::InvalidToken`].
    pub async fn authenticate(&self, key: &str) -> AppResult<CurrentUser> {
        let mut result = self
            .db
            .query("SELECT * FROM auth_token WHERE key = $key LIMIT 1")
            .bind(("key", key.to_string()))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let tokens: Vec<AuthToken> = result
            .take(0)
            .map_err(|e| AppError::Database(e.to_string()))?;
        let token = tokens.into_iter().next().ok_or(AppError::InvalidToken)?;

        let user: Option<User> = self
            .db
            .select(token.user.clone())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let user = user.ok_or(AppError::InvalidToken)?;
        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(CurrentUser {
            id: token.user,
            email: user.email,
            is_staff: user.is_staff,
            is_verified: user.is_verified,
            token: token.key,
        })
    }

    /// Delete a token by key. Deleting an unknown key is a no-op.
    pub async fn revoke(&self, key: &str) -> AppResult<()> {
        self.db
            .query("DELETE auth_token WHERE key = $key")
            .bind(("key", key.to_string()))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::UserCreate;
    use crate::db::open_mem;
    use crate::db::repository::UserRepository;

    async fn setup() -> (TokenService, RecordId) {
        let db = open_mem().await.unwrap();
        let users = UserRepository::new(db.clone());
        let user = users
            .create(UserCreate {
                first_name: None,
                last_name: None,
                email: "t@example.com".into(),
                hash_pass: Some("$argon2id$stub".into()),
                verify_code: None,
                is_active: true,
                is_verified: true,
            })
            .await
            .unwrap();
        (TokenService::new(db), user.id.unwrap())
    }

    #[tokio::test]
    async fn repeated_logins_share_a_token() {
        let (service, user) = setup().await;
        let first = service.get_or_create(&user).await.unwrap();
        let second = service.get_or_create(&user).await.unwrap();
        assert_eq!(first.key, second.key);
    }

    #[tokio::test]
    async fn authenticate_and_revoke() {
        let (service, user) = setup().await;
        let token = service.get_or_create(&user).await.unwrap();

        let current = service.authenticate(&token.key).await.unwrap();
        assert_eq!(current.email, "t@example.com");
        assert_eq!(current.id, user);

        service.revoke(&token.key).await.unwrap();
        let err = service.authenticate(&token.key).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));

        // revoking again stays silent
        service.revoke(&token.key).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_key_rejected() {
        let (service, _) = setup().await;
        let err = service.authenticate("no-such-key").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
