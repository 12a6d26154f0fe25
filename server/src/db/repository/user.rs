//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserProfileUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Find user by email (unique index)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user. The unique email index backs the duplicate check.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let user = User {
            id: None,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email.clone(),
            phone: None,
            date_joined: chrono::Utc::now(),
            about_me: None,
            photo: None,
            city: None,
            verify_code: data.verify_code,
            reset_code: None,
            hash_pass: data.hash_pass,
            is_active: data.is_active,
            is_staff: false,
            is_verified: data.is_verified,
        };

        let created: Option<User> = self
            .base
            .db()
            .create(TABLE)
            .content(user)
            .await
            .map_err(|err| {
                let msg = err.to_string();
                if msg.contains("already contains") {
                    RepoError::Duplicate(format!("Email '{}' already registered", data.email))
                } else {
                    RepoError::Database(msg)
                }
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Activate account after a successful email verification, clearing the code
    pub async fn activate(&self, id: &RecordId) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $user SET is_active = true, is_verified = true, verify_code = NONE \
                 RETURN AFTER",
            )
            .bind(("user", id.clone()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Store a fresh password reset code
    pub async fn set_reset_code(&self, id: &RecordId, code: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET reset_code = $code")
            .bind(("user", id.clone()))
            .bind(("code", code.to_string()))
            .await?;
        Ok(())
    }

    /// Replace the password hash and consume the reset code
    pub async fn set_password(&self, id: &RecordId, hash: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET hash_pass = $hash, reset_code = NONE")
            .bind(("user", id.clone()))
            .bind(("hash", hash.to_string()))
            .await?;
        Ok(())
    }

    /// Partial profile update via MERGE; absent fields stay untouched
    pub async fn update_profile(
        &self,
        id: &RecordId,
        data: UserProfileUpdate,
    ) -> RepoResult<User> {
        let updated: Option<User> = self.base.db().update(id.clone()).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user (no cascade)
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $user")
            .bind(("user", id.clone()))
            .await?;
        Ok(true)
    }

    /// Delete an account with its credentials: tokens go, reviews stay but
    /// lose their author reference.
    pub async fn delete_account(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE review SET author = NONE WHERE author = $user; \
                 DELETE auth_token WHERE user = $user; \
                 DELETE $user;",
            )
            .bind(("user", id.clone()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem;

    async fn repo() -> UserRepository {
        let db = open_mem().await.unwrap();
        UserRepository::new(db)
    }

    fn sample(email: &str) -> UserCreate {
        UserCreate {
            first_name: Some("Ana".into()),
            last_name: None,
            email: email.into(),
            hash_pass: Some("$argon2id$stub".into()),
            verify_code: Some("12345".into()),
            is_active: false,
            is_verified: false,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_email() {
        let repo = repo().await;
        let created = repo.create(sample("ana@example.com")).await.unwrap();
        assert!(!created.is_active);
        assert_eq!(created.verify_code.as_deref(), Some("12345"));

        let found = repo.find_by_email("ana@example.com").await.unwrap();
        assert!(found.is_some());
        let missing = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let repo = repo().await;
        repo.create(sample("dup@example.com")).await.unwrap();
        let err = repo.create(sample("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn activate_clears_code() {
        let repo = repo().await;
        let created = repo.create(sample("v@example.com")).await.unwrap();
        let id = created.id.unwrap();
        let user = repo.activate(&id).await.unwrap();
        assert!(user.is_active);
        assert!(user.is_verified);
        assert!(user.verify_code.is_none());
    }

    #[tokio::test]
    async fn profile_merge_keeps_untouched_fields() {
        let repo = repo().await;
        let created = repo.create(sample("p@example.com")).await.unwrap();
        let id = created.id.unwrap();

        let update = UserProfileUpdate {
            phone: Some("+34123456".into()),
            ..Default::default()
        };
        let updated = repo.update_profile(&id, update).await.unwrap();
        assert_eq!(updated.phone.as_deref(), Some("+34123456"));
        assert_eq!(updated.first_name.as_deref(), Some("Ana"));
        assert_eq!(updated.email, "p@example.com");
    }
}
