//! Account lifecycle operations.
//!
//! State machine: registration creates an inactive user holding a one-time
//! verification code; verification activates it; login, password reset and
//! profile access all require the active state. A stale unverified record
//! never blocks re-registration of its email.

use std::sync::Arc;

use crate::accounts::Mailer;
use crate::auth::{CurrentUser, TokenService};
use crate::db::models::{User, UserCreate, UserProfileUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{
    GoogleLoginRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, ProfileUpdateRequest, RegisterRequest, UserInfo, VerifyEmailRequest,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
}

impl AccountService {
    pub fn new(db: Surreal<Db>, tokens: TokenService, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            users: UserRepository::new(db),
            tokens,
            mailer,
        }
    }

    /// Register a new account and dispatch its verification code.
    ///
    /// An active account on the same email is a conflict. An unverified
    /// leftover is deleted and replaced, so an abandoned registration never
    /// locks the address.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<UserInfo> {
        req.validate()?;
        if req.password1 != req.password2 {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        if let Some(existing) = self.users.find_by_email(&req.email).await? {
            if existing.is_active {
                return Err(AppError::Conflict(format!(
                    "Email '{}' already registered",
                    req.email
                )));
            }
            if let Some(id) = &existing.id {
                self.users.delete(id).await?;
            }
        }

        let hash = User::hash_password(&req.password1)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;
        let code = shared::util::one_time_code();

        let user = self
            .users
            .create(UserCreate {
                first_name: req.first_name,
                last_name: None,
                email: req.email.clone(),
                hash_pass: Some(hash),
                verify_code: Some(code.clone()),
                is_active: false,
                is_verified: false,
            })
            .await?;

        self.mailer.send_verification(&req.email, &code).await?;
        Ok(user.info())
    }

    /// Activate an account with its emailed code and issue its bearer token.
    ///
    /// Verifying an already-active account succeeds without touching it and
    /// returns the existing token.
    pub async fn verify_email(&self, req: VerifyEmailRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account for '{}'", req.email)))?;

        let user = if user.is_active {
            user
        } else {
            match (&user.verify_code, &user.id) {
                (Some(code), Some(id)) if *code == req.code => self.users.activate(id).await?,
                _ => return Err(AppError::InvalidCode),
            }
        };

        let id = user
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("User record without id".to_string()))?;
        let token = self.tokens.get_or_create(&id).await?;
        Ok(LoginResponse {
            token: token.key,
            user: user.info(),
        })
    }

    /// Log in with email and password.
    ///
    /// Unknown email, wrong password and inactive account all produce the
    /// same unauthorized response.
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !user.is_active {
            return Err(AppError::invalid_credentials());
        }
        let valid = user
            .verify_password(&req.password)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
        if !valid {
            return Err(AppError::invalid_credentials());
        }

        let id = user
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("User record without id".to_string()))?;
        let token = self.tokens.get_or_create(&id).await?;
        Ok(LoginResponse {
            token: token.key,
            user: user.info(),
        })
    }

    /// Issue a password reset code to an existing active account
    pub async fn request_password_reset(&self, req: PasswordResetRequest) -> AppResult<()> {
        req.validate()?;
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::NotFound(format!("No account for '{}'", req.email)))?;

        let id = user
            .id
            .ok_or_else(|| AppError::Internal("User record without id".to_string()))?;
        let code = shared::util::one_time_code();
        self.users.set_reset_code(&id, &code).await?;
        self.mailer.send_password_reset(&req.email, &code).await?;
        Ok(())
    }

    /// Replace a password using the emailed reset code. Codes are single-use.
    pub async fn confirm_password_reset(
        &self,
        req: PasswordResetConfirmRequest,
    ) -> AppResult<()> {
        if req.new_password1 != req.new_password2 {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        if req.new_password1.len() < 8 || req.new_password1.len() > MAX_PASSWORD_LEN {
            return Err(AppError::Validation(
                "Password must be between 8 and 128 characters".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account for '{}'", req.email)))?;

        match (&user.reset_code, &user.id) {
            (Some(code), Some(id)) if *code == req.code => {
                let hash = User::hash_password(&req.new_password1)
                    .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;
                self.users.set_password(id, &hash).await?;
                Ok(())
            }
            _ => Err(AppError::InvalidCode),
        }
    }

    /// Federated login: log in when the email is known, create an active
    /// password-less account when it is not.
    pub async fn google_login(&self, req: GoogleLoginRequest) -> AppResult<LoginResponse> {
        validate_required_text(&req.email, "email", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.google_id, "google_id", MAX_SHORT_TEXT_LEN)?;

        let user = match self.users.find_by_email(&req.email).await? {
            Some(user) if user.is_active => user,
            Some(user) => {
                // Unverified local leftover; the identity provider vouches
                // for the email, so promote it.
                let id = user
                    .id
                    .ok_or_else(|| AppError::Internal("User record without id".to_string()))?;
                self.users.activate(&id).await?
            }
            None => {
                self.users
                    .create(UserCreate {
                        first_name: req.first_name,
                        last_name: req.last_name,
                        email: req.email,
                        hash_pass: None,
                        verify_code: None,
                        is_active: true,
                        is_verified: true,
                    })
                    .await?
            }
        };

        let id = user
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("User record without id".to_string()))?;
        let token = self.tokens.get_or_create(&id).await?;
        Ok(LoginResponse {
            token: token.key,
            user: user.info(),
        })
    }

    /// Revoke the presented token. Revoking twice is a no-op.
    pub async fn logout(&self, current: &CurrentUser) -> AppResult<()> {
        self.tokens.revoke(&current.token).await
    }

    /// Current profile
    pub async fn profile(&self, current: &CurrentUser) -> AppResult<UserInfo> {
        let user = self
            .users
            .find_by_id(&current.id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        Ok(user.info())
    }

    /// Partial profile update over the non-sensitive fields
    pub async fn update_profile(
        &self,
        current: &CurrentUser,
        req: ProfileUpdateRequest,
    ) -> AppResult<UserInfo> {
        validate_optional_text(&req.first_name, "first_name", MAX_NAME_LEN)?;
        validate_optional_text(&req.last_name, "last_name", MAX_NAME_LEN)?;
        validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&req.about_me, "about_me", MAX_NOTE_LEN)?;
        validate_optional_text(&req.city, "city", MAX_NAME_LEN)?;
        validate_optional_text(&req.photo, "photo", MAX_NOTE_LEN)?;

        let update = UserProfileUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            about_me: req.about_me,
            city: req.city,
            photo: req.photo,
        };
        let user = self.users.update_profile(&current.id, update).await?;
        Ok(user.info())
    }

    /// Delete the account with its tokens; reviews survive authorless
    pub async fn delete_account(&self, current: &CurrentUser) -> AppResult<()> {
        self.users.delete_account(&current.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::LogMailer;
    use crate::db::open_mem;

    async fn setup() -> (AccountService, Surreal<Db>) {
        let db = open_mem().await.unwrap();
        let tokens = TokenService::new(db.clone());
        let service = AccountService::new(db.clone(), tokens, Arc::new(LogMailer));
        (service, db)
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: Some("Ana".into()),
            email: email.into(),
            password1: "longenough1".into(),
            password2: "longenough1".into(),
        }
    }

    async fn stored_code(db: &Surreal<Db>, email: &str) -> Option<String> {
        let user = UserRepository::new(db.clone())
            .find_by_email(email)
            .await
            .unwrap()
            .unwrap();
        user.verify_code.or(user.reset_code)
    }

    async fn register_and_verify(service: &AccountService, db: &Surreal<Db>, email: &str) {
        service.register(register_req(email)).await.unwrap();
        let code = stored_code(db, email).await.unwrap();
        service
            .verify_email(VerifyEmailRequest {
                email: email.into(),
                code,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn register_verify_login_flow() {
        let (service, db) = setup().await;
        let info = service.register(register_req("ana@example.com")).await.unwrap();
        assert!(!info.is_verified);

        // cannot log in before verification
        let err = service
            .login(LoginRequest {
                email: "ana@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let code = stored_code(&db, "ana@example.com").await.unwrap();
        let verified = service
            .verify_email(VerifyEmailRequest {
                email: "ana@example.com".into(),
                code,
            })
            .await
            .unwrap();
        assert!(verified.user.is_verified);
        assert!(!verified.token.is_empty());

        let login = service
            .login(LoginRequest {
                email: "ana@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .unwrap();
        // login reuses the token issued at verification
        assert_eq!(login.token, verified.token);
    }

    #[tokio::test]
    async fn mismatched_passwords_rejected() {
        let (service, _) = setup().await;
        let mut req = register_req("x@example.com");
        req.password2 = "different99".into();
        let err = service.register(req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn active_email_conflicts_but_stale_is_replaced() {
        let (service, db) = setup().await;
        register_and_verify(&service, &db, "taken@example.com").await;
        let err = service
            .register(register_req("taken@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // unverified registration does not lock the address
        service.register(register_req("stale@example.com")).await.unwrap();
        service.register(register_req("stale@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_code_rejected_and_verification_idempotent() {
        let (service, db) = setup().await;
        service.register(register_req("v@example.com")).await.unwrap();

        let err = service
            .verify_email(VerifyEmailRequest {
                email: "v@example.com".into(),
                code: "00000".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCode));

        let code = stored_code(&db, "v@example.com").await.unwrap();
        let first = service
            .verify_email(VerifyEmailRequest {
                email: "v@example.com".into(),
                code: code.clone(),
            })
            .await
            .unwrap();
        // replaying the consumed code still reports success for the active
        // account and hands back the same token
        let second = service
            .verify_email(VerifyEmailRequest {
                email: "v@example.com".into(),
                code,
            })
            .await
            .unwrap();
        assert!(second.user.is_verified);
        assert_eq!(first.token, second.token);
    }

    #[tokio::test]
    async fn password_reset_is_single_use() {
        let (service, db) = setup().await;
        register_and_verify(&service, &db, "r@example.com").await;

        service
            .request_password_reset(PasswordResetRequest {
                email: "r@example.com".into(),
            })
            .await
            .unwrap();
        let code = stored_code(&db, "r@example.com").await.unwrap();

        service
            .confirm_password_reset(PasswordResetConfirmRequest {
                email: "r@example.com".into(),
                code: code.clone(),
                new_password1: "brandnewpass".into(),
                new_password2: "brandnewpass".into(),
            })
            .await
            .unwrap();

        // old password gone, new one works
        assert!(service
            .login(LoginRequest {
                email: "r@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .is_err());
        service
            .login(LoginRequest {
                email: "r@example.com".into(),
                password: "brandnewpass".into(),
            })
            .await
            .unwrap();

        // code was consumed
        let err = service
            .confirm_password_reset(PasswordResetConfirmRequest {
                email: "r@example.com".into(),
                code,
                new_password1: "anotherpass1".into(),
                new_password2: "anotherpass1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCode));
    }

    #[tokio::test]
    async fn google_login_upserts_and_is_idempotent() {
        let (service, _) = setup().await;
        let req = GoogleLoginRequest {
            email: "g@example.com".into(),
            first_name: Some("Gina".into()),
            last_name: None,
            google_id: "google-oauth2|123".into(),
        };
        let first = service.google_login(req.clone()).await.unwrap();
        assert!(first.user.is_verified);
        let second = service.google_login(req).await.unwrap();
        assert_eq!(first.user.id, second.user.id);
        assert_eq!(first.token, second.token);
    }

    #[tokio::test]
    async fn logout_revokes_and_stays_idempotent() {
        let (service, db) = setup().await;
        register_and_verify(&service, &db, "l@example.com").await;
        let login = service
            .login(LoginRequest {
                email: "l@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .unwrap();

        let tokens = TokenService::new(db.clone());
        let current = tokens.authenticate(&login.token).await.unwrap();
        service.logout(&current).await.unwrap();
        assert!(tokens.authenticate(&login.token).await.is_err());
        service.logout(&current).await.unwrap();
    }

    #[tokio::test]
    async fn profile_update_ignores_sensitive_fields_by_construction() {
        let (service, db) = setup().await;
        register_and_verify(&service, &db, "p@example.com").await;
        let login = service
            .login(LoginRequest {
                email: "p@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .unwrap();
        let tokens = TokenService::new(db.clone());
        let current = tokens.authenticate(&login.token).await.unwrap();

        let info = service
            .update_profile(
                &current,
                ProfileUpdateRequest {
                    about_me: Some("Hello".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(info.about_me.as_deref(), Some("Hello"));
        assert_eq!(info.email, "p@example.com");

        let fetched = service.profile(&current).await.unwrap();
        assert_eq!(fetched.about_me.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn delete_account_revokes_tokens_and_detaches_reviews() {
        let (service, db) = setup().await;
        register_and_verify(&service, &db, "d@example.com").await;
        let login = service
            .login(LoginRequest {
                email: "d@example.com".into(),
                password: "longenough1".into(),
            })
            .await
            .unwrap();
        let tokens = TokenService::new(db.clone());
        let current = tokens.authenticate(&login.token).await.unwrap();

        // a review written by this user survives the deletion authorless
        let catalog = crate::catalog::CatalogService::new(db.clone());
        let services = crate::db::repository::ServiceRepository::new(db.clone());
        let svc = services
            .create(crate::db::models::ServiceCreate {
                name: "Gala".into(),
                description: None,
                photo: None,
                discount: 0,
                date_from: None,
                date_to: None,
                comment: None,
            })
            .await
            .unwrap();
        let svc_id = svc.id.unwrap().to_string();
        catalog
            .create_review(&svc_id, current.id.clone(), "Nice".into(), 5)
            .await
            .unwrap();

        service.delete_account(&current).await.unwrap();

        assert!(tokens.authenticate(&login.token).await.is_err());
        let users = UserRepository::new(db.clone());
        assert!(users.find_by_email("d@example.com").await.unwrap().is_none());

        let reviews = catalog.list_reviews(&svc_id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert!(reviews[0].author.is_none());
    }
}
