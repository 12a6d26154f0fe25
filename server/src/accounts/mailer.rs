//! Outbound mail boundary
//!
//! One-time codes leave the system through this trait. The default
//! implementation writes them to the log; a real transport slots in behind
//! the same interface.

use crate::utils::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver an email verification code
    async fn send_verification(&self, email: &str, code: &str) -> AppResult<()>;

    /// Deliver a password reset code
    async fn send_password_reset(&self, email: &str, code: &str) -> AppResult<()>;
}

/// Log-only mailer
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, code: &str) -> AppResult<()> {
        tracing::info!(target: "mailer", %email, %code, "verification code issued");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, code: &str) -> AppResult<()> {
        tracing::info!(target: "mailer", %email, %code, "password reset code issued");
        Ok(())
    }
}
