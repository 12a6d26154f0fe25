//! Account Service
//!
//! Registration, verification, login, password reset, federated login and
//! profile management.

pub mod mailer;
mod service;

pub use mailer::{LogMailer, Mailer};
pub use service::AccountService;
