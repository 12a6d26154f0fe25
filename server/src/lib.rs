//! Celebra Server - catalog and booking backend for bundled celebration services
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SurrealDB storage, repository per table
//! - **Catalog** (`catalog`): list/detail queries with whitelisted sorting and filters
//! - **Pricing** (`pricing`): pure price aggregation with bounded discount
//! - **Reservations** (`reservations`): transactional table-capacity accounting
//! - **Accounts** (`accounts`): registration, verification, login, password reset
//! - **Auth** (`auth`): opaque bearer tokens + request middleware
//! - **HTTP API** (`api`): per-resource routers
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, server
//! ├── utils/         # errors, logging, validation
//! ├── db/            # models and repositories
//! ├── catalog/       # catalog query service
//! ├── pricing/       # price engine
//! ├── reservations/  # reservation manager
//! ├── accounts/      # account service + mailer boundary
//! ├── auth/          # bearer tokens, middleware
//! └── api/           # HTTP routes and handlers
//! ```

pub mod accounts;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod pricing;
pub mod reservations;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, TokenService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
