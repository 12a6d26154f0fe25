use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::accounts::{LogMailer, Mailer};
use crate::auth::TokenService;
use crate::core::Config;

/// Shared server state - holds singleton references to all services
///
/// `ServerState` is cloned into every handler; `Arc` keeps the clone cheap.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | db | Surreal<Db> | embedded database handle |
/// | token_service | Arc<TokenService> | opaque bearer credential service |
/// | mailer | Arc<dyn Mailer> | outbound mail boundary |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Bearer token service
    pub token_service: Arc<TokenService>,
    /// Outbound mail boundary (external collaborator)
    pub mailer: Arc<dyn Mailer>,
}

impl ServerState {
    /// Build state around an already-open database handle.
    ///
    /// Used by tests (in-memory engine) and by [`initialize`](Self::initialize).
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let token_service = Arc::new(TokenService::new(db.clone()));
        Self {
            config,
            db,
            token_service,
            mailer: Arc::new(LogMailer),
        }
    }

    /// Initialize server state from configuration
    ///
    /// Order:
    /// 1. working directory structure
    /// 2. database (work_dir/database/celebra.db) + index bootstrap
    /// 3. services
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened; the server cannot run
    /// without storage.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("celebra.db");
        let db = crate::db::open(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db)
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the token service
    pub fn get_token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    /// Build an account service around the shared collaborators
    pub fn get_account_service(&self) -> crate::accounts::AccountService {
        crate::accounts::AccountService::new(
            self.db.clone(),
            self.token_service.as_ref().clone(),
            self.mailer.clone(),
        )
    }

    /// Replace the mailer (tests inject a capturing implementation)
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }
}
