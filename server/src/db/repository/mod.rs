//! Repository Module
//!
//! CRUD operations over the SurrealDB tables, one repository per aggregate.

// Accounts
pub mod user;

// Catalog
pub mod city;
pub mod establishment;
pub mod review;
pub mod service;

// Re-exports
pub use city::CityRepository;
pub use establishment::EstablishmentRepository;
pub use review::ReviewRepository;
pub use service::ServiceRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings at the API boundary
// =============================================================================
//
// surrealdb::RecordId everywhere internally:
//   - parse: let id: RecordId = "service:abc".parse()?;
//   - build: let id = RecordId::from_table_key("service", "abc");
//   - CRUD: db.select(id) / db.delete(id) take a RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Parse an id string, mapping failure to a validation error
    pub fn parse_id(id: &str) -> RepoResult<surrealdb::RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }
}
