//! Database module
//!
//! Embedded SurrealDB storage: connection bootstrap, models and repositories.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "celebra";
const DATABASE: &str = "main";

/// Open the on-disk database at the given path and bootstrap indexes
pub async fn open(path: &str) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
    select_and_bootstrap(&db).await?;
    tracing::info!("Database connection established ({path})");
    Ok(db)
}

/// Open an in-memory database (tests)
pub async fn open_mem() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;
    select_and_bootstrap(&db).await?;
    Ok(db)
}

async fn select_and_bootstrap(db: &Surreal<Db>) -> Result<(), AppError> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

    // Index bootstrap. IF NOT EXISTS keeps restarts idempotent.
    db.query(
        "DEFINE INDEX IF NOT EXISTS user_email ON TABLE user COLUMNS email UNIQUE;
         DEFINE INDEX IF NOT EXISTS auth_token_key ON TABLE auth_token COLUMNS key UNIQUE;",
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to define indexes: {e}")))?;

    Ok(())
}
