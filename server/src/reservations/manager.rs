//! Capacity-checked reservation creation.
//!
//! The capacity check, the decrement and the reservation insert run inside a
//! single database transaction, so two concurrent requests can never both
//! claim the last table. Optimistic transaction conflicts are retried a
//! bounded number of times before giving up.

use crate::db::models::Reservation;
use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

const MAX_CONFLICT_RETRIES: usize = 5;

const RESERVE_QUERY: &str = "\
BEGIN TRANSACTION;
LET $est = SELECT * FROM $establishment;
IF array::len($est) == 0 { THROW 'establishment not found' };
IF $est[0].total_tables < $tables { THROW 'insufficient capacity' };
UPDATE $establishment SET total_tables = total_tables - $tables;
CREATE $reservation CONTENT {
    establishment: $establishment,
    reserved_tables: $tables,
    reservation_time: $when
};
COMMIT TRANSACTION;";

/// Reservation failure modes
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Establishment not found: {0}")]
    NotFound(String),

    #[error("Insufficient capacity: requested {requested}")]
    InsufficientCapacity { requested: u32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Clone)]
pub struct ReservationManager {
    db: Surreal<Db>,
}

impl ReservationManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Reserve `tables` tables at an establishment.
    ///
    /// Fails with [`ReservationError::InsufficientCapacity`] when fewer
    /// tables remain than requested; capacity is never driven below zero.
    pub async fn reserve(
        &self,
        establishment_id: &str,
        tables: u32,
        when: DateTime<Utc>,
    ) -> Result<Reservation, ReservationError> {
        if tables == 0 {
            return Err(ReservationError::Validation(
                "At least one table must be reserved".to_string(),
            ));
        }
        let establishment: RecordId = establishment_id.parse().map_err(|_| {
            ReservationError::Validation(format!("Invalid establishment ID: {establishment_id}"))
        })?;

        let mut last_err = None;
        for _ in 0..MAX_CONFLICT_RETRIES {
            match self.try_reserve(&establishment, tables, when).await {
                Err(err @ ReservationError::Database(_)) if is_retryable(&err) => {
                    last_err = Some(err);
                }
                other => return other,
            }
        }
        Err(last_err
            .unwrap_or_else(|| ReservationError::Database("Transaction retry exhausted".into())))
    }

    async fn try_reserve(
        &self,
        establishment: &RecordId,
        tables: u32,
        when: DateTime<Utc>,
    ) -> Result<Reservation, ReservationError> {
        // Pre-generated key lets us read the row back after commit without
        // depending on statement result positions inside the transaction.
        let key = uuid::Uuid::new_v4().simple().to_string();
        let reservation_id = RecordId::from_table_key("reservation", key);

        let response = self
            .db
            .query(RESERVE_QUERY)
            .bind(("establishment", establishment.clone()))
            .bind(("tables", tables as i64))
            .bind(("when", when))
            .bind(("reservation", reservation_id.clone()))
            .await
            .map_err(|e| classify(e.to_string(), tables))?;

        response.check().map_err(|e| classify(e.to_string(), tables))?;

        let created: Option<Reservation> = self
            .db
            .select(reservation_id)
            .await
            .map_err(|e| ReservationError::Database(e.to_string()))?;
        created.ok_or_else(|| ReservationError::Database("Reservation row missing".to_string()))
    }
}

fn classify(message: String, requested: u32) -> ReservationError {
    if message.contains("insufficient capacity") {
        ReservationError::InsufficientCapacity { requested }
    } else if message.contains("establishment not found") {
        ReservationError::NotFound(message)
    } else {
        ReservationError::Database(message)
    }
}

fn is_retryable(err: &ReservationError) -> bool {
    match err {
        ReservationError::Database(msg) => {
            let msg = msg.to_lowercase();
            msg.contains("can be retried") || msg.contains("conflict") || msg.contains("busy")
        }
        _ => false,
    }
}
