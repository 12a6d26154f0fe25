//! Establishment API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::catalog::CatalogService;
use crate::core::ServerState;
use crate::db::models::{Establishment, Reservation};
use crate::db::repository::establishment::EstablishmentFilter;
use crate::reservations::ReservationManager;
use crate::utils::{AppResponse, AppResult, ok};
use shared::ReserveRequest;

/// Optional conjunctive filters; every supplied one must match
#[derive(Debug, Deserialize)]
pub struct EstablishmentQuery {
    pub city_id: Option<String>,
    pub service_id: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

/// GET /establishments/ - active establishments, filtered
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EstablishmentQuery>,
) -> AppResult<Json<AppResponse<Vec<Establishment>>>> {
    let catalog = CatalogService::new(state.get_db());
    let establishments = catalog
        .list_establishments(EstablishmentFilter {
            city: query.city_id,
            service: query.service_id,
            date_from: query.date_from,
            date_to: query.date_to,
        })
        .await?;
    Ok(ok(establishments))
}

/// POST /establishments/{id}/reserve/ - reserve tables (authenticated)
pub async fn reserve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReserveRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Reservation>>)> {
    let manager = ReservationManager::new(state.get_db());
    let reservation = manager.reserve(&id, payload.tables, payload.when).await?;
    Ok((StatusCode::CREATED, ok(reservation)))
}
