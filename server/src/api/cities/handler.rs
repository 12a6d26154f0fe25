//! City directory API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::catalog::CatalogService;
use crate::core::ServerState;
use crate::db::models::City;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

/// GET /list-city/ - all cities, optional sort by name
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<AppResponse<Vec<City>>>> {
    let catalog = CatalogService::new(state.get_db());
    let cities = catalog.list_cities(query.sort.as_deref()).await?;
    Ok(ok(cities))
}
