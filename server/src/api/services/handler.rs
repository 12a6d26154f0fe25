//! Service catalog API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::catalog::CatalogService;
use crate::core::ServerState;
use crate::db::models::{Review, ServiceDetail, ServiceSummary};
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppResponse, AppResult, ok};
use shared::CreateReviewRequest;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

/// GET /list-services/ - active service summaries, optional whitelisted sort
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<AppResponse<Vec<ServiceSummary>>>> {
    let catalog = CatalogService::new(state.get_db());
    let services = catalog.list_services(query.sort.as_deref()).await?;
    Ok(ok(services))
}

/// GET /services/{id}/ - service detail with line items and price
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<ServiceDetail>>> {
    let catalog = CatalogService::new(state.get_db());
    let detail = catalog.service_detail(&id).await?;
    Ok(ok(detail))
}

/// GET /services/{id}/reviews/ - reviews of a service, newest first
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Review>>>> {
    let catalog = CatalogService::new(state.get_db());
    let reviews = catalog.list_reviews(&id).await?;
    Ok(ok(reviews))
}

/// POST /services/{id}/reviews/ - attach a review (authenticated)
pub async fn create_review(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Review>>)> {
    validate_required_text(&payload.text, "text", MAX_NOTE_LEN)?;
    let catalog = CatalogService::new(state.get_db());
    let review = catalog
        .create_review(&id, user.id, payload.text, payload.rating)
        .await?;
    Ok((StatusCode::CREATED, ok(review)))
}
