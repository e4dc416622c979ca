// Audience HTTP routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use devevent_contracts::{Audience, CreateAudienceRequest, ListResponse};
use devevent_storage::PgConnectionCache;

use crate::error::ApiError;
use crate::services::AudienceService;

/// App state for audience routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AudienceService>,
}

impl AppState {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self {
            service: Arc::new(AudienceService::new(cache)),
        }
    }
}

/// Create audience routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/audiences", post(create_audience).get(list_audiences))
        .with_state(state)
}

/// POST /v1/audiences - Create a new audience category
#[utoipa::path(
    post,
    path = "/v1/audiences",
    request_body = CreateAudienceRequest,
    responses(
        (status = 201, description = "Audience created successfully", body = Audience),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    tag = "audiences"
)]
pub async fn create_audience(
    State(state): State<AppState>,
    Json(req): Json<CreateAudienceRequest>,
) -> Result<(StatusCode, Json<Audience>), ApiError> {
    let audience = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(audience)))
}

/// GET /v1/audiences - List all audiences ascending by category
#[utoipa::path(
    get,
    path = "/v1/audiences",
    responses(
        (status = 200, description = "List of audiences", body = ListResponse<Audience>),
        (status = 500, description = "Internal server error")
    ),
    tag = "audiences"
)]
pub async fn list_audiences(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Audience>>, ApiError> {
    let audiences = state.service.list().await?;
    Ok(Json(ListResponse::new(audiences)))
}
