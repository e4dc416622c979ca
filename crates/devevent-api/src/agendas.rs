// Agenda HTTP routes

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;

use devevent_contracts::{Agenda, CreateAgendaRequest};
use devevent_storage::PgConnectionCache;

use crate::error::ApiError;
use crate::services::AgendaService;

/// App state for agenda routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AgendaService>,
}

impl AppState {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self {
            service: Arc::new(AgendaService::new(cache)),
        }
    }
}

/// Create agenda routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/agendas", post(create_agenda))
        .with_state(state)
}

/// POST /v1/agendas - Create an agenda item for an event
///
/// Also appends the item's id to the owning event's agenda references.
#[utoipa::path(
    post,
    path = "/v1/agendas",
    request_body = CreateAgendaRequest,
    responses(
        (status = 201, description = "Agenda item created successfully", body = Agenda),
        (status = 400, description = "Validation failure or unknown event reference"),
        (status = 500, description = "Internal server error")
    ),
    tag = "agendas"
)]
pub async fn create_agenda(
    State(state): State<AppState>,
    Json(req): Json<CreateAgendaRequest>,
) -> Result<(StatusCode, Json<Agenda>), ApiError> {
    let item = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
