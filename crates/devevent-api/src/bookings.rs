// Booking HTTP routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use devevent_contracts::{Booking, CreateBookingRequest, ListResponse};
use devevent_storage::PgConnectionCache;

use crate::error::ApiError;
use crate::services::BookingService;

/// App state for booking routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
}

impl AppState {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self {
            service: Arc::new(BookingService::new(cache)),
        }
    }
}

/// Create booking routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/bookings", post(create_booking).get(list_bookings))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub email: Option<String>,
}

/// POST /v1/bookings - Book a spot at an event
#[utoipa::path(
    post,
    path = "/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created successfully", body = Booking),
        (status = 400, description = "Validation failure or duplicate (event, email) pair"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /v1/bookings - List bookings newest first, optionally by email
#[utoipa::path(
    get,
    path = "/v1/bookings",
    params(
        ("email" = Option<String>, Query, description = "Filter to one email address")
    ),
    responses(
        (status = 200, description = "List of bookings", body = ListResponse<Booking>),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListResponse<Booking>>, ApiError> {
    let bookings = state.service.list(query.email).await?;
    Ok(Json(ListResponse::new(bookings)))
}
