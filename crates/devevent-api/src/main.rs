// DevEvent API server
// Decision: the connection cache is injected state, not a global, so
// tests and shutdown own its lifecycle explicitly

mod agendas;
mod audiences;
mod bookings;
mod config;
mod error;
mod events;
mod services;
mod uploads;

use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use devevent_contracts::*;
use devevent_storage::{ConnectionCache, PgConnectionCache, PgConnector};

use crate::config::Config;
use crate::uploads::{HttpImageStore, ImageStore};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        events::create_event,
        events::list_events,
        events::get_event_by_slug,
        events::get_event,
        events::update_event,
        events::get_event_agenda,
        events::attach_agenda,
        events::detach_agenda,
        events::get_event_audiences,
        events::attach_audience,
        events::detach_audience,
        audiences::create_audience,
        audiences::list_audiences,
        agendas::create_agenda,
        bookings::create_booking,
        bookings::list_bookings,
    ),
    components(
        schemas(
            Event, EventStatus, EventMode, TimeRange,
            UpdateEventRequest,
            Agenda, CreateAgendaRequest,
            Audience, CreateAudienceRequest,
            Booking, BookingStatus, CreateBookingRequest,
            ListResponse<Event>,
            ListResponse<Agenda>,
            ListResponse<Audience>,
            ListResponse<Booking>,
        )
    ),
    tags(
        (name = "events", description = "Event management endpoints"),
        (name = "audiences", description = "Audience category endpoints"),
        (name = "agendas", description = "Agenda item endpoints"),
        (name = "bookings", description = "Booking endpoints")
    ),
    info(
        title = "DevEvent API",
        version = "0.1.0",
        description = "API for browsing and managing developer events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devevent_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("devevent-api starting...");

    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.public_base_url, "Configuration loaded");

    // One connection cache for the whole process; handlers acquire from
    // it per request.
    let cache: Arc<PgConnectionCache> = Arc::new(ConnectionCache::new(PgConnector::new(
        config.database_url.clone(),
    )));

    // Warm the cache eagerly. A failure here is not fatal: the cache
    // resets its in-flight slot on error, so the first request retries.
    match cache.acquire().await {
        Ok(_) => tracing::info!("Connected to database"),
        Err(e) => tracing::warn!(error = %e, "Database not reachable yet, will retry on demand"),
    }

    let images: Arc<dyn ImageStore> = Arc::new(HttpImageStore::new(config.image_store.clone()));

    // Create module-specific states
    let events_state = events::AppState::new(cache.clone(), images.clone());
    let audiences_state = audiences::AppState::new(cache.clone());
    let agendas_state = agendas::AppState::new(cache.clone());
    let bookings_state = bookings::AppState::new(cache.clone());

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    // Build API routes
    let api_routes = Router::new()
        .merge(events::routes(events_state))
        .merge(audiences::routes(audiences_state))
        .merge(agendas::routes(agendas_state))
        .merge(bookings::routes(bookings_state));

    // Build main router with health (not prefixed) and prefixed API routes
    let mut app = Router::new().route("/health", get(health));
    app = app.merge(build_router_with_prefix(api_routes, &config.api_prefix));

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if !config.cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    cache.teardown().await;

    Ok(())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
