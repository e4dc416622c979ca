// Event HTTP routes

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use devevent_contracts::{Agenda, Audience, Event, ListResponse, UpdateEventRequest};
use devevent_core::EventDraft;
use devevent_storage::PgConnectionCache;

use crate::error::ApiError;
use crate::services::EventService;
use crate::uploads::ImageStore;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(cache: Arc<PgConnectionCache>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            service: Arc::new(EventService::new(cache)),
            images,
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(create_event).get(list_events))
        .route("/v1/events/slug/{slug}", get(get_event_by_slug))
        .route(
            "/v1/events/{event_id}",
            get(get_event).patch(update_event),
        )
        .route("/v1/events/{event_id}/agenda", get(get_event_agenda))
        .route(
            "/v1/events/{event_id}/agenda/{agenda_id}",
            post(attach_agenda).delete(detach_agenda),
        )
        .route("/v1/events/{event_id}/audiences", get(get_event_audiences))
        .route(
            "/v1/events/{event_id}/audiences/{audience_id}",
            post(attach_audience).delete(detach_audience),
        )
        .with_state(state)
}

/// POST /v1/events - Create a new event from a multipart form
///
/// The `image` file part is pushed to the external image host and the
/// returned URL takes its place in the event record.
#[utoipa::path(
    post,
    path = "/v1/events",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created successfully", body = Event),
        (status = 400, description = "Missing image part, malformed form, or validation failure"),
        (status = 500, description = "Image upload or database failure")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let (fields, image) = collect_event_form(multipart).await?;
    let image = image.ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;

    let image_url = state
        .images
        .upload(&image.filename, &image.content_type, image.data)
        .await
        .map_err(|e| {
            tracing::error!("Image upload failed: {}", e);
            ApiError::Internal(anyhow::Error::new(e))
        })?;

    let draft = draft_from_fields(fields, image_url)?;
    let event = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /v1/events - List all events, newest first
#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "List of events", body = ListResponse<Event>),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.list().await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/events/slug/{slug} - Get event by slug
#[utoipa::path(
    get,
    path = "/v1/events/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "No event has this slug"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn get_event_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.get_by_slug(&slug).await?;
    Ok(Json(event))
}

/// GET /v1/events/{event_id} - Get event by ID
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.get(event_id).await?;
    Ok(Json(event))
}

/// PATCH /v1/events/{event_id} - Update an event
#[utoipa::path(
    patch,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.update(event_id, req).await?;
    Ok(Json(event))
}

/// GET /v1/events/{event_id}/agenda - Resolve the event's agenda references
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}/agenda",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Agenda items in the event's listed order", body = ListResponse<Agenda>),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn get_event_agenda(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListResponse<Agenda>>, ApiError> {
    let items = state.service.agenda(event_id).await?;
    Ok(Json(ListResponse::new(items)))
}

/// GET /v1/events/{event_id}/audiences - Resolve the event's audience references
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}/audiences",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Audiences in the event's listed order", body = ListResponse<Audience>),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn get_event_audiences(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListResponse<Audience>>, ApiError> {
    let audiences = state.service.audiences(event_id).await?;
    Ok(Json(ListResponse::new(audiences)))
}

/// POST /v1/events/{event_id}/audiences/{audience_id} - Attach an audience reference
#[utoipa::path(
    post,
    path = "/v1/events/{event_id}/audiences/{audience_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("audience_id" = Uuid, Path, description = "Audience ID")
    ),
    responses(
        (status = 200, description = "Reference attached (idempotent)", body = Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn attach_audience(
    State(state): State<AppState>,
    Path((event_id, audience_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.attach_audience(event_id, audience_id).await?;
    Ok(Json(event))
}

/// DELETE /v1/events/{event_id}/audiences/{audience_id} - Detach an audience reference
#[utoipa::path(
    delete,
    path = "/v1/events/{event_id}/audiences/{audience_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("audience_id" = Uuid, Path, description = "Audience ID")
    ),
    responses(
        (status = 200, description = "Reference detached", body = Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn detach_audience(
    State(state): State<AppState>,
    Path((event_id, audience_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.detach_audience(event_id, audience_id).await?;
    Ok(Json(event))
}

/// POST /v1/events/{event_id}/agenda/{agenda_id} - Attach an agenda reference
#[utoipa::path(
    post,
    path = "/v1/events/{event_id}/agenda/{agenda_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("agenda_id" = Uuid, Path, description = "Agenda item ID")
    ),
    responses(
        (status = 200, description = "Reference attached (idempotent)", body = Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn attach_agenda(
    State(state): State<AppState>,
    Path((event_id, agenda_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.attach_agenda(event_id, agenda_id).await?;
    Ok(Json(event))
}

/// DELETE /v1/events/{event_id}/agenda/{agenda_id} - Detach an agenda reference
#[utoipa::path(
    delete,
    path = "/v1/events/{event_id}/agenda/{agenda_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("agenda_id" = Uuid, Path, description = "Agenda item ID")
    ),
    responses(
        (status = 200, description = "Reference detached", body = Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn detach_agenda(
    State(state): State<AppState>,
    Path((event_id, agenda_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.detach_agenda(event_id, agenda_id).await?;
    Ok(Json(event))
}

struct UploadedImage {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

/// Drain the multipart stream into text fields plus the image part.
async fn collect_event_form(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<UploadedImage>), ApiError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("unreadable image part: {e}")))?
                .to_vec();
            if !data.is_empty() {
                image = Some(UploadedImage {
                    filename,
                    content_type,
                    data,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("unreadable field {name}: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, image))
}

/// Build the draft from collected form fields; absent fields stay empty
/// and fall through to the validator's required checks.
fn draft_from_fields(
    fields: HashMap<String, String>,
    image_url: String,
) -> Result<EventDraft, ApiError> {
    let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
    // Both nested and flat time keys are accepted from form encoders.
    let time = |nested: &str, flat: &str| {
        fields
            .get(nested)
            .or_else(|| fields.get(flat))
            .cloned()
            .unwrap_or_default()
    };

    Ok(EventDraft {
        slug: fields.get("slug").map(|s| s.to_string()).filter(|s| !s.trim().is_empty()),
        title: get("title"),
        hook: get("hook"),
        image: image_url,
        overview: get("overview"),
        date: get("date"),
        time_from: time("time.from", "time_from"),
        time_to: time("time.to", "time_to"),
        venue: get("venue"),
        mode: get("mode"),
        about: get("about"),
        audience: parse_id_list(fields.get("audience"))?,
        agenda: parse_id_list(fields.get("agenda"))?,
    })
}

/// Comma-separated identifier list from a form value.
fn parse_id_list(raw: Option<&String>) -> Result<Vec<Uuid>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s)
                .map_err(|_| ApiError::BadRequest(format!("invalid reference id: {s}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_parses_and_preserves_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let raw = format!("{a}, {b},");
        let ids = parse_id_list(Some(&raw)).unwrap();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn empty_and_missing_id_lists_are_empty() {
        assert!(parse_id_list(None).unwrap().is_empty());
        assert!(parse_id_list(Some(&"".to_string())).unwrap().is_empty());
    }

    #[test]
    fn bad_id_is_a_bad_request() {
        let err = parse_id_list(Some(&"not-a-uuid".to_string())).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn draft_takes_image_url_from_upload_not_form() {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "Rust Meetup".to_string());
        fields.insert("image".to_string(), "ignored".to_string());
        fields.insert("time.from".to_string(), "18:00".to_string());
        let draft =
            draft_from_fields(fields, "https://img.example.com/1.png".to_string()).unwrap();
        assert_eq!(draft.image, "https://img.example.com/1.png");
        assert_eq!(draft.time_from, "18:00");
        assert_eq!(draft.title, "Rust Meetup");
        assert!(draft.slug.is_none());
    }

    #[test]
    fn flat_time_keys_are_accepted() {
        let mut fields = HashMap::new();
        fields.insert("time_from".to_string(), "09:00".to_string());
        fields.insert("time_to".to_string(), "17:00".to_string());
        let draft = draft_from_fields(fields, String::new()).unwrap();
        assert_eq!(draft.time_from, "09:00");
        assert_eq!(draft.time_to, "17:00");
    }
}
