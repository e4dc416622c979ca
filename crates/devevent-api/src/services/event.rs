// Event service: validation, persistence, reference resolution

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use devevent_contracts::{
    Agenda, Audience, Event, EventMode, EventStatus, TimeRange, UpdateEventRequest,
};
use devevent_core::{EventDraft, EventUpdateDraft};
use devevent_storage::{
    AgendaRow, AudienceRow, CreateEventRow, EventRow, PgConnectionCache, UpdateEventRow,
};

use crate::error::ApiError;

pub struct EventService {
    cache: Arc<PgConnectionCache>,
}

impl EventService {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self { cache }
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event, ApiError> {
        let new_event = draft.validate(Utc::now())?;
        let db = self.cache.acquire().await?;
        let row = db
            .create_event(CreateEventRow {
                slug: new_event.slug,
                title: new_event.title,
                hook: new_event.hook,
                image: new_event.image,
                overview: new_event.overview,
                date: new_event.date,
                time_from: new_event.time_from,
                time_to: new_event.time_to,
                venue: new_event.venue,
                mode: new_event.mode,
                about: new_event.about,
                audience: new_event.audience,
                agenda: new_event.agenda,
                status: new_event.status,
            })
            .await?;
        Ok(row_to_event(row))
    }

    pub async fn list(&self) -> Result<Vec<Event>, ApiError> {
        let db = self.cache.acquire().await?;
        let rows = db.list_events().await?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db.get_event(id).await?.ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db.get_event_by_slug(slug).await?.ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn update(&self, id: Uuid, req: UpdateEventRequest) -> Result<Event, ApiError> {
        let (time_from, time_to) = match req.time {
            Some(t) => (Some(t.from), Some(t.to)),
            None => (None, None),
        };
        let update = EventUpdateDraft {
            slug: req.slug,
            title: req.title,
            hook: req.hook,
            image: req.image,
            overview: req.overview,
            date: req.date,
            time_from,
            time_to,
            venue: req.venue,
            mode: req.mode,
            about: req.about,
            status: req.status,
        }
        .validate(Utc::now())?;

        let db = self.cache.acquire().await?;
        let row = db
            .update_event(
                id,
                UpdateEventRow {
                    slug: update.slug,
                    title: update.title,
                    hook: update.hook,
                    image: update.image,
                    overview: update.overview,
                    date: update.date,
                    time_from: update.time_from,
                    time_to: update.time_to,
                    venue: update.venue,
                    mode: update.mode,
                    about: update.about,
                    status: update.status,
                },
            )
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn attach_audience(
        &self,
        event_id: Uuid,
        audience_id: Uuid,
    ) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db
            .attach_audience_ref(event_id, audience_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn detach_audience(
        &self,
        event_id: Uuid,
        audience_id: Uuid,
    ) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db
            .detach_audience_ref(event_id, audience_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn attach_agenda(
        &self,
        event_id: Uuid,
        agenda_id: Uuid,
    ) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db
            .attach_agenda_ref(event_id, agenda_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    pub async fn detach_agenda(
        &self,
        event_id: Uuid,
        agenda_id: Uuid,
    ) -> Result<Event, ApiError> {
        let db = self.cache.acquire().await?;
        let row = db
            .detach_agenda_ref(event_id, agenda_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        Ok(row_to_event(row))
    }

    /// Resolve the event's agenda references in listed order; dangling
    /// identifiers are skipped rather than failing the request.
    pub async fn agenda(&self, event_id: Uuid) -> Result<Vec<Agenda>, ApiError> {
        let db = self.cache.acquire().await?;
        let event = db.get_event(event_id).await?.ok_or(ApiError::NotFound)?;
        let rows = db.list_agenda_by_ids(&event.agenda).await?;
        Ok(rows.into_iter().map(row_to_agenda).collect())
    }

    /// Resolve the event's audience references, same tolerance as
    /// [`EventService::agenda`].
    pub async fn audiences(&self, event_id: Uuid) -> Result<Vec<Audience>, ApiError> {
        let db = self.cache.acquire().await?;
        let event = db.get_event(event_id).await?.ok_or(ApiError::NotFound)?;
        let rows = db.list_audiences_by_ids(&event.audience).await?;
        Ok(rows.into_iter().map(row_to_audience).collect())
    }
}

pub(crate) fn row_to_event(row: EventRow) -> Event {
    Event {
        id: row.id,
        slug: row.slug,
        title: row.title,
        hook: row.hook,
        image: row.image,
        overview: row.overview,
        date: row.date,
        time: TimeRange {
            from: row.time_from,
            to: row.time_to,
        },
        venue: row.venue,
        mode: EventMode::from(row.mode.as_str()),
        about: row.about,
        audience: row.audience,
        agenda: row.agenda,
        status: EventStatus::from(row.status.as_str()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub(crate) fn row_to_agenda(row: AgendaRow) -> Agenda {
    Agenda {
        id: row.id,
        event: row.event_id,
        title: row.title,
        description: row.description,
        time: TimeRange {
            from: row.time_from,
            to: row.time_to,
        },
        speaker: row.speaker,
        location: row.location,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub(crate) fn row_to_audience(row: AudienceRow) -> Audience {
    Audience {
        id: row.id,
        category: row.category,
        description: row.description,
    }
}
