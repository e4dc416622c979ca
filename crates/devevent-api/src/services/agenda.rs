// Agenda service
//
// Creating an item also appends its identifier to the owning event's
// ordered agenda array, so the event's reference collection tracks
// insertion order.

use std::sync::Arc;

use devevent_contracts::{Agenda, CreateAgendaRequest};
use devevent_core::AgendaDraft;
use devevent_storage::{CreateAgendaRow, PgConnectionCache};

use crate::error::ApiError;
use crate::services::event::row_to_agenda;

pub struct AgendaService {
    cache: Arc<PgConnectionCache>,
}

impl AgendaService {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self { cache }
    }

    pub async fn create(&self, req: CreateAgendaRequest) -> Result<Agenda, ApiError> {
        let item = AgendaDraft {
            event: req.event,
            title: req.title,
            description: req.description,
            time_from: req.time.from,
            time_to: req.time.to,
            speaker: req.speaker,
            location: req.location,
        }
        .validate()?;

        let db = self.cache.acquire().await?;
        if db.get_event(item.event).await?.is_none() {
            return Err(ApiError::BadRequest(
                "Referenced event does not exist".to_string(),
            ));
        }

        let row = db
            .create_agenda(CreateAgendaRow {
                event_id: item.event,
                title: item.title,
                description: item.description,
                time_from: item.time_from,
                time_to: item.time_to,
                speaker: item.speaker,
                location: item.location,
            })
            .await?;
        db.attach_agenda_ref(row.event_id, row.id).await?;
        Ok(row_to_agenda(row))
    }
}
