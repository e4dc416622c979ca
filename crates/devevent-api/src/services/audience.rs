// Audience service

use std::sync::Arc;

use devevent_contracts::{Audience, CreateAudienceRequest};
use devevent_core::AudienceDraft;
use devevent_storage::{CreateAudienceRow, PgConnectionCache};

use crate::error::ApiError;
use crate::services::event::row_to_audience;

pub struct AudienceService {
    cache: Arc<PgConnectionCache>,
}

impl AudienceService {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self { cache }
    }

    pub async fn create(&self, req: CreateAudienceRequest) -> Result<Audience, ApiError> {
        let audience = AudienceDraft {
            category: req.category,
            description: req.description,
        }
        .validate()?;

        let db = self.cache.acquire().await?;
        let row = db
            .create_audience(CreateAudienceRow {
                category: audience.category,
                description: audience.description,
            })
            .await?;
        Ok(row_to_audience(row))
    }

    pub async fn list(&self) -> Result<Vec<Audience>, ApiError> {
        let db = self.cache.acquire().await?;
        let rows = db.list_audiences().await?;
        Ok(rows.into_iter().map(row_to_audience).collect())
    }
}
