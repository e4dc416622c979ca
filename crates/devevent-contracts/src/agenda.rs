// Agenda item DTOs (scheduled segments belonging to one event)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::TimeRange;

/// One scheduled segment of an event's program
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Agenda {
    pub id: Uuid,
    /// The owning event, referenced by identifier.
    pub event: Uuid,
    pub title: String,
    pub description: String,
    pub time: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create an agenda item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAgendaRequest {
    pub event: Uuid,
    pub title: String,
    pub description: String,
    pub time: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
