// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Event models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub hook: String,
    pub image: String,
    pub overview: String,
    pub date: DateTime<Utc>,
    pub time_from: String,
    pub time_to: String,
    pub venue: String,
    pub mode: String,
    pub about: String,
    pub audience: Vec<Uuid>,
    pub agenda: Vec<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub slug: String,
    pub title: String,
    pub hook: String,
    pub image: String,
    pub overview: String,
    pub date: DateTime<Utc>,
    pub time_from: String,
    pub time_to: String,
    pub venue: String,
    pub mode: String,
    pub about: String,
    pub audience: Vec<Uuid>,
    pub agenda: Vec<Uuid>,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEventRow {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub hook: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub venue: Option<String>,
    pub mode: Option<String>,
    pub about: Option<String>,
    pub status: Option<String>,
}

// ============================================
// Agenda models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AgendaRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub time_from: String,
    pub time_to: String,
    pub speaker: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAgendaRow {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub time_from: String,
    pub time_to: String,
    pub speaker: Option<String>,
    pub location: Option<String>,
}

// ============================================
// Audience models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AudienceRow {
    pub id: Uuid,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CreateAudienceRow {
    pub category: String,
    pub description: String,
}

// ============================================
// Booking models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateBookingRow {
    pub event_id: Uuid,
    pub email: String,
    pub status: String,
}
