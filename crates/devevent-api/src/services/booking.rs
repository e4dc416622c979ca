// Booking service
//
// The unique (event, email) index is the final arbiter when two requests
// race to book the same spot; the duplicate surfaces as an ordinary
// 400-class error and is never retried here.

use std::sync::Arc;

use devevent_contracts::{Booking, BookingStatus, CreateBookingRequest};
use devevent_core::BookingDraft;
use devevent_storage::{BookingRow, CreateBookingRow, PgConnectionCache};

use crate::error::ApiError;

pub struct BookingService {
    cache: Arc<PgConnectionCache>,
}

impl BookingService {
    pub fn new(cache: Arc<PgConnectionCache>) -> Self {
        Self { cache }
    }

    pub async fn create(&self, req: CreateBookingRequest) -> Result<Booking, ApiError> {
        let booking = BookingDraft {
            event: req.event,
            email: req.email,
        }
        .validate()?;

        let db = self.cache.acquire().await?;
        if db.get_event(booking.event).await?.is_none() {
            return Err(ApiError::BadRequest(
                "Referenced event does not exist".to_string(),
            ));
        }

        let row = db
            .create_booking(CreateBookingRow {
                event_id: booking.event,
                email: booking.email,
                status: booking.status,
            })
            .await?;
        Ok(row_to_booking(row))
    }

    pub async fn list(&self, email: Option<String>) -> Result<Vec<Booking>, ApiError> {
        let db = self.cache.acquire().await?;
        let rows = match email {
            // Lookups go through the normalized form bookings are stored in.
            Some(email) => db.list_bookings_by_email(&email.trim().to_lowercase()).await?,
            None => db.list_bookings().await?,
        };
        Ok(rows.into_iter().map(row_to_booking).collect())
    }
}

fn row_to_booking(row: BookingRow) -> Booking {
    Booking {
        id: row.id,
        event: row.event_id,
        email: row.email,
        status: BookingStatus::from(row.status.as_str()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
