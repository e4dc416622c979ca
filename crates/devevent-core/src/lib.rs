// Validation and schema layer for DevEvent entities
//
// Everything in this crate is pure: entity drafts go in, normalized
// inserts come out, and the first failing rule for each field produces a
// field-scoped error with a fixed message. No I/O happens here.

pub mod agenda;
pub mod audience;
pub mod booking;
pub mod event;
pub mod patterns;
pub mod rules;
pub mod slug;

pub use agenda::{AgendaDraft, NewAgenda};
pub use audience::{AudienceDraft, NewAudience};
pub use booking::{BookingDraft, NewBooking};
pub use event::{EventDraft, EventUpdate, EventUpdateDraft, NewEvent};
pub use rules::{FieldError, ValidationError};
pub use slug::slugify;
