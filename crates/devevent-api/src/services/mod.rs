// Services layer for business logic
// Services validate drafts via devevent-core, acquire the shared
// connection, and map storage rows and errors to public DTOs.

pub mod agenda;
pub mod audience;
pub mod booking;
pub mod event;

pub use agenda::AgendaService;
pub use audience::AudienceService;
pub use booking::BookingService;
pub use event::EventService;
