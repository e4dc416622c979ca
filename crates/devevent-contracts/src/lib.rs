// Public contracts for the DevEvent API
// This crate defines the DTOs and request types shared between the API
// surface and its clients.

pub mod agenda;
pub mod audience;
pub mod booking;
pub mod common;
pub mod event;

pub use agenda::*;
pub use audience::*;
pub use booking::*;
pub use common::*;
pub use event::*;
