// Postgres storage layer with sqlx
//
// This crate provides the repository methods for the four record
// collections plus the process-wide connection cache shared by all
// request handlers.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{
    ConnectError, ConnectionCache, Connector, PgConnectionCache, PgConnector,
};
pub use error::StorageError;
pub use models::*;
pub use repositories::Database;
