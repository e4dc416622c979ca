// Storage error type
//
// Unique-index violations are the database's final arbitration for racing
// creates (slug, (event, email)); callers must be able to tell them apart
// from infrastructure failures, so SQLSTATE 23505 gets its own variant.

use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("duplicate key on constraint {constraint}")]
    DuplicateKey { constraint: String },

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StorageError::DuplicateKey {
                    constraint: db.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        StorageError::Database(e)
    }
}

impl StorageError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StorageError::DuplicateKey { .. })
    }
}
