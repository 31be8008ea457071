//! Error types for geolog-core.

use thiserror::Error;

/// Result type alias using geolog-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for geolog operations
#[derive(Error, Debug)]
pub enum Error {
    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database not found. Set GEOLOG_DATABASE_PATH or run from a directory containing geolog.db.")]
    DatabaseNotFound,

    #[error("Database lock poisoned")]
    LockPoisoned,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
