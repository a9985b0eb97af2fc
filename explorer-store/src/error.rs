//! Error types for the key/value layer.

use thiserror::Error;

/// Result type for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a key/value backend can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous holder of the backend lock panicked.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Backend refused the write (quota, read-only media).
    #[error("write rejected: {0}")]
    Rejected(String),
}
