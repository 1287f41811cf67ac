use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file is missing, unreadable, or not a SQLite database.
    /// Fatal — nothing can proceed without a store.
    #[error("cannot open store at {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A row that must exist does not. Meetings always reference a live
    /// organizer, so hitting this means the store integrity is broken.
    #[error("participant not found: {id}")]
    ParticipantNotFound { id: i64 },

    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
