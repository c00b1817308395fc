use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The letters table exists but is missing expected columns.
    ///
    /// Kept distinct from the empty-store case: an empty log is a valid
    /// initial state, a mis-shaped one is not and must not be read as
    /// "no letters yet".
    #[error("Malformed letters table: missing column `{0}`")]
    MalformedSchema(String),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored timestamp did not match the `YYYY-MM-DD HH:MM` format.
    #[error("Timestamp parse error: {0}")]
    TimestampParse(#[from] chrono::ParseError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
