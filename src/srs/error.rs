use diesel::result::Error as DieselError;
use thiserror::Error;

/// Failures surfaced by the scheduling core and its stores.
#[derive(Error, Debug)]
pub enum SrsError {
    /// Requested schedule, card or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Rejected before any mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Stored rows reference each other inconsistently, e.g. a schedule without its card
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
    /// The row-level update could not take the write lock; safe to retry
    #[error("Concurrent update conflict")]
    ConcurrencyConflict,
    #[error("Database error: {0}")]
    Database(DieselError),
    #[error("Connection pool error: {0}")]
    Pool(String),
    /// An export could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SrsError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SrsError::ConcurrencyConflict)
    }
}

impl From<DieselError> for SrsError {
    fn from(err: DieselError) -> Self {
        match &err {
            DieselError::DatabaseError(_, info) if is_lock_contention(info.message()) => {
                SrsError::ConcurrencyConflict
            }
            _ => SrsError::Database(err),
        }
    }
}

impl From<r2d2::Error> for SrsError {
    fn from(err: r2d2::Error) -> Self {
        SrsError::Pool(err.to_string())
    }
}

// SQLITE_BUSY and SQLITE_LOCKED both surface through this message family.
fn is_lock_contention(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("database is busy")
}
