use thiserror::Error;

/// Failures surfaced by store operations. Every variant is terminal for the
/// call; there is no retry path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("you must be logged in to do this")]
    Unauthenticated,
    #[error("you cannot delete this review")]
    Forbidden,
    #[error("you have already applied for this internship")]
    DuplicateApplication,
    #[error("internship already saved")]
    AlreadySaved,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}
