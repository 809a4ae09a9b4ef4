use thiserror::Error;

/// Contract errors surfaced by the lead repository and service layer.
///
/// `Validation`, `NotFound`, `InvalidState` and `Forbidden` are part of the
/// caller-facing contract; `Database` and `Internal` wrap infrastructure
/// failures (SQLite, worker-channel plumbing, datetime parsing).
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing required input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Operation attempted from a disallowed lead status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The calling actor is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
