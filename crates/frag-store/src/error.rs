use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Malformed owner/fragment key passed to the store layer. Always a
    /// caller bug, never retried.
    #[error("invalid {part} key: must be a non-empty string")]
    InvalidKey { part: &'static str },

    /// No entry under the given key. A normal outcome for reads, an
    /// explicit error for deletes.
    #[error("no entry for key {primary}/{secondary}")]
    NotFound { primary: String, secondary: String },

    /// The persistence layer could not be reached. Propagated unchanged;
    /// retry policy belongs to the caller.
    #[error("backend unavailable during {op} for {primary}/{secondary}: {reason}")]
    Unavailable {
        op: &'static str,
        primary: String,
        secondary: String,
        reason: String,
    },
}

impl StoreError {
    /// Returns `true` for the not-found case, which callers routinely map
    /// to a domain-level absence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
