use frag_store::StoreError;
use frag_types::TypeError;
use thiserror::Error;

/// Errors surfaced by the fragment service façade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested fragment does not exist for this owner.
    #[error("fragment not found: owner={owner} id={id}")]
    NotFound { owner: String, id: String },

    /// Validation failure constructing a fragment or parsing its type.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Persistence failure, propagated unchanged — the service performs no
    /// retries.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Map a store-level not-found onto the domain error with owner/id
    /// context; everything else passes through.
    pub(crate) fn from_store(err: StoreError, owner: &str, id: &str) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                owner: owner.to_string(),
                id: id.to_string(),
            }
        } else {
            Self::Store(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
