use thiserror::Error;

/// Validation errors raised when constructing fragments or parsing types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The declared content type is outside the supported-type registry.
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    /// The value could not be parsed as a media type at all.
    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    /// Fragments must belong to a named owner.
    #[error("owner id must be a non-empty string")]
    EmptyOwner,
}
