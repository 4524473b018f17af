use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::media::MediaType;
use crate::registry;

/// Unique identifier for a fragment (UUID v7 for time-ordering).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId(uuid::Uuid);

impl FragmentId {
    /// Generate a new time-ordered fragment ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for FragmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FragmentId({})", self.short_id())
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored content item owned by a single principal.
///
/// This is the metadata record only; the payload lives in the backend under
/// the same `(owner_id, id)` key. `size` always equals the length of the
/// payload currently stored — it is recomputed on every payload write.
///
/// `id`, `owner_id`, and the declared type are immutable after creation.
/// `updated` is refreshed on every metadata or payload write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: FragmentId,
    pub owner_id: String,
    /// The declared content type as given at creation, parameters included.
    pub content_type: String,
    /// Parsed `type/subtype` with parameters stripped.
    pub media_type: MediaType,
    /// Byte count of the current payload.
    pub size: u64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Fragment {
    /// Construct a new fragment for `owner_id` with the declared type.
    ///
    /// The type must pass the registry's supported-type gate; unsupported
    /// types fail with [`TypeError::UnsupportedType`], unparseable ones with
    /// [`TypeError::InvalidMediaType`]. Identity and timestamps are assigned
    /// here; size starts at zero until a payload is written.
    pub fn new(owner_id: impl Into<String>, content_type: &str) -> Result<Self, TypeError> {
        let owner_id = owner_id.into();
        if owner_id.is_empty() {
            return Err(TypeError::EmptyOwner);
        }

        let media_type = MediaType::parse(content_type)?;
        if registry::conversion_closure(&media_type).is_empty() {
            return Err(TypeError::UnsupportedType(content_type.to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: FragmentId::new(),
            owner_id,
            content_type: content_type.trim().to_string(),
            media_type,
            size: 0,
            created: now,
            updated: now,
        })
    }

    /// The representations this fragment can be served as.
    pub fn formats(&self) -> &'static [&'static str] {
        registry::conversion_closure(&self.media_type)
    }

    /// Returns `true` if the declared type is in the `text/` family.
    pub fn is_text(&self) -> bool {
        self.media_type.is_text()
    }

    /// Refresh the `updated` timestamp.
    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }
}
