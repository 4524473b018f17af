use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A parsed media type: `type/subtype` with parameters stripped.
///
/// `MediaType` is what the registry and the conversion engine key on. The
/// declared content type on a [`Fragment`](crate::Fragment) may carry
/// parameters (`text/plain; charset=utf-8`); this type never does.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(String);

impl MediaType {
    /// Parse a content-type value, discarding any parameters.
    ///
    /// `"text/plain; charset=utf-8"` parses to `text/plain`. Values that are
    /// not a `type/subtype` pair fail with [`TypeError::InvalidMediaType`].
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let mime: mime::Mime = raw
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidMediaType(raw.to_string()))?;
        Ok(Self(mime.essence_str().to_string()))
    }

    /// The `type/subtype` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the `text/` family.
    pub fn is_text(&self) -> bool {
        self.0.starts_with("text/")
    }

    /// Returns `true` for the `image/` family.
    pub fn is_image(&self) -> bool {
        self.0.starts_with("image/")
    }
}

impl fmt::Debug for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaType({})", self.0)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MediaType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
