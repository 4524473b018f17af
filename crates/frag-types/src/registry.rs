//! Supported content types and the conversion-closure table.
//!
//! The table below is the single source of truth for which types the store
//! accepts and which representations each type can be served as. Conversion
//! capability is a product decision, kept here as auditable data — the
//! engine in `frag-convert` implements the routines, this table declares
//! what is allowed. A type with no row is unsupported.

use crate::media::MediaType;

/// The mutually-convertible image family.
pub const IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/avif",
    "image/gif",
];

/// Returns `true` if the store accepts fragments of this content type.
///
/// Parameters such as charset are ignored: `text/plain; charset=utf-8`
/// is supported because `text/plain` has a registry row.
pub fn is_supported_type(raw: &str) -> bool {
    match MediaType::parse(raw) {
        Ok(media) => !conversion_closure(&media).is_empty(),
        Err(_) => false,
    }
}

/// The representations a fragment of the given type can be served as.
///
/// Every row includes the type itself. Types without a row yield an empty
/// slice and are thereby unsupported.
pub fn conversion_closure(media: &MediaType) -> &'static [&'static str] {
    match media.as_str() {
        "text/plain" => &["text/plain"],
        "text/markdown" => &["text/markdown", "text/html", "text/plain"],
        "text/html" => &["text/html", "text/plain"],
        "text/csv" => &["text/csv", "text/plain", "application/json"],
        "application/json" => &["application/json", "application/yaml", "text/plain"],
        "application/yaml" => &["application/yaml", "application/json", "text/plain"],
        "image/png" | "image/jpeg" | "image/webp" | "image/avif" | "image/gif" => IMAGE_TYPES,
        _ => &[],
    }
}
