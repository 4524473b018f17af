use frag_types::MediaType;

/// Resolve a requested extension or content-type value to a canonical
/// `type/subtype` string.
///
/// Values containing a `/` are treated as a content type (parameters
/// stripped when they parse). Anything else is looked up as a file
/// extension; an unresolvable extension is returned literally, which the
/// closure check downstream will reject as unsupported.
pub fn resolve_target(target: &str) -> String {
    let target = target.trim();

    if target.contains('/') {
        return match MediaType::parse(target) {
            Ok(media) => media.as_str().to_string(),
            Err(_) => target.to_string(),
        };
    }

    let ext = target.trim_start_matches('.').to_ascii_lowercase();
    let mapped = match ext.as_str() {
        "txt" | "text" => Some("text/plain"),
        "md" | "markdown" => Some("text/markdown"),
        "html" | "htm" => Some("text/html"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        "yaml" | "yml" => Some("application/yaml"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "avif" => Some("image/avif"),
        "gif" => Some("image/gif"),
        _ => None,
    };

    match mapped {
        Some(media) => media.to_string(),
        None => ext,
    }
}
