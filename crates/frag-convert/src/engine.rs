use bytes::Bytes;
use frag_types::{Fragment, MediaType};
use tracing::{debug, warn};

use crate::extension::resolve_target;
use crate::transcode::transcoder_for;

/// A successfully negotiated representation.
#[derive(Clone, Debug, PartialEq)]
pub struct Converted {
    pub data: Bytes,
    pub content_type: MediaType,
}

/// Convert `payload` into the requested representation.
///
/// `target` may be a file extension (`md`, `.html`) or a content-type
/// string. The decision runs against the fragment's conversion closure:
///
/// 1. a target outside the closure refuses (`None`);
/// 2. the fragment's own type is an identity conversion — payload returned
///    unchanged;
/// 3. any other declared pair dispatches to its transcoder; a declared pair
///    with no routine behind it refuses;
/// 4. a transcoder failure (malformed payload, encoder error) also refuses.
///
/// `None` is a normal outcome of content negotiation, never a fault —
/// callers get a single "conversion unavailable" branch.
pub fn convert(fragment: &Fragment, payload: &[u8], target: &str) -> Option<Converted> {
    let resolved = resolve_target(target);

    if !fragment.formats().contains(&resolved.as_str()) {
        debug!(
            owner = %fragment.owner_id,
            id = %fragment.id,
            source = %fragment.media_type,
            target = %resolved,
            "target outside the fragment's conversion closure"
        );
        return None;
    }

    // Identity conversion is always legal and lossless.
    if fragment.media_type.as_str() == resolved {
        return Some(Converted {
            data: Bytes::copy_from_slice(payload),
            content_type: fragment.media_type.clone(),
        });
    }

    let Some(transcoder) = transcoder_for(fragment.media_type.as_str(), &resolved) else {
        warn!(
            source = %fragment.media_type,
            target = %resolved,
            "declared conversion pair has no transcoder"
        );
        return None;
    };

    match transcoder.run(payload) {
        Ok(data) => Some(Converted {
            data: Bytes::from(data),
            content_type: MediaType::parse(&resolved).ok()?,
        }),
        Err(e) => {
            warn!(
                owner = %fragment.owner_id,
                id = %fragment.id,
                source = %fragment.media_type,
                target = %resolved,
                error = %e,
                "transcoding failed"
            );
            None
        }
    }
}
