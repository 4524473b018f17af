//! Representation negotiation for stored fragments.
//!
//! Given a fragment's declared type, its raw payload, and a requested
//! target (an extension such as `md` or a literal content type), the engine
//! decides convertibility against the registry's closure table and produces
//! transcoded bytes.
//!
//! "Cannot convert" is a first-class expected outcome of content
//! negotiation, not an error: [`convert`] returns `Option<Converted>`, and
//! `None` covers both pairs outside the table and transcoders that failed
//! on a malformed payload. Callers get one branch to handle.
//!
//! Dispatch is a table lookup from `(source, target)` to a transcoder
//! variant, so pairs the registry declares without a routine behind them
//! (the avif encoder) are an explicit, testable gap rather than a silent
//! fallthrough.

pub mod engine;
pub mod extension;
mod transcode;

pub use engine::{convert, Converted};
pub use extension::resolve_target;
