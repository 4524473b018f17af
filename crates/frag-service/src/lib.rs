//! Fragment lifecycle façade.
//!
//! [`FragmentService`] combines the backend contract (persistence), the
//! type registry (validation), and the conversion engine (representation
//! negotiation) behind one API: create, set_payload, fetch_by_id,
//! fetch_payload, fetch_as, list_by_owner, delete.
//!
//! The backend is chosen once at construction — any
//! [`FragmentBackend`](frag_store::FragmentBackend) implementation can be
//! substituted without touching service logic. Callers pass plain owner
//! identifiers and raw byte payloads; no protocol framing is defined here.

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{FragmentListing, FragmentService};

// Re-export key types for ergonomic imports.
pub use frag_convert::Converted;
pub use frag_store::{FragmentBackend, MemoryBackend, RemoteBackend, RemoteConfig};
pub use frag_types::{Fragment, FragmentId, MediaType};
