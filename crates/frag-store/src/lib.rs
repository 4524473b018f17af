//! Persistence layer for the fragment content store.
//!
//! Fragment persistence is split in two: a metadata record (the
//! [`Fragment`](frag_types::Fragment) entity) and an opaque payload, both
//! keyed by `(owner_id, id)`. The [`FragmentBackend`] contract abstracts
//! over where that data physically lives, so the service layer is
//! backend-agnostic.
//!
//! # Backends
//!
//! - [`MemoryBackend`] — two [`MemoryDb`] instances (metadata + payload);
//!   for tests, local mode, and embedding
//! - [`RemoteBackend`] — payloads in a remote object store through the
//!   [`ObjectClient`] trait; metadata in a local [`MemoryDb`] until a
//!   structured metadata store exists
//!
//! # Design Rules
//!
//! 1. Every operation is scoped by `(owner_id, id)`; owners never see each
//!    other's fragments.
//! 2. Metadata is written before payload, so a reader never observes a
//!    payload without its record.
//! 3. Absence on read is a normal result, not a fault; deleting a key that
//!    holds nothing is an error.
//! 4. Transport failures surface as [`StoreError::Unavailable`] and are
//!    never retried inside this layer.
//! 5. No locking discipline beyond key-level overwrite: last writer wins.

pub mod error;
pub mod kv;
pub mod memory;
pub mod remote;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use kv::MemoryDb;
pub use memory::MemoryBackend;
pub use remote::{ObjectClient, RemoteBackend, RemoteConfig, TransportError};
pub use traits::FragmentBackend;
