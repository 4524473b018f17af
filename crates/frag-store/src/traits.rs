use async_trait::async_trait;
use bytes::Bytes;
use frag_types::Fragment;

use crate::error::StoreResult;

/// Persistence boundary for fragment metadata and payloads.
///
/// All implementations must satisfy these invariants:
/// - Every operation is scoped by `(owner_id, id)`; no fragment is ever
///   visible to a different owner.
/// - Metadata and payload are logically disjoint namespaces under the same
///   key. A metadata record may exist with no payload yet written; a payload
///   never exists without a metadata record.
/// - `read_metadata` returns `Ok(None)` for a missing record. `read_data`
///   for a missing payload returns `Err(StoreError::NotFound)` — an explicit
///   typed signal the service maps to a domain-level not-found, never a
///   generic fault.
/// - Transport failures surface as `StoreError::Unavailable` and are not
///   retried inside the contract; retry policy belongs to the caller.
///
/// Metadata and payload persistence are deliberately separate operations so
/// an adapter can place large binary payloads in a blob store while a
/// structured store holds metadata — the contract does not assume
/// colocation.
#[async_trait]
pub trait FragmentBackend: Send + Sync {
    /// Write (insert or overwrite) a fragment's metadata record.
    async fn write_metadata(&self, fragment: &Fragment) -> StoreResult<()>;

    /// Read a fragment's metadata record, or `None` if absent.
    async fn read_metadata(&self, owner_id: &str, id: &str) -> StoreResult<Option<Fragment>>;

    /// Write (insert or overwrite) a fragment's payload.
    async fn write_data(&self, owner_id: &str, id: &str, data: Bytes) -> StoreResult<()>;

    /// Read a fragment's payload.
    async fn read_data(&self, owner_id: &str, id: &str) -> StoreResult<Bytes>;

    /// All metadata records for `owner_id`, in insertion order. An owner
    /// with no fragments yields an empty vec.
    async fn list_metadata(&self, owner_id: &str) -> StoreResult<Vec<Fragment>>;

    /// Remove both metadata and payload for `(owner_id, id)`.
    ///
    /// Atomic from the caller's point of view: either both are gone
    /// afterwards, or the call fails before any state was lost. Fails with
    /// `StoreError::NotFound` if no metadata record exists; a record whose
    /// payload was never written deletes cleanly.
    async fn delete_all(&self, owner_id: &str, id: &str) -> StoreResult<()>;
}
