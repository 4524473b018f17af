use std::sync::Arc;

use bytes::Bytes;
use frag_convert::Converted;
use frag_store::{FragmentBackend, MemoryBackend};
use frag_types::Fragment;
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};

/// Result of a listing: identifiers only, or full records.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentListing {
    Ids(Vec<String>),
    Expanded(Vec<Fragment>),
}

impl FragmentListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Expanded(fragments) => fragments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Façade owning the fragment lifecycle end to end.
///
/// Every operation is a single async unit of work: the two-phase writes
/// (metadata then payload) are awaited sequentially, so within one
/// fragment's lifecycle a concurrent reader never observes a payload whose
/// metadata has not landed. Concurrent writers to the same fragment id are
/// not serialized here — last writer wins, per the store's overwrite
/// semantics.
pub struct FragmentService {
    backend: Arc<dyn FragmentBackend>,
}

impl FragmentService {
    /// Service over the given backend. The choice is made once, here — not
    /// per call.
    pub fn new(backend: Arc<dyn FragmentBackend>) -> Self {
        Self { backend }
    }

    /// Service over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Create a fragment for `owner_id` with the declared content type.
    ///
    /// The type is validated against the registry; identity and timestamps
    /// are assigned; the metadata record is persisted. The payload is
    /// written separately via [`set_payload`](Self::set_payload).
    pub async fn create(&self, owner_id: &str, content_type: &str) -> ServiceResult<Fragment> {
        let fragment = Fragment::new(owner_id, content_type)?;
        self.backend.write_metadata(&fragment).await?;
        info!(
            owner = %fragment.owner_id,
            id = %fragment.id,
            content_type = %fragment.content_type,
            "fragment created"
        );
        Ok(fragment)
    }

    /// Replace the fragment's payload.
    ///
    /// Size and `updated` are refreshed and the metadata record persisted
    /// before the payload itself, so a reader never observes a size
    /// inconsistent with a data length it can actually read.
    pub async fn set_payload(&self, fragment: &mut Fragment, data: Bytes) -> ServiceResult<()> {
        fragment.size = data.len() as u64;
        fragment.touch();

        let id = fragment.id.to_string();
        self.backend.write_metadata(fragment).await?;
        self.backend
            .write_data(&fragment.owner_id, &id, data)
            .await?;
        debug!(owner = %fragment.owner_id, id = %id, size = fragment.size, "payload updated");
        Ok(())
    }

    /// The fragment's metadata, or `None` — absence is a normal outcome the
    /// boundary maps to a status code, not an error.
    pub async fn fetch_by_id(&self, owner_id: &str, id: &str) -> ServiceResult<Option<Fragment>> {
        Ok(self.backend.read_metadata(owner_id, id).await?)
    }

    /// The fragment's payload as stored.
    ///
    /// A just-deleted or never-written payload surfaces as
    /// [`ServiceError::NotFound`].
    pub async fn fetch_payload(&self, fragment: &Fragment) -> ServiceResult<Bytes> {
        let id = fragment.id.to_string();
        self.backend
            .read_data(&fragment.owner_id, &id)
            .await
            .map_err(|e| ServiceError::from_store(e, &fragment.owner_id, &id))
    }

    /// The fragment's payload served as `target` (an extension or content
    /// type).
    ///
    /// `Ok(None)` means the conversion is unavailable — the one branch the
    /// boundary needs for content negotiation.
    pub async fn fetch_as(
        &self,
        fragment: &Fragment,
        target: &str,
    ) -> ServiceResult<Option<Converted>> {
        let payload = self.fetch_payload(fragment).await?;
        Ok(frag_convert::convert(fragment, &payload, target))
    }

    /// Every fragment belonging to `owner_id`, as ids or full records.
    ///
    /// An owner with no fragments yields an empty listing, never an error.
    pub async fn list_by_owner(
        &self,
        owner_id: &str,
        expand: bool,
    ) -> ServiceResult<FragmentListing> {
        let fragments = self.backend.list_metadata(owner_id).await?;
        let listing = if expand {
            FragmentListing::Expanded(fragments)
        } else {
            FragmentListing::Ids(fragments.iter().map(|f| f.id.to_string()).collect())
        };
        Ok(listing)
    }

    /// Remove the fragment's metadata and payload.
    ///
    /// Fails with [`ServiceError::NotFound`] if nothing existed to delete —
    /// deleting nothing is a caller bug, not a no-op.
    pub async fn delete(&self, owner_id: &str, id: &str) -> ServiceResult<()> {
        self.backend
            .delete_all(owner_id, id)
            .await
            .map_err(|e| ServiceError::from_store(e, owner_id, id))?;
        info!(owner = %owner_id, id = %id, "fragment deleted");
        Ok(())
    }
}
