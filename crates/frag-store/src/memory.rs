use async_trait::async_trait;
use bytes::Bytes;
use frag_types::Fragment;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::MemoryDb;
use crate::traits::FragmentBackend;

/// Local backend: two in-memory [`MemoryDb`] instances, one for metadata
/// and one for payloads.
///
/// Calls resolve immediately; the async surface exists only to satisfy the
/// backend contract. Intended for tests, local mode, and embedding.
pub struct MemoryBackend {
    metadata: MemoryDb<Fragment>,
    data: MemoryDb<Bytes>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            metadata: MemoryDb::new(),
            data: MemoryDb::new(),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("metadata_count", &self.metadata.len())
            .field("data_count", &self.data.len())
            .finish()
    }
}

#[async_trait]
impl FragmentBackend for MemoryBackend {
    async fn write_metadata(&self, fragment: &Fragment) -> StoreResult<()> {
        let id = fragment.id.to_string();
        self.metadata
            .put(&fragment.owner_id, &id, fragment.clone())?;
        debug!(owner = %fragment.owner_id, id = %id, "fragment metadata written");
        Ok(())
    }

    async fn read_metadata(&self, owner_id: &str, id: &str) -> StoreResult<Option<Fragment>> {
        self.metadata.get(owner_id, id)
    }

    async fn write_data(&self, owner_id: &str, id: &str, data: Bytes) -> StoreResult<()> {
        let len = data.len();
        self.data.put(owner_id, id, data)?;
        debug!(owner = %owner_id, id = %id, len, "fragment data written");
        Ok(())
    }

    async fn read_data(&self, owner_id: &str, id: &str) -> StoreResult<Bytes> {
        self.data
            .get(owner_id, id)?
            .ok_or_else(|| StoreError::NotFound {
                primary: owner_id.to_string(),
                secondary: id.to_string(),
            })
    }

    async fn list_metadata(&self, owner_id: &str) -> StoreResult<Vec<Fragment>> {
        self.metadata.query(owner_id)
    }

    async fn delete_all(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        // Metadata presence defines fragment existence.
        if self.metadata.get(owner_id, id)?.is_none() {
            return Err(StoreError::NotFound {
                primary: owner_id.to_string(),
                secondary: id.to_string(),
            });
        }

        // Payload first; a payload that was never written is not an error.
        match self.data.delete(owner_id, id) {
            Ok(()) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        self.metadata.delete(owner_id, id)?;
        debug!(owner = %owner_id, id = %id, "fragment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(owner: &str) -> Fragment {
        Fragment::new(owner, "text/plain").unwrap()
    }

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn write_and_read_metadata() {
        let backend = MemoryBackend::new();
        let frag = fragment("owner-a");
        backend.write_metadata(&frag).await.unwrap();

        let read_back = backend
            .read_metadata("owner-a", &frag.id.to_string())
            .await
            .unwrap()
            .expect("should exist");
        assert_eq!(read_back, frag);
    }

    #[tokio::test]
    async fn read_missing_metadata_is_none() {
        let backend = MemoryBackend::new();
        assert!(backend
            .read_metadata("owner-a", "no-such-id")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn metadata_is_scoped_by_owner() {
        let backend = MemoryBackend::new();
        let frag = fragment("owner-a");
        backend.write_metadata(&frag).await.unwrap();

        assert!(backend
            .read_metadata("owner-b", &frag.id.to_string())
            .await
            .unwrap()
            .is_none());
    }

    // -----------------------------------------------------------------------
    // Payload
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn write_and_read_data() {
        let backend = MemoryBackend::new();
        backend
            .write_data("owner-a", "id-1", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        let data = backend.read_data("owner-a", "id-1").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn read_missing_data_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.read_data("owner-a", "id-1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let backend = MemoryBackend::new();
        let first = fragment("owner-a");
        let second = fragment("owner-a");
        backend.write_metadata(&first).await.unwrap();
        backend.write_metadata(&second).await.unwrap();

        let listed = backend.list_metadata("owner-a").await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn list_for_unknown_owner_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.list_metadata("nobody").await.unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_metadata_and_data() {
        let backend = MemoryBackend::new();
        let frag = fragment("owner-a");
        let id = frag.id.to_string();
        backend.write_metadata(&frag).await.unwrap();
        backend
            .write_data("owner-a", &id, Bytes::from_static(b"payload"))
            .await
            .unwrap();

        backend.delete_all("owner-a", &id).await.unwrap();
        assert!(backend.read_metadata("owner-a", &id).await.unwrap().is_none());
        assert!(backend.read_data("owner-a", &id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_without_payload_succeeds() {
        let backend = MemoryBackend::new();
        let frag = fragment("owner-a");
        let id = frag.id.to_string();
        backend.write_metadata(&frag).await.unwrap();

        backend.delete_all("owner-a", &id).await.unwrap();
        assert!(backend.read_metadata("owner-a", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.delete_all("owner-a", "no-such-id").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
