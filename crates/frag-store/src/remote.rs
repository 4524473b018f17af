//! Remote object-storage adapter.
//!
//! Payloads go to a remote blob store through the [`ObjectClient`] trait;
//! metadata stays in a local [`MemoryDb`] until a structured metadata store
//! exists. Concrete service wiring (credentials, SDK clients) lives outside
//! this crate — implement [`ObjectClient`] over the SDK of choice and hand
//! it to [`RemoteBackend::new`].

use async_trait::async_trait;
use bytes::Bytes;
use frag_types::Fragment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::{self, MemoryDb};
use crate::traits::FragmentBackend;

/// Transport-level failure reported by an object-store client.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Minimal client-side view of a remote object store.
///
/// The adapter only needs put/get/delete keyed by bucket and object key.
/// `get_object` returns `Ok(None)` for a missing key — absence is not a
/// transport failure. `delete_object` is idempotent: deleting a key that
/// does not exist succeeds.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes)
        -> Result<(), TransportError>;

    async fn get_object(&self, bucket: &str, key: &str)
        -> Result<Option<Bytes>, TransportError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), TransportError>;
}

/// Configuration for the remote adapter.
///
/// Consumed opaquely: the bucket name is passed through to the client
/// unchanged and never interpreted here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub bucket: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            bucket: "fragments".into(),
        }
    }
}

/// Backend that keeps payloads in a remote object store.
///
/// Objects are keyed `"{owner_id}/{id}"` inside the configured bucket, so
/// owner scoping survives into the remote key space.
pub struct RemoteBackend<C> {
    client: C,
    config: RemoteConfig,
    metadata: MemoryDb<Fragment>,
}

impl<C: ObjectClient> RemoteBackend<C> {
    pub fn new(client: C, config: RemoteConfig) -> Self {
        Self {
            client,
            config,
            metadata: MemoryDb::new(),
        }
    }

    fn object_key(owner_id: &str, id: &str) -> String {
        format!("{owner_id}/{id}")
    }

    fn unavailable(op: &'static str, owner_id: &str, id: &str, err: TransportError) -> StoreError {
        StoreError::Unavailable {
            op,
            primary: owner_id.to_string(),
            secondary: id.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl<C: ObjectClient> FragmentBackend for RemoteBackend<C> {
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
        kv::validate_pair(owner_id, id)?;
        let key = Self::object_key(owner_id, id);
        let len = data.len();
        self.client
            .put_object(&self.config.bucket, &key, data)
            .await
            .map_err(|e| Self::unavailable("write_data", owner_id, id, e))?;
        debug!(owner = %owner_id, id = %id, len, bucket = %self.config.bucket, "fragment data uploaded");
        Ok(())
    }

    async fn read_data(&self, owner_id: &str, id: &str) -> StoreResult<Bytes> {
        kv::validate_pair(owner_id, id)?;
        let key = Self::object_key(owner_id, id);
        let body = self
            .client
            .get_object(&self.config.bucket, &key)
            .await
            .map_err(|e| Self::unavailable("read_data", owner_id, id, e))?;
        body.ok_or_else(|| StoreError::NotFound {
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

        // Payload first: a failed transport call aborts with metadata
        // intact, so no payload is ever left without its record.
        let key = Self::object_key(owner_id, id);
        self.client
            .delete_object(&self.config.bucket, &key)
            .await
            .map_err(|e| Self::unavailable("delete_all", owner_id, id, e))?;
        self.metadata.delete(owner_id, id)?;
        debug!(owner = %owner_id, id = %id, "fragment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Object client backed by a map, with a switch to simulate outages.
    #[derive(Default)]
    struct FakeObjectStore {
        objects: Mutex<HashMap<String, Bytes>>,
        offline: AtomicBool,
    }

    impl FakeObjectStore {
        fn check_online(&self) -> Result<(), TransportError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(TransportError("connection refused".into()));
            }
            Ok(())
        }

        fn full_key(bucket: &str, key: &str) -> String {
            format!("{bucket}/{key}")
        }
    }

    #[async_trait]
    impl ObjectClient for FakeObjectStore {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: Bytes,
        ) -> Result<(), TransportError> {
            self.check_online()?;
            self.objects
                .lock()
                .unwrap()
                .insert(Self::full_key(bucket, key), body);
            Ok(())
        }

        async fn get_object(
            &self,
            bucket: &str,
            key: &str,
        ) -> Result<Option<Bytes>, TransportError> {
            self.check_online()?;
            Ok(self
                .objects
                .lock()
                .unwrap()
                .get(&Self::full_key(bucket, key))
                .cloned())
        }

        async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), TransportError> {
            self.check_online()?;
            self.objects.lock().unwrap().remove(&Self::full_key(bucket, key));
            Ok(())
        }
    }

    fn backend() -> RemoteBackend<FakeObjectStore> {
        RemoteBackend::new(FakeObjectStore::default(), RemoteConfig::default())
    }

    fn fragment(owner: &str) -> Fragment {
        Fragment::new(owner, "text/plain").unwrap()
    }

    // -----------------------------------------------------------------------
    // Config
    // -----------------------------------------------------------------------

    #[test]
    fn default_config() {
        let config = RemoteConfig::default();
        assert_eq!(config.bucket, "fragments");
    }

    // -----------------------------------------------------------------------
    // Payload round-trip through the client
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn data_roundtrip() {
        let backend = backend();
        backend
            .write_data("owner-a", "id-1", Bytes::from_static(b"remote bytes"))
            .await
            .unwrap();
        let data = backend.read_data("owner-a", "id-1").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"remote bytes"));
    }

    #[tokio::test]
    async fn objects_are_keyed_by_owner_and_id() {
        let backend = backend();
        backend
            .write_data("owner-a", "id-1", Bytes::from_static(b"a"))
            .await
            .unwrap();
        let stored = backend.client.objects.lock().unwrap();
        assert!(stored.contains_key("fragments/owner-a/id-1"));
    }

    #[tokio::test]
    async fn read_missing_object_is_not_found() {
        let backend = backend();
        let err = backend.read_data("owner-a", "missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let backend = backend();
        backend.client.offline.store(true, Ordering::SeqCst);

        let err = backend
            .write_data("owner-a", "id-1", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { op: "write_data", .. }));

        let err = backend.read_data("owner-a", "id-1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { op: "read_data", .. }));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_metadata_and_remote_object() {
        let backend = backend();
        let frag = fragment("owner-a");
        let id = frag.id.to_string();
        backend.write_metadata(&frag).await.unwrap();
        backend
            .write_data("owner-a", &id, Bytes::from_static(b"payload"))
            .await
            .unwrap();

        backend.delete_all("owner-a", &id).await.unwrap();
        assert!(backend.read_metadata("owner-a", &id).await.unwrap().is_none());
        assert!(backend.client.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_aborts_on_transport_failure_keeping_metadata() {
        let backend = backend();
        let frag = fragment("owner-a");
        let id = frag.id.to_string();
        backend.write_metadata(&frag).await.unwrap();
        backend.client.offline.store(true, Ordering::SeqCst);

        let err = backend.delete_all("owner-a", &id).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
        // metadata untouched, so the caller can retry
        assert!(backend.read_metadata("owner-a", &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_nonexistent_is_not_found() {
        let backend = backend();
        let err = backend.delete_all("owner-a", "no-such-id").await.unwrap_err();
        assert!(err.is_not_found());
    }

    // -----------------------------------------------------------------------
    // Listing (metadata side)
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_metadata_in_insertion_order() {
        let backend = backend();
        let first = fragment("owner-a");
        let second = fragment("owner-a");
        backend.write_metadata(&first).await.unwrap();
        backend.write_metadata(&second).await.unwrap();

        assert_eq!(
            backend.list_metadata("owner-a").await.unwrap(),
            vec![first, second]
        );
    }
}
