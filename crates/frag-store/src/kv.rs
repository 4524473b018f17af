use std::collections::HashMap;
use std::sync::RwLock;

use indexmap::IndexMap;

use crate::error::{StoreError, StoreResult};

/// Generic two-level `(primary, secondary)` associative store.
///
/// The substrate for both metadata and payload persistence in local mode:
/// the same type is instantiated once with fragment records as values and
/// once with raw payload bytes. The store itself has no knowledge of
/// fragments — values are opaque.
///
/// Entries under one primary key keep insertion order; there is no ordering
/// guarantee across primary keys. Writes overwrite silently (last writer
/// wins).
pub struct MemoryDb<V> {
    inner: RwLock<HashMap<String, IndexMap<String, V>>>,
}

pub(crate) fn validate_key(part: &'static str, key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey { part });
    }
    Ok(())
}

pub(crate) fn validate_pair(primary: &str, secondary: &str) -> StoreResult<()> {
    validate_key("primary", primary)?;
    validate_key("secondary", secondary)
}

impl<V: Clone> MemoryDb<V> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the value under `(primary, secondary)`.
    pub fn put(&self, primary: &str, secondary: &str, value: V) -> StoreResult<()> {
        validate_pair(primary, secondary)?;
        let mut map = self.inner.write().expect("lock poisoned");
        map.entry(primary.to_string())
            .or_default()
            .insert(secondary.to_string(), value);
        Ok(())
    }

    /// The value under `(primary, secondary)`, or `None`.
    ///
    /// Absence is a normal result, never an error; malformed keys fail with
    /// [`StoreError::InvalidKey`].
    pub fn get(&self, primary: &str, secondary: &str) -> StoreResult<Option<V>> {
        validate_pair(primary, secondary)?;
        let map = self.inner.read().expect("lock poisoned");
        Ok(map
            .get(primary)
            .and_then(|entries| entries.get(secondary).cloned()))
    }

    /// All values under `primary` in insertion order.
    ///
    /// An absent primary key yields an empty vec, never an error.
    pub fn query(&self, primary: &str) -> StoreResult<Vec<V>> {
        validate_key("primary", primary)?;
        let map = self.inner.read().expect("lock poisoned");
        Ok(map
            .get(primary)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Remove the value under `(primary, secondary)`.
    ///
    /// Fails with [`StoreError::NotFound`] if the key holds no value.
    pub fn delete(&self, primary: &str, secondary: &str) -> StoreResult<()> {
        validate_pair(primary, secondary)?;
        let mut map = self.inner.write().expect("lock poisoned");
        let removed = map
            .get_mut(primary)
            .and_then(|entries| entries.shift_remove(secondary));
        if removed.is_none() {
            return Err(StoreError::NotFound {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
            });
        }
        Ok(())
    }

    /// Total number of values across all primary keys.
    pub fn len(&self) -> usize {
        let map = self.inner.read().expect("lock poisoned");
        map.values().map(IndexMap::len).sum()
    }

    /// Returns `true` if the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for MemoryDb<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for MemoryDb<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.inner.read().expect("lock poisoned");
        let count: usize = map.values().map(IndexMap::len).sum();
        f.debug_struct("MemoryDb")
            .field("entry_count", &count)
            .finish()
    }
}
