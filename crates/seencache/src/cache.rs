//! Thread-safe LRU cache

use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::element::CacheElement;
use crate::error::{Error, Result};
use crate::lru::{Recency, Seen};

/// Fixed-capacity cache that evicts the least recently seen element
///
/// Index and recency list sit behind a single readers-writer lock:
/// [`see`](Self::see) takes it exclusively, [`get`](Self::get) shares it.
/// Lookups never change recency; only `see` does.
pub struct LruCache<E: ?Sized> {
    inner: RwLock<Recency<E>>,
}

impl<E: CacheElement + ?Sized> LruCache<E> {
    /// Create a new cache holding at most `capacity` elements
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of elements; any integer type
    ///
    /// # Returns
    /// * `Result<LruCache<E>>` - `Error::InvalidCapacity` if `capacity`
    ///   is zero, negative, or too large to reserve up front
    pub fn new<C: TryInto<usize>>(capacity: C) -> Result<Self> {
        let capacity = capacity
            .try_into()
            .map_err(|_| Error::InvalidCapacity)?;
        let recency = Recency::new(capacity)?;

        debug!(capacity, "creating LRU cache");

        Ok(Self {
            inner: RwLock::new(recency),
        })
    }

    /// Create a cache from configuration
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    /// Record an element as the most recently seen one
    ///
    /// An element whose key is already cached replaces the stored one in
    /// place. A new key on a full cache evicts the least recently seen
    /// element. `None` is ignored.
    pub fn see<T: Into<Option<Arc<E>>>>(&self, element: T) {
        let Some(element) = element.into() else {
            return;
        };

        let seen = self.inner.write().see(Arc::clone(&element));

        // Evicted element is dropped here, outside the lock
        match seen {
            Seen::Updated => trace!(key = element.key(), "promoted"),
            Seen::Inserted => trace!(key = element.key(), "inserted"),
            Seen::Evicted(old) => {
                trace!(key = element.key(), evicted = old.key(), "inserted with eviction")
            }
        }
    }

    /// Get the element stored under `key`, if any
    ///
    /// Does not count as a use: recency order is unchanged.
    pub fn get(&self, key: &str) -> Option<Arc<E>> {
        self.inner.read().get(key).cloned()
    }

    /// Check whether `key` is cached
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    /// Get current number of cached elements
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Snapshot of cached keys, most recently seen first
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .iter()
            .map(|element| element.key().to_owned())
            .collect()
    }

    /// Verify internal consistency under exclusive access
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.write().check_invariants()
    }
}

impl<E: CacheElement + ?Sized> fmt::Debug for LruCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("LruCache")
            .field("len", &inner.len())
            .field("capacity", &inner.capacity())
            .finish()
    }
}
