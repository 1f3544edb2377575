//! The capability a value needs to live in the cache

use std::sync::Arc;

/// A value identified by a stable string key.
///
/// Two elements with the same key occupy the same cache entry; seeing the
/// second replaces the first.
pub trait CacheElement {
    /// Key under which this element is indexed
    fn key(&self) -> &str;
}

impl<T: CacheElement + ?Sized> CacheElement for &T {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: CacheElement + ?Sized> CacheElement for Box<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: CacheElement + ?Sized> CacheElement for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}
