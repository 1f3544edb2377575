//! # seencache
//!
//! Fixed-capacity, thread-safe cache that evicts the least recently seen
//! element.
//!
//! ## Architecture
//! - **Index**: AHash map from key to slot (O(1) lookup)
//! - **Recency list**: Doubly-linked list over an arena of slots (O(1) promotion)
//! - **Eviction**: Full cache recycles the tail slot for the incoming element
//! - **Locking**: One `RwLock` over both; `see` writes, `get` reads
//!
//! ```rust
//! use std::sync::Arc;
//! use seencache::{CacheElement, LruCache};
//!
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! impl CacheElement for User {
//!     fn key(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let cache = LruCache::new(1).unwrap();
//! cache.see(Arc::new(User { id: "1".into(), name: "Alice".into() }));
//! assert_eq!(cache.get("1").map(|u| u.name.clone()).as_deref(), Some("Alice"));
//!
//! cache.see(Arc::new(User { id: "2".into(), name: "Bob".into() }));
//! assert!(cache.get("1").is_none());
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod element;
mod error;
mod lru;

pub use cache::LruCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use element::CacheElement;
pub use error::{Error, Result};
