//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of elements held by a cache
pub const DEFAULT_CAPACITY: usize = 1024;

/// Settings for building an [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of elements kept before the least recently seen one
    /// is evicted
    pub capacity: usize,
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject settings that cannot produce a cache
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config: CacheConfig = serde_json::from_str(r#"{"capacity": 16}"#).unwrap();
        assert_eq!(config, CacheConfig::with_capacity(16));

        // Missing fields fall back to defaults
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_config_rejects_zero() {
        let config = CacheConfig::with_capacity(0);
        assert_eq!(config.validate(), Err(Error::InvalidCapacity));
    }

    #[test]
    fn test_config_rejects_negative_json() {
        let result: std::result::Result<CacheConfig, _> =
            serde_json::from_str(r#"{"capacity": -1}"#);
        assert!(result.is_err());
    }
}
