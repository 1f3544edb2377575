//! Error types for seencache

use std::fmt;

/// Result type alias for seencache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by cache construction and consistency checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity was zero, negative, or did not fit in `usize`
    InvalidCapacity,

    /// Index and recency list disagree
    Corrupted(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity => write!(f, "Invalid capacity: must be greater than 0"),
            Error::Corrupted(reason) => write!(f, "Cache corrupted: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
