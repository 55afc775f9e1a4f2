//! Error types for backing stores

use crate::txn::KeyType;
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a backing store.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A primitive was issued against a key of the wrong storage type.
    #[error("wrong type at {key}: expected {expected}, found {found}")]
    WrongType {
        key: String,
        expected: KeyType,
        found: KeyType,
    },

    /// The store call itself failed or timed out. Propagated unchanged to
    /// the caller and never retried at this layer.
    #[error("transport failure: {0}")]
    Transport(String),
}
