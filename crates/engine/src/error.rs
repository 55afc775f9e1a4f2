//! Error types for the queue engine

use ick_store::KeyType;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a queue operation.
///
/// Structural problems persist until corrected out-of-band; the engine never
/// auto-heals them, and an aborted operation leaves no partial mutation.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The manifest holds a version string this engine does not recognize.
    #[error("unrecognized ick version at {key}: expected {expected:?}, found {found:?}")]
    UnrecognizedVersion {
        key: String,
        expected: String,
        found: String,
    },

    /// A derived key holds a value of the wrong storage type.
    #[error("ick defense: expected {expected} at {key}, found {found}")]
    Corruption {
        key: String,
        expected: KeyType,
        found: KeyType,
    },

    /// A set key exists although the manifest is absent.
    #[error("ick defense: no manifest at {manifest}, but found a set at {key}")]
    OrphanedSet { key: String, manifest: String },

    /// The backing store failed; propagated unchanged, never retried here.
    #[error(transparent)]
    Store(#[from] ick_store::Error),
}
