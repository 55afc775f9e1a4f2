//! Error types for the client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed caller input, rejected before any storage access.
    #[error("validation: {0}")]
    Validation(String),

    /// The engine aborted the operation.
    #[error(transparent)]
    Engine(#[from] ick_engine::Error),

    /// The engine answered with a response shape the call did not expect.
    #[error("unexpected response type")]
    UnexpectedResponse,

    /// A transform is already attached to this deferred handle.
    #[error("a transform is already attached to this handle")]
    TransformAlreadyAttached,

    /// A deferred handle was resolved before its pipeline executed.
    #[error("deferred handle resolved before pipeline execution")]
    Unresolved,
}

impl From<ick_common::NameError> for Error {
    fn from(err: ick_common::NameError) -> Self {
        Error::Validation(err.to_string())
    }
}
