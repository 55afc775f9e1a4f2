//! Common types for Ick queues
//!
//! This crate defines:
//! - Scores (the ordering key for queue members) and their store-boundary
//!   text encoding
//! - Queue name validation
//! - Core abstractions for operations and responses

pub mod name;
mod operation;
mod response;
mod score;

pub use name::NameError;
pub use operation::Operation;
pub use operation::OperationType;
pub use response::Response;
pub use score::{Score, ScoreParseError, ScoreValue};
