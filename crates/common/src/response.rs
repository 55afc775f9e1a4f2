//! Response traits

use std::fmt::Debug;

/// Trait for responses produced by atomic operations
pub trait Response:
    serde::de::DeserializeOwned + serde::Serialize + Send + Sync + Debug + Clone
{
}
