//! Backing-store abstraction for Ick queues
//!
//! The queue algorithm is expressed purely in terms of a small set of store
//! primitives: plain get/set-if-absent/delete, key type inspection, and
//! ordered-set insert/remove/score/cardinality/range. A [`Store`] runs a
//! bounded sequence of those primitives as one atomic transaction.
//!
//! [`MemoryStore`] is the in-process realization: a single mutex serializes
//! transactions, so every operation observes and produces a consistent state.

mod error;
mod memory;
mod sorted_set;
mod txn;

pub use error::{Error, Result};
pub use memory::{MemoryStore, MemoryTxn};
pub use sorted_set::SortedSet;
pub use txn::{KeyType, Store, StoreTxn};
