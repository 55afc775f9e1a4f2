//! Store traits: primitive calls and atomic execution

use crate::error::{Error, Result};
use ick_common::Score;
use std::fmt;

/// Storage type of a key, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// The key does not exist.
    None,
    /// A plain string value.
    Str,
    /// An ordered member set keyed by score.
    Zset,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::None => "none",
            KeyType::Str => "string",
            KeyType::Zset => "zset",
        };
        f.write_str(name)
    }
}

/// Primitive calls available inside one atomic transaction.
///
/// Everything an operation does must be expressed through these; a store is
/// never asked for anything richer than its native get/set/delete and
/// ordered-set surface.
pub trait StoreTxn {
    /// Read a string value. Errors if the key holds an ordered set.
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Set a string value only if the key is absent. Returns whether the
    /// value was written.
    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<bool>;

    /// Remove keys, reclaiming space synchronously. Returns how many of the
    /// keys existed.
    fn del(&mut self, keys: &[&str]) -> Result<u64>;

    /// Remove keys, deferring space reclamation. Returns how many of the
    /// keys existed.
    fn unlink(&mut self, keys: &[&str]) -> Result<u64>;

    /// Report the storage type of a key.
    fn key_type(&mut self, key: &str) -> Result<KeyType>;

    /// Insert (or re-score) members in an ordered set, creating the set if
    /// the key is absent.
    fn zadd(&mut self, key: &str, entries: &[(Score, &str)]) -> Result<()>;

    /// Remove members from an ordered set. Returns how many were present.
    fn zrem(&mut self, key: &str, members: &[&str]) -> Result<u64>;

    /// Score of one member, if present.
    fn zscore(&mut self, key: &str, member: &str) -> Result<Option<Score>>;

    /// Cardinality of an ordered set (0 for an absent key).
    fn zcard(&mut self, key: &str) -> Result<u64>;

    /// Members in rank order ascending by score, inclusive indices, negative
    /// indices counting from the end.
    fn zrange_withscores(&mut self, key: &str, start: i64, stop: i64)
    -> Result<Vec<(String, Score)>>;
}

/// A backing store able to run a bounded sequence of primitive calls as one
/// atomic transaction: no other caller observes partial effects.
///
/// The store does not roll back a transaction that fails mid-sequence, so
/// callers must issue every validation read before the first mutating call.
pub trait Store {
    type Txn<'a>: StoreTxn
    where
        Self: 'a;

    /// Run `body` as one atomic transaction.
    fn atomically<R, E>(&self, body: impl FnOnce(&mut Self::Txn<'_>) -> std::result::Result<R, E>)
    -> std::result::Result<R, E>
    where
        E: From<Error>;
}
