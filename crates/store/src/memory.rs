//! In-process backing store

use crate::error::{Error, Result};
use crate::sorted_set::SortedSet;
use crate::txn::{KeyType, Store, StoreTxn};
use ick_common::Score;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Entry {
    Str(String),
    Zset(SortedSet),
}

impl Entry {
    fn key_type(&self) -> KeyType {
        match self {
            Entry::Str(_) => KeyType::Str,
            Entry::Zset(_) => KeyType::Zset,
        }
    }
}

/// In-process store with per-call atomicity.
///
/// A single mutex serializes transactions, giving every queue operation the
/// single-writer atomicity the algorithm requires without any client-side
/// locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Txn<'a> = MemoryTxn<'a>;

    fn atomically<R, E>(
        &self,
        body: impl FnOnce(&mut Self::Txn<'_>) -> std::result::Result<R, E>,
    ) -> std::result::Result<R, E>
    where
        E: From<Error>,
    {
        let mut entries = self.entries.lock();
        let mut txn = MemoryTxn {
            entries: &mut entries,
        };
        body(&mut txn)
    }
}

/// One transaction against a [`MemoryStore`]; lives for the duration of the
/// store's lock.
pub struct MemoryTxn<'a> {
    entries: &'a mut HashMap<String, Entry>,
}

impl MemoryTxn<'_> {
    fn zset_mut(&mut self, key: &str) -> Result<&mut SortedSet> {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Zset(SortedSet::new()));
        match entry {
            Entry::Zset(set) => Ok(set),
            Entry::Str(_) => Err(Error::WrongType {
                key: key.to_string(),
                expected: KeyType::Zset,
                found: KeyType::Str,
            }),
        }
    }

    fn zset_ref(&self, key: &str) -> Result<Option<&SortedSet>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::Zset(set)) => Ok(Some(set)),
            Some(Entry::Str(_)) => Err(Error::WrongType {
                key: key.to_string(),
                expected: KeyType::Zset,
                found: KeyType::Str,
            }),
        }
    }

    /// Emptied sets vanish: the key reads back as absent, like native
    /// ordered sets do.
    fn drop_if_empty(&mut self, key: &str) {
        let emptied = matches!(self.entries.get(key), Some(Entry::Zset(set)) if set.is_empty());
        if emptied {
            self.entries.remove(key);
        }
    }
}

impl StoreTxn for MemoryTxn<'_> {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::Str(value)) => Ok(Some(value.clone())),
            Some(Entry::Zset(_)) => Err(Error::WrongType {
                key: key.to_string(),
                expected: KeyType::Str,
                found: KeyType::Zset,
            }),
        }
    }

    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<bool> {
        if self.entries.contains_key(key) {
            return Ok(false);
        }
        self.entries
            .insert(key.to_string(), Entry::Str(value.to_string()));
        Ok(true)
    }

    fn del(&mut self, keys: &[&str]) -> Result<u64> {
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(*key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn unlink(&mut self, keys: &[&str]) -> Result<u64> {
        // No deferred reclamation exists in-process.
        self.del(keys)
    }

    fn key_type(&mut self, key: &str) -> Result<KeyType> {
        Ok(self
            .entries
            .get(key)
            .map(Entry::key_type)
            .unwrap_or(KeyType::None))
    }

    fn zadd(&mut self, key: &str, entries: &[(Score, &str)]) -> Result<()> {
        let set = self.zset_mut(key)?;
        for (score, member) in entries {
            set.insert(member, *score);
        }
        self.drop_if_empty(key);
        Ok(())
    }

    fn zrem(&mut self, key: &str, members: &[&str]) -> Result<u64> {
        let Some(_) = self.zset_ref(key)? else {
            return Ok(0);
        };
        let set = self.zset_mut(key)?;
        let mut removed = 0;
        for member in members {
            if set.remove(member) {
                removed += 1;
            }
        }
        self.drop_if_empty(key);
        Ok(removed)
    }

    fn zscore(&mut self, key: &str, member: &str) -> Result<Option<Score>> {
        Ok(self.zset_ref(key)?.and_then(|set| set.score(member)))
    }

    fn zcard(&mut self, key: &str) -> Result<u64> {
        Ok(self.zset_ref(key)?.map(|set| set.len() as u64).unwrap_or(0))
    }

    fn zrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(String, Score)>> {
        Ok(self
            .zset_ref(key)?
            .map(|set| set.range(start, stop))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_if_absent() {
        let store = MemoryStore::new();
        store
            .atomically(|txn| -> Result<()> {
                assert!(txn.set_if_absent("k", "v1")?);
                assert!(!txn.set_if_absent("k", "v2")?);
                assert_eq!(txn.get("k")?, Some("v1".to_string()));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let store = MemoryStore::new();
        let result = store.atomically(|txn| -> Result<()> {
            txn.set_if_absent("k", "v")?;
            txn.zadd("k", &[(Score::new(1.0), "m")])?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::WrongType { .. })));
    }

    #[test]
    fn test_emptied_set_reads_back_absent() {
        let store = MemoryStore::new();
        store
            .atomically(|txn| -> Result<()> {
                txn.zadd("z", &[(Score::new(1.0), "m")])?;
                assert_eq!(txn.key_type("z")?, KeyType::Zset);
                assert_eq!(txn.zrem("z", &["m"])?, 1);
                assert_eq!(txn.key_type("z")?, KeyType::None);
                assert_eq!(txn.zcard("z")?, 0);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_del_counts_existing_keys() {
        let store = MemoryStore::new();
        store
            .atomically(|txn| -> Result<()> {
                txn.set_if_absent("a", "1")?;
                txn.zadd("b", &[(Score::new(1.0), "m")])?;
                assert_eq!(txn.del(&["a", "b", "missing"])?, 2);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_zrange_on_absent_key() {
        let store = MemoryStore::new();
        store
            .atomically(|txn| -> Result<()> {
                assert!(txn.zrange_withscores("nope", 0, -1)?.is_empty());
                assert_eq!(txn.zscore("nope", "m")?, None);
                Ok(())
            })
            .unwrap();
    }
}
