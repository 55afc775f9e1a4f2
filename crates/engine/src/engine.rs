//! Queue engine: dispatches operations against a backing store
//!
//! One operation = one atomic store transaction. The structural guard runs
//! first inside every transaction, before the first mutating primitive, so a
//! rejected operation leaves no partial effects.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::exchange::{self, ExchangeOutcome};
use crate::fold::{FoldOutcome, fold};
use crate::guard;
use crate::keys::IckKeys;
use crate::stats;
use crate::types::{IckOperation, IckResponse};
use ick_common::Score;
use ick_store::{MemoryStore, Store, StoreTxn};

/// Executes ick operations against a backing store.
pub struct IckEngine<S: Store = MemoryStore> {
    store: S,
    config: EngineConfig,
}

impl IckEngine<MemoryStore> {
    /// Create an engine over a fresh in-process store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), EngineConfig::default())
    }
}

impl Default for IckEngine<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> IckEngine<S> {
    /// Create an engine over a custom store and config.
    pub fn with_store(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one operation as one atomic transaction.
    pub fn apply(&self, operation: IckOperation) -> Result<IckResponse> {
        tracing::debug!("applying ick operation: {:?}", operation);
        match operation {
            IckOperation::Add { queue, pairs } => self.execute_add(&queue, &pairs),
            IckOperation::Reserve {
                queue,
                max_size,
                backwash,
            } => self
                .execute_exchange(&queue, max_size, &[], backwash)
                .map(|outcome| IckResponse::Reserved(outcome.reserved)),
            IckOperation::Commit { queue, members } => self
                .execute_exchange(&queue, 0, &members, false)
                .map(|outcome| IckResponse::Committed(outcome.num_committed)),
            IckOperation::Exchange {
                queue,
                reserve_size,
                commit_members,
                backwash,
            } => self
                .execute_exchange(&queue, reserve_size, &commit_members, backwash)
                .map(|outcome| IckResponse::Exchanged {
                    num_committed: outcome.num_committed,
                    reserved: outcome.reserved,
                }),
            IckOperation::Stats { queue } => self.execute_stats(&queue),
            IckOperation::Delete { queue } => self.execute_delete(&queue, false),
            IckOperation::Unlink { queue } => self.execute_delete(&queue, true),
        }
    }

    /// Fold pairs into the producer set and ensure the manifest exists.
    fn execute_add(&self, queue: &str, pairs: &[(Score, String)]) -> Result<IckResponse> {
        let keys = IckKeys::derive(queue);
        self.store.atomically(|txn| {
            guard::check(txn, &keys, &self.config.manifest_version)?;
            let mut num_new = 0u64;
            let mut num_changed = 0u64;
            for (score, member) in pairs {
                match fold(txn, &keys.pset, member, *score)? {
                    FoldOutcome::New => num_new += 1,
                    FoldOutcome::Changed => num_changed += 1,
                    FoldOutcome::Unchanged => {}
                }
            }
            txn.set_if_absent(&keys.manifest, &self.config.manifest_version)?;
            Ok(IckResponse::Added {
                num_new,
                num_changed,
            })
        })
    }

    fn execute_exchange(
        &self,
        queue: &str,
        reserve_size: usize,
        commit_members: &[String],
        backwash: bool,
    ) -> Result<ExchangeOutcome> {
        let keys = IckKeys::derive(queue);
        self.store.atomically(|txn| {
            guard::check(txn, &keys, &self.config.manifest_version)?;
            exchange::run(
                txn,
                &keys,
                &self.config,
                reserve_size,
                commit_members,
                backwash,
            )
        })
    }

    fn execute_stats(&self, queue: &str) -> Result<IckResponse> {
        let keys = IckKeys::derive(queue);
        self.store.atomically(|txn| {
            match guard::check(txn, &keys, &self.config.manifest_version)? {
                None => Ok(IckResponse::Stats(None)),
                Some(ver) => stats::collect(txn, &keys, &ver).map(|s| IckResponse::Stats(Some(s))),
            }
        })
    }

    fn execute_delete(&self, queue: &str, deferred: bool) -> Result<IckResponse> {
        let keys = IckKeys::derive(queue);
        self.store.atomically(|txn| {
            guard::check(txn, &keys, &self.config.manifest_version)?;
            let targets = [
                keys.manifest.as_str(),
                keys.pset.as_str(),
                keys.cset.as_str(),
            ];
            let removed = if deferred {
                txn.unlink(&targets)?
            } else {
                txn.del(&targets)?
            };
            Ok(IckResponse::Deleted(removed))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_op(queue: &str, pairs: &[(f64, &str)]) -> IckOperation {
        IckOperation::Add {
            queue: queue.to_string(),
            pairs: pairs
                .iter()
                .map(|(score, member)| (Score::new(*score), member.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_add_reports_new_and_changed() {
        let engine = IckEngine::new();

        let result = engine.apply(add_op("q", &[(5.0, "x"), (6.0, "y")])).unwrap();
        assert!(matches!(
            result,
            IckResponse::Added {
                num_new: 2,
                num_changed: 0
            }
        ));

        // Equal score: untouched. Lower score: changed. Higher score: untouched.
        let result = engine
            .apply(add_op("q", &[(5.0, "x"), (2.0, "y"), (9.0, "y")]))
            .unwrap();
        assert!(matches!(
            result,
            IckResponse::Added {
                num_new: 0,
                num_changed: 1
            }
        ));
    }

    #[test]
    fn test_reserve_promotes_lowest_scores_first() {
        let engine = IckEngine::new();
        engine
            .apply(add_op("q", &[(3.0, "c"), (1.0, "a"), (2.0, "b")]))
            .unwrap();

        let result = engine
            .apply(IckOperation::Reserve {
                queue: "q".to_string(),
                max_size: 2,
                backwash: false,
            })
            .unwrap();

        let IckResponse::Reserved(pairs) = result else {
            panic!("expected Reserved, got {:?}", result);
        };
        let members: Vec<&str> = pairs.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(members, vec!["a", "b"]);
    }

    #[test]
    fn test_commit_removes_reserved_members() {
        let engine = IckEngine::new();
        engine.apply(add_op("q", &[(1.0, "a"), (2.0, "b")])).unwrap();
        engine
            .apply(IckOperation::Reserve {
                queue: "q".to_string(),
                max_size: 2,
                backwash: false,
            })
            .unwrap();

        let result = engine
            .apply(IckOperation::Commit {
                queue: "q".to_string(),
                members: vec!["a".to_string(), "missing".to_string()],
            })
            .unwrap();
        assert!(matches!(result, IckResponse::Committed(1)));
    }

    #[test]
    fn test_operations_against_corrupted_queue_abort() {
        let store = MemoryStore::new();
        store
            .atomically(|txn| -> ick_store::Result<()> {
                txn.set_if_absent("q", "not-an-ick")?;
                Ok(())
            })
            .unwrap();

        let engine = IckEngine::with_store(store, EngineConfig::default());
        let result = engine.apply(add_op("q", &[(1.0, "a")]));
        assert!(matches!(
            result,
            Err(crate::Error::UnrecognizedVersion { .. })
        ));
    }

    #[test]
    fn test_delete_then_stats_absent() {
        let engine = IckEngine::new();
        engine.apply(add_op("q", &[(1.0, "a")])).unwrap();

        let result = engine
            .apply(IckOperation::Delete {
                queue: "q".to_string(),
            })
            .unwrap();
        assert!(matches!(result, IckResponse::Deleted(n) if n >= 1));

        let result = engine
            .apply(IckOperation::Stats {
                queue: "q".to_string(),
            })
            .unwrap();
        assert!(matches!(result, IckResponse::Stats(None)));
    }
}
