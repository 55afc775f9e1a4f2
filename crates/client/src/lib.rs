//! Validating client for Ick queues
//!
//! The thin wrapper around the queue engine: it validates caller input
//! before anything touches storage, projects raw responses into typed
//! results, reports counters and timings to an optional metrics sink, and
//! offers pipelined batches whose calls resolve through deferred handles.

mod error;
mod metrics;
mod pipeline;
mod project;
mod validate;

pub use error::{Error, Result};
pub use metrics::MetricsSink;
pub use pipeline::{Deferred, Pipeline};

use ick_common::Score;
use ick_engine::{IckEngine, IckOperation, IckStats};
use ick_store::{MemoryStore, Store};
use std::sync::Arc;
use std::time::Instant;

/// Metric names reported to the sink, one counter per operation plus
/// whole-call timings and a few size measurements.
pub(crate) mod metric {
    pub const ADD_CALLS: &str = "profile.ick.ickadd.calls";
    pub const ADD_PAIRS: &str = "profile.ick.ickadd.pairs";
    pub const ADD_TIME: &str = "profile.ick.time.ickadd";
    pub const RESERVE_CALLS: &str = "profile.ick.ickreserve.calls";
    pub const RESERVE_MAX_SIZE: &str = "profile.ick.ickreserve.max_size";
    pub const RESERVE_NUM_RESULTS: &str = "profile.ick.ickreserve.num_results";
    pub const RESERVE_TIME: &str = "profile.ick.time.ickreserve";
    pub const COMMIT_CALLS: &str = "profile.ick.ickcommit.calls";
    pub const COMMIT_MEMBERS: &str = "profile.ick.ickcommit.members";
    pub const COMMIT_TIME: &str = "profile.ick.time.ickcommit";
    pub const EXCHANGE_CALLS: &str = "profile.ick.ickexchange.calls";
    pub const EXCHANGE_TIME: &str = "profile.ick.time.ickexchange";
    pub const STATS_CALLS: &str = "profile.ick.ickstats.calls";
    pub const STATS_TIME: &str = "profile.ick.time.ickstats";
    pub const DEL_CALLS: &str = "profile.ick.ickdel.calls";
    pub const DEL_TIME: &str = "profile.ick.time.ickdel";
    pub const UNLINK_CALLS: &str = "profile.ick.ickunlink.calls";
    pub const UNLINK_TIME: &str = "profile.ick.time.ickunlink";
}

/// Client for one queue engine.
pub struct Ick<S: Store = MemoryStore> {
    engine: Arc<IckEngine<S>>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl Ick<MemoryStore> {
    /// Client over a fresh in-process engine.
    pub fn new() -> Self {
        Self::with_engine(Arc::new(IckEngine::new()))
    }
}

impl Default for Ick<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> Ick<S> {
    pub fn with_engine(engine: Arc<IckEngine<S>>) -> Self {
        Self {
            engine,
            metrics: None,
        }
    }

    /// Attach a metrics sink; without one every instrumentation point is a
    /// no-op.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &IckEngine<S> {
        &self.engine
    }

    /// Start an ordered pipeline of operations against this client.
    pub fn pipeline(&self) -> Pipeline<'_, S> {
        Pipeline::new(self)
    }

    /// Fold `(score, member)` pairs into the producer set.
    ///
    /// Re-adding an existing member keeps the lowest of the old and new
    /// scores. Returns the number of new members and of lowered scores.
    pub fn add(&self, queue: &str, pairs: &[(f64, &str)]) -> Result<(u64, u64)> {
        validate::queue_name(queue)?;
        validate::score_member_pairs(pairs)?;
        self.count(metric::ADD_CALLS);
        self.measure(metric::ADD_PAIRS, pairs.len() as u64);
        let operation = IckOperation::Add {
            queue: queue.to_string(),
            pairs: pairs
                .iter()
                .map(|(score, member)| (Score::new(*score), member.to_string()))
                .collect(),
        };
        let response = self.timed(metric::ADD_TIME, || self.engine.apply(operation))?;
        project::added(response)
    }

    /// Top up the consumer set to `max_size` from the lowest-scored
    /// producer members and return it, ascending by score.
    ///
    /// Uncommitted members are returned again by future reserves. With
    /// `backwash`, everything still reserved is first folded back into the
    /// producer set.
    pub fn reserve(
        &self,
        queue: &str,
        max_size: usize,
        backwash: bool,
    ) -> Result<Vec<(String, f64)>> {
        validate::queue_name(queue)?;
        self.count(metric::RESERVE_CALLS);
        self.measure(metric::RESERVE_MAX_SIZE, max_size as u64);
        let operation = IckOperation::Reserve {
            queue: queue.to_string(),
            max_size,
            backwash,
        };
        let response = self.timed(metric::RESERVE_TIME, || self.engine.apply(operation))?;
        let results = project::reserved(response)?;
        self.measure(metric::RESERVE_NUM_RESULTS, results.len() as u64);
        Ok(results)
    }

    /// Remove completed members from the consumer set, returning how many
    /// were present.
    pub fn commit(&self, queue: &str, members: &[&str]) -> Result<u64> {
        validate::queue_name(queue)?;
        self.count(metric::COMMIT_CALLS);
        self.measure(metric::COMMIT_MEMBERS, members.len() as u64);
        let operation = IckOperation::Commit {
            queue: queue.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        };
        let response = self.timed(metric::COMMIT_TIME, || self.engine.apply(operation))?;
        project::committed(response)
    }

    /// Commit, optionally backwash, then reserve, in one atomic round trip.
    pub fn exchange(
        &self,
        queue: &str,
        reserve_size: usize,
        commit_members: &[&str],
        backwash: bool,
    ) -> Result<(u64, Vec<(String, f64)>)> {
        validate::queue_name(queue)?;
        self.count(metric::EXCHANGE_CALLS);
        let operation = IckOperation::Exchange {
            queue: queue.to_string(),
            reserve_size,
            commit_members: commit_members.iter().map(|m| m.to_string()).collect(),
            backwash,
        };
        let response = self.timed(metric::EXCHANGE_TIME, || self.engine.apply(operation))?;
        project::exchanged(response)
    }

    /// Structural summary of the queue, or `None` if it does not exist.
    pub fn stats(&self, queue: &str) -> Result<Option<IckStats>> {
        validate::queue_name(queue)?;
        self.count(metric::STATS_CALLS);
        let operation = IckOperation::Stats {
            queue: queue.to_string(),
        };
        let response = self.timed(metric::STATS_TIME, || self.engine.apply(operation))?;
        project::stats(response)
    }

    /// Remove all records of the queue, reclaiming space synchronously.
    /// Returns the number of underlying records removed.
    pub fn del(&self, queue: &str) -> Result<u64> {
        validate::queue_name(queue)?;
        self.count(metric::DEL_CALLS);
        let operation = IckOperation::Delete {
            queue: queue.to_string(),
        };
        let response = self.timed(metric::DEL_TIME, || self.engine.apply(operation))?;
        project::deleted(response)
    }

    /// Like [`Ick::del`], but lets the store reclaim space lazily.
    pub fn unlink(&self, queue: &str) -> Result<u64> {
        validate::queue_name(queue)?;
        self.count(metric::UNLINK_CALLS);
        let operation = IckOperation::Unlink {
            queue: queue.to_string(),
        };
        let response = self.timed(metric::UNLINK_TIME, || self.engine.apply(operation))?;
        project::deleted(response)
    }

    pub(crate) fn count(&self, metric: &str) {
        if let Some(sink) = &self.metrics {
            sink.increment(metric);
        }
    }

    pub(crate) fn measure(&self, metric: &str, value: u64) {
        if let Some(sink) = &self.metrics {
            sink.timing(metric, value);
        }
    }

    /// Time-wrapped execution: run the call and report its duration.
    fn timed<R>(&self, metric: &str, call: impl FnOnce() -> R) -> R {
        match &self.metrics {
            Some(sink) => {
                let start = Instant::now();
                let result = call();
                sink.timing(metric, start.elapsed().as_millis() as u64);
                result
            }
            None => call(),
        }
    }
}
