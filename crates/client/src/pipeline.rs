//! Pipelined operation batches and deferred handles
//!
//! A pipeline queues operations and sends them together in order. Each
//! pipelined call stays individually atomic, but its result only becomes
//! available once the whole pipeline has executed, so every call yields a
//! [`Deferred`] handle instead of an immediate value.
//!
//! A handle carries a one-shot transform from the raw engine response to the
//! call's typed result. The transform is assigned when the handle is
//! created and is immutable afterwards: attaching a second one is an error,
//! and resolving the handle runs the transform exactly once.

use crate::error::{Error, Result};
use crate::project;
use crate::validate;
use crate::{Ick, metric};
use ick_common::Score;
use ick_engine::{IckOperation, IckResponse, IckStats};
use ick_store::Store;
use parking_lot::Mutex;
use std::sync::Arc;

type Transform<T> = Box<dyn FnOnce(IckResponse) -> Result<T> + Send>;
type Filler = Box<dyn FnOnce(Result<IckResponse>) + Send>;

struct DeferredInner<T> {
    raw: Option<Result<IckResponse>>,
    transform: Option<Transform<T>>,
}

/// Future-like handle for one pipelined call.
pub struct Deferred<T> {
    inner: Arc<Mutex<DeferredInner<T>>>,
}

impl<T: Send + 'static> Deferred<T> {
    fn new(transform: impl FnOnce(IckResponse) -> Result<T> + Send + 'static) -> (Self, Filler) {
        let inner = Arc::new(Mutex::new(DeferredInner {
            raw: None,
            transform: Some(Box::new(transform)),
        }));
        let slot = Arc::clone(&inner);
        let filler: Filler = Box::new(move |result| {
            slot.lock().raw = Some(result);
        });
        (Self { inner }, filler)
    }

    /// Attach a post-processing transform.
    ///
    /// Handles are created with their transform already assigned, so this
    /// reports [`Error::TransformAlreadyAttached`] unless the slot is free.
    pub fn attach(
        &self,
        transform: impl FnOnce(IckResponse) -> Result<T> + Send + 'static,
    ) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.transform.is_some() {
            return Err(Error::TransformAlreadyAttached);
        }
        inner.transform = Some(Box::new(transform));
        Ok(())
    }

    /// Resolve the handle, running its transform exactly once.
    ///
    /// Errors with [`Error::Unresolved`] if the pipeline has not executed.
    pub fn value(self) -> Result<T> {
        let mut inner = self.inner.lock();
        let raw = inner.raw.take().ok_or(Error::Unresolved)?;
        let transform = inner.transform.take().ok_or(Error::Unresolved)?;
        transform(raw?)
    }
}

/// An ordered batch of operations sent together.
pub struct Pipeline<'a, S: Store> {
    client: &'a Ick<S>,
    queued: Vec<(IckOperation, Filler)>,
}

impl<'a, S: Store> Pipeline<'a, S> {
    pub(crate) fn new(client: &'a Ick<S>) -> Self {
        Self {
            client,
            queued: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Queue an add; see [`Ick::add`].
    pub fn add(&mut self, queue: &str, pairs: &[(f64, &str)]) -> Result<Deferred<(u64, u64)>> {
        validate::queue_name(queue)?;
        validate::score_member_pairs(pairs)?;
        self.client.count(metric::ADD_CALLS);
        let operation = IckOperation::Add {
            queue: queue.to_string(),
            pairs: pairs
                .iter()
                .map(|(score, member)| (Score::new(*score), member.to_string()))
                .collect(),
        };
        Ok(self.enqueue(operation, project::added))
    }

    /// Queue a reserve; see [`Ick::reserve`].
    pub fn reserve(
        &mut self,
        queue: &str,
        max_size: usize,
        backwash: bool,
    ) -> Result<Deferred<Vec<(String, f64)>>> {
        validate::queue_name(queue)?;
        self.client.count(metric::RESERVE_CALLS);
        let operation = IckOperation::Reserve {
            queue: queue.to_string(),
            max_size,
            backwash,
        };
        Ok(self.enqueue(operation, project::reserved))
    }

    /// Queue a commit; see [`Ick::commit`].
    pub fn commit(&mut self, queue: &str, members: &[&str]) -> Result<Deferred<u64>> {
        validate::queue_name(queue)?;
        self.client.count(metric::COMMIT_CALLS);
        let operation = IckOperation::Commit {
            queue: queue.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        };
        Ok(self.enqueue(operation, project::committed))
    }

    /// Queue an exchange; see [`Ick::exchange`].
    pub fn exchange(
        &mut self,
        queue: &str,
        reserve_size: usize,
        commit_members: &[&str],
        backwash: bool,
    ) -> Result<Deferred<(u64, Vec<(String, f64)>)>> {
        validate::queue_name(queue)?;
        self.client.count(metric::EXCHANGE_CALLS);
        let operation = IckOperation::Exchange {
            queue: queue.to_string(),
            reserve_size,
            commit_members: commit_members.iter().map(|m| m.to_string()).collect(),
            backwash,
        };
        Ok(self.enqueue(operation, project::exchanged))
    }

    /// Queue a stats read; see [`Ick::stats`].
    pub fn stats(&mut self, queue: &str) -> Result<Deferred<Option<IckStats>>> {
        validate::queue_name(queue)?;
        self.client.count(metric::STATS_CALLS);
        let operation = IckOperation::Stats {
            queue: queue.to_string(),
        };
        Ok(self.enqueue(operation, project::stats))
    }

    /// Queue a delete; see [`Ick::del`].
    pub fn del(&mut self, queue: &str) -> Result<Deferred<u64>> {
        validate::queue_name(queue)?;
        self.client.count(metric::DEL_CALLS);
        let operation = IckOperation::Delete {
            queue: queue.to_string(),
        };
        Ok(self.enqueue(operation, project::deleted))
    }

    /// Queue an unlink; see [`Ick::unlink`].
    pub fn unlink(&mut self, queue: &str) -> Result<Deferred<u64>> {
        validate::queue_name(queue)?;
        self.client.count(metric::UNLINK_CALLS);
        let operation = IckOperation::Unlink {
            queue: queue.to_string(),
        };
        Ok(self.enqueue(operation, project::deleted))
    }

    fn enqueue<T: Send + 'static>(
        &mut self,
        operation: IckOperation,
        transform: impl FnOnce(IckResponse) -> Result<T> + Send + 'static,
    ) -> Deferred<T> {
        let (deferred, filler) = Deferred::new(transform);
        self.queued.push((operation, filler));
        deferred
    }

    /// Run every queued operation in order, filling the deferred handles.
    ///
    /// Each operation stays individually atomic; per-operation failures
    /// surface when the matching handle is resolved.
    pub fn execute(self) {
        let Pipeline { client, queued } = self;
        tracing::debug!("executing pipeline of {} operations", queued.len());
        for (operation, filler) in queued {
            let result = client.engine().apply(operation).map_err(Error::from);
            filler(result);
        }
    }
}
