//! Ick operation types
//!
//! Each variant executes as one atomic store transaction.

use ick_common::{Operation, OperationType, Score};
use serde::{Deserialize, Serialize};

/// Operations the queue engine executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IckOperation {
    /// Fold `(score, member)` pairs into the producer set.
    Add {
        queue: String,
        pairs: Vec<(Score, String)>,
    },

    /// Top up the consumer set to `max_size` from the producer set and
    /// return it; optionally backwash first.
    Reserve {
        queue: String,
        max_size: usize,
        backwash: bool,
    },

    /// Remove completed members from the consumer set.
    Commit { queue: String, members: Vec<String> },

    /// Commit, optionally backwash, then reserve, in one transaction.
    Exchange {
        queue: String,
        reserve_size: usize,
        commit_members: Vec<String>,
        backwash: bool,
    },

    /// Structural summary of the queue, if it exists.
    Stats { queue: String },

    /// Remove the queue's three records, reclaiming space synchronously.
    Delete { queue: String },

    /// Remove the queue's three records, deferring space reclamation.
    Unlink { queue: String },
}

impl IckOperation {
    /// The logical queue name this operation targets.
    pub fn queue(&self) -> &str {
        match self {
            IckOperation::Add { queue, .. }
            | IckOperation::Reserve { queue, .. }
            | IckOperation::Commit { queue, .. }
            | IckOperation::Exchange { queue, .. }
            | IckOperation::Stats { queue }
            | IckOperation::Delete { queue }
            | IckOperation::Unlink { queue } => queue,
        }
    }
}

impl Operation for IckOperation {
    fn operation_type(&self) -> OperationType {
        match self {
            // Reserve mutates: it promotes members between sets.
            IckOperation::Add { .. }
            | IckOperation::Reserve { .. }
            | IckOperation::Commit { .. }
            | IckOperation::Exchange { .. }
            | IckOperation::Delete { .. }
            | IckOperation::Unlink { .. } => OperationType::Write,
            IckOperation::Stats { .. } => OperationType::Read,
        }
    }
}
