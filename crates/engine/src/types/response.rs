//! Ick response types

use crate::stats::IckStats;
use ick_common::{Response, Score};
use serde::{Deserialize, Serialize};

/// Responses produced by queue operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IckResponse {
    /// New members inserted and existing scores lowered.
    Added { num_new: u64, num_changed: u64 },

    /// Reserved members, ascending by score.
    Reserved(Vec<(String, Score)>),

    /// Members removed from the consumer set.
    Committed(u64),

    /// Commit count plus the reserved members.
    Exchanged {
        num_committed: u64,
        reserved: Vec<(String, Score)>,
    },

    /// Structural summary, or `None` for a queue that does not exist.
    Stats(Option<IckStats>),

    /// Underlying records removed.
    Deleted(u64),
}

impl Response for IckResponse {}
