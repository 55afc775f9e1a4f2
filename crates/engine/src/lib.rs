//! The Ick queue algorithm
//!
//! A queue is a manifest string plus two ordered member sets living at keys
//! derived from one logical name:
//!
//! - the producer set, where freshly dirty items enter via add;
//! - the consumer set, where items sit between reserve and commit.
//!
//! Producers add `(score, member)` pairs; re-adding an existing member keeps
//! the lowest of the old and new scores, so scores only move downward.
//! Consumers reserve the lowest-scored items into the consumer set, process
//! them, and commit them out. The exchange operation performs
//! commit-then-reserve (with optional backwash) in one atomic round trip.
//!
//! Every operation runs as a single atomic store transaction, and starts by
//! verifying that the three derived keys still look like an Ick.

mod chunk;
mod config;
mod engine;
mod error;
mod exchange;
mod fold;
mod guard;
mod keys;
mod stats;
pub mod types;

pub use config::EngineConfig;
pub use engine::IckEngine;
pub use error::{Error, Result};
pub use fold::FoldOutcome;
pub use keys::IckKeys;
pub use stats::IckStats;
pub use types::{IckOperation, IckResponse};
