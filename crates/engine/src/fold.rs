//! The min-score-folding rule
//!
//! Used identically wherever a member enters or moves between sets: adds into
//! the producer set, promotion into the consumer set, and backwash. The
//! existing score wins unless the incoming score is strictly lower, so a
//! member's score only ever moves downward.

use ick_common::Score;
use ick_store::StoreTxn;

/// Outcome of folding one member into a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// The member was absent and has been inserted.
    New,
    /// The member existed and its score moved down.
    Changed,
    /// The member existed at an equal or lower score; nothing happened.
    Unchanged,
}

pub(crate) fn fold<T: StoreTxn>(
    txn: &mut T,
    set_key: &str,
    member: &str,
    score: Score,
) -> ick_store::Result<FoldOutcome> {
    match txn.zscore(set_key, member)? {
        None => {
            txn.zadd(set_key, &[(score, member)])?;
            Ok(FoldOutcome::New)
        }
        Some(old) if score.get() < old.get() => {
            txn.zadd(set_key, &[(score, member)])?;
            Ok(FoldOutcome::Changed)
        }
        Some(_) => Ok(FoldOutcome::Unchanged),
    }
}
