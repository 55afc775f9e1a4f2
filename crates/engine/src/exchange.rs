//! The atomic commit-then-reserve routine
//!
//! One parameterized sequence serves reserve, commit, and exchange:
//!
//! 1. remove the named members from the consumer set (commit);
//! 2. optionally fold every remaining consumer member back into the producer
//!    set and clear the consumer set (backwash);
//! 3. promote lowest-scored producer members into the consumer set until it
//!    reaches the target size or the producer set is exhausted;
//! 4. ensure the manifest exists.
//!
//! The commit step must fully complete before promotion begins: a member
//! that became dirty again while reserved must be observed as committed
//! before it can be handed back, otherwise callers receive stale or empty
//! reservations.

use crate::chunk::chunks;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::fold::fold;
use crate::keys::IckKeys;
use ick_common::Score;
use ick_store::StoreTxn;

/// What one exchange accomplished.
#[derive(Debug, Clone)]
pub(crate) struct ExchangeOutcome {
    /// Members actually removed from the consumer set in the commit step.
    pub num_committed: u64,
    /// The first `reserve_size` consumer members, ascending by score.
    pub reserved: Vec<(String, Score)>,
}

pub(crate) fn run<T: StoreTxn>(
    txn: &mut T,
    keys: &IckKeys,
    config: &EngineConfig,
    reserve_size: usize,
    commit_members: &[String],
    backwash: bool,
) -> Result<ExchangeOutcome> {
    let ceiling = config.batch_ceiling;

    // Step 1: commit. Chunked so no single removal exceeds the ceiling.
    let mut num_committed = 0u64;
    for chunk in chunks(commit_members, ceiling) {
        let members: Vec<&str> = chunk.iter().map(String::as_str).collect();
        num_committed += txn.zrem(&keys.cset, &members)?;
    }

    // Step 2: backwash. Fold everything still reserved back into the
    // producer set, then clear the consumer set.
    if backwash {
        loop {
            let held = txn.zrange_withscores(&keys.cset, 0, ceiling as i64 - 1)?;
            if held.is_empty() {
                break;
            }
            for (member, score) in &held {
                fold(txn, &keys.pset, member, *score)?;
            }
            let members: Vec<&str> = held.iter().map(|(m, _)| m.as_str()).collect();
            txn.zrem(&keys.cset, &members)?;
        }
    }

    // Step 3: promote. Folding may drop duplicates, so the consumer set can
    // grow by less than a full chunk per round; loop until it is topped up
    // or the producer set runs dry.
    loop {
        let cset_size = txn.zcard(&keys.cset)? as usize;
        if cset_size >= reserve_size {
            break;
        }
        let wanted = (reserve_size - cset_size).min(ceiling);
        let lowest = txn.zrange_withscores(&keys.pset, 0, wanted as i64 - 1)?;
        if lowest.is_empty() {
            break;
        }
        for (member, score) in &lowest {
            fold(txn, &keys.cset, member, *score)?;
        }
        let members: Vec<&str> = lowest.iter().map(|(m, _)| m.as_str()).collect();
        txn.zrem(&keys.pset, &members)?;
    }

    // Step 4: the queue exists once anything has exchanged against it.
    txn.set_if_absent(&keys.manifest, &config.manifest_version)?;

    let reserved = if reserve_size == 0 {
        Vec::new()
    } else {
        txn.zrange_withscores(&keys.cset, 0, reserve_size as i64 - 1)?
    };

    Ok(ExchangeOutcome {
        num_committed,
        reserved,
    })
}
