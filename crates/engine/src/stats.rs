//! Read-only structural summaries

use crate::error::Result;
use crate::keys::IckKeys;
use ick_common::{Score, ScoreValue};
use ick_store::StoreTxn;
use serde::{Deserialize, Serialize};

/// Structural summary of one queue.
///
/// Min/max fields are present only when the corresponding set is non-empty;
/// the totals span whichever sets have members. Values are projected through
/// their store-boundary text, so integer-valued scores surface as exact
/// integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IckStats {
    pub key: String,
    pub ver: String,
    pub pset_size: u64,
    pub cset_size: u64,
    pub total_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pset_min: Option<ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pset_max: Option<ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cset_min: Option<ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cset_max: Option<ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_min: Option<ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_max: Option<ScoreValue>,
}

pub(crate) fn collect<T: StoreTxn>(txn: &mut T, keys: &IckKeys, ver: &str) -> Result<IckStats> {
    let pset_size = txn.zcard(&keys.pset)?;
    let cset_size = txn.zcard(&keys.cset)?;

    let (pset_min, pset_max) = endpoints(txn, &keys.pset, pset_size)?;
    let (cset_min, cset_max) = endpoints(txn, &keys.cset, cset_size)?;

    let total_min = merge(pset_min, cset_min, |a, b| a.min(b));
    let total_max = merge(pset_max, cset_max, |a, b| a.max(b));

    Ok(IckStats {
        key: keys.manifest.clone(),
        ver: ver.to_string(),
        pset_size,
        cset_size,
        total_size: pset_size + cset_size,
        pset_min: pset_min.map(ScoreValue::project),
        pset_max: pset_max.map(ScoreValue::project),
        cset_min: cset_min.map(ScoreValue::project),
        cset_max: cset_max.map(ScoreValue::project),
        total_min: total_min.map(ScoreValue::project),
        total_max: total_max.map(ScoreValue::project),
    })
}

fn endpoints<T: StoreTxn>(
    txn: &mut T,
    key: &str,
    size: u64,
) -> Result<(Option<Score>, Option<Score>)> {
    if size == 0 {
        return Ok((None, None));
    }
    let min = txn
        .zrange_withscores(key, 0, 0)?
        .first()
        .map(|(_, score)| *score);
    let max = txn
        .zrange_withscores(key, -1, -1)?
        .first()
        .map(|(_, score)| *score);
    Ok((min, max))
}

fn merge(a: Option<Score>, b: Option<Score>, pick: impl Fn(Score, Score) -> Score) -> Option<Score> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
