//! Projection of raw engine responses into typed results
//!
//! Immediate-mode calls apply these synchronously; pipelined calls attach
//! them as the one-shot transform on a deferred handle.

use crate::error::{Error, Result};
use ick_engine::{IckResponse, IckStats};

pub(crate) fn added(response: IckResponse) -> Result<(u64, u64)> {
    match response {
        IckResponse::Added {
            num_new,
            num_changed,
        } => Ok((num_new, num_changed)),
        _ => Err(Error::UnexpectedResponse),
    }
}

pub(crate) fn reserved(response: IckResponse) -> Result<Vec<(String, f64)>> {
    match response {
        IckResponse::Reserved(pairs) => Ok(pairs
            .into_iter()
            .map(|(member, score)| (member, score.get()))
            .collect()),
        _ => Err(Error::UnexpectedResponse),
    }
}

pub(crate) fn committed(response: IckResponse) -> Result<u64> {
    match response {
        IckResponse::Committed(count) => Ok(count),
        _ => Err(Error::UnexpectedResponse),
    }
}

pub(crate) fn exchanged(response: IckResponse) -> Result<(u64, Vec<(String, f64)>)> {
    match response {
        IckResponse::Exchanged {
            num_committed,
            reserved,
        } => Ok((
            num_committed,
            reserved
                .into_iter()
                .map(|(member, score)| (member, score.get()))
                .collect(),
        )),
        _ => Err(Error::UnexpectedResponse),
    }
}

pub(crate) fn stats(response: IckResponse) -> Result<Option<IckStats>> {
    match response {
        IckResponse::Stats(stats) => Ok(stats),
        _ => Err(Error::UnexpectedResponse),
    }
}

pub(crate) fn deleted(response: IckResponse) -> Result<u64> {
    match response {
        IckResponse::Deleted(count) => Ok(count),
        _ => Err(Error::UnexpectedResponse),
    }
}
