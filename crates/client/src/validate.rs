//! Caller-input validation
//!
//! Runs before any storage access; a rejected call has no side effects.

use crate::error::{Error, Result};

pub(crate) fn queue_name(name: &str) -> Result<()> {
    ick_common::name::validate(name)?;
    Ok(())
}

pub(crate) fn score_member_pairs(pairs: &[(f64, &str)]) -> Result<()> {
    for (score, member) in pairs {
        if score.is_nan() {
            return Err(Error::Validation(format!(
                "bogus non-numeric score for member {member:?}"
            )));
        }
        if member.is_empty() {
            return Err(Error::Validation(
                "bogus empty member string".to_string(),
            ));
        }
    }
    Ok(())
}
