//! Scores and their store-boundary text encoding
//!
//! A score orders members within a set; lower scores pop out first.
//! Suggested usage is a Unix timestamp recording when an item became dirty.
//! At the store boundary scores travel as decimal text, with `inf`/`-inf`
//! standing in for the signed infinities.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Largest magnitude at which every f64 still represents an exact integer.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Ordering key for a queue member.
///
/// Wraps an `f64` with a total order (`f64::total_cmp`) so scores can key
/// ordered collections directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Self {
        Score(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Encodes this score as store-boundary text.
    ///
    /// Integer-valued scores serialize without a decimal point; fractional
    /// scores serialize with one; the infinities become `inf`/`-inf`.
    pub fn encode(self) -> String {
        if self.0.is_infinite() {
            return if self.0 < 0.0 { "-inf" } else { "inf" }.to_string();
        }
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INT {
            return format!("{}", self.0 as i64);
        }
        format!("{}", self.0)
    }

    /// Decodes store-boundary text into a score.
    ///
    /// Any text starting with `inf` or `-inf` (case-insensitive) parses to
    /// the corresponding signed infinity.
    pub fn decode(text: &str) -> Result<Self, ScoreParseError> {
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if magnitude
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("inf"))
        {
            let value = if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            return Ok(Score(value));
        }
        text.parse::<f64>()
            .map(Score)
            .map_err(|_| ScoreParseError(text.to_string()))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A min/max statistic projected back from its store-boundary text.
///
/// Text that is all digits (optionally signed) round-trips as an exact
/// integer; everything else comes back as a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Int(i64),
    Float(f64),
}

impl ScoreValue {
    pub fn parse(text: &str) -> Result<Self, ScoreParseError> {
        if is_integer_text(text) {
            return text
                .parse::<i64>()
                .map(ScoreValue::Int)
                .map_err(|_| ScoreParseError(text.to_string()));
        }
        Score::decode(text).map(|score| ScoreValue::Float(score.get()))
    }

    /// Projects a score through its text encoding, so that integer-valued
    /// scores surface as exact integers.
    pub fn project(score: Score) -> Self {
        Self::parse(&score.encode()).unwrap_or(ScoreValue::Float(score.get()))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            ScoreValue::Int(i) => i as f64,
            ScoreValue::Float(f) => f,
        }
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Text at the store boundary that does not parse as a score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed score text: {0:?}")]
pub struct ScoreParseError(pub String);
