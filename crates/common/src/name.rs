//! Queue name validation
//!
//! The three storage keys of a queue are derived from its logical name, and
//! the derived producer/consumer keys embed the name as a `{...}` hash tag so
//! all three keys land on the same storage partition. A name that itself
//! contains a hash-tag delimiter would make the manifest key and the derived
//! keys hash to different partitions, so such names are rejected outright.

use thiserror::Error;

/// A queue name the key scheme cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("queue name must be a non-empty string")]
    Empty,

    #[error("queue name {0:?} contains a hash-tag delimiter")]
    HashTagDelimiter(String),
}

/// Checks that a logical queue name is usable as a key-scheme base.
pub fn validate(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(['{', '}']) {
        return Err(NameError::HashTagDelimiter(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        assert!(validate("dirty-contacts").is_ok());
        assert!(validate("a").is_ok());
        assert!(validate("jobs/2024").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate(""), Err(NameError::Empty));
    }

    #[test]
    fn test_rejects_hash_tag_delimiters() {
        assert!(matches!(
            validate("jobs{shard1}"),
            Err(NameError::HashTagDelimiter(_))
        ));
        assert!(matches!(
            validate("odd}name"),
            Err(NameError::HashTagDelimiter(_))
        ));
    }
}
