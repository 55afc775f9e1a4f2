//! Operation traits

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Type of operation - read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// Read operation - does not modify state
    Read,
    /// Write operation - modifies state
    Write,
}

/// Trait for operations executed as single atomic transactions
pub trait Operation:
    serde::de::DeserializeOwned + serde::Serialize + Send + Sync + Debug + Clone + PartialEq
{
    /// Get the type of this operation (read or write)
    fn operation_type(&self) -> OperationType;

    /// Convert this operation to a JSON value for pattern analysis
    fn as_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestOperation {
        target: String,
        is_write: bool,
    }

    impl Operation for TestOperation {
        fn operation_type(&self) -> OperationType {
            if self.is_write {
                OperationType::Write
            } else {
                OperationType::Read
            }
        }
    }

    #[test]
    fn test_operation_traits() {
        let op = TestOperation {
            target: "queue-a".to_string(),
            is_write: false,
        };

        assert_eq!(op.operation_type(), OperationType::Read);

        let json = op.as_json_value();
        assert!(json.is_object());
    }
}
