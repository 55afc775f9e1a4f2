//! Engine configuration

/// Configuration for an [`crate::IckEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Largest member count a single bulk store call may carry. Bulk
    /// inserts and removals touching more members are sliced into
    /// sequential sub-calls inside the same transaction.
    pub batch_ceiling: usize,

    /// Manifest value this engine recognizes and writes.
    pub manifest_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_ceiling: 1024,
            manifest_version: "ick.v1".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bulk-call ceiling (clamped to at least 1).
    pub fn with_batch_ceiling(mut self, ceiling: usize) -> Self {
        self.batch_ceiling = ceiling.max(1);
        self
    }

    /// Set the recognized manifest version.
    pub fn with_manifest_version(mut self, version: impl Into<String>) -> Self {
        self.manifest_version = version.into();
        self
    }
}
