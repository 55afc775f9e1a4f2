//! Optional metrics collaborator
//!
//! Mirrors a statsd-style proxy: counters and timings, with whole-call
//! timing handled by the client wrapping each engine round trip. When no
//! sink is configured, every instrumentation point is a no-op.

/// Sink for operation counters and timings.
pub trait MetricsSink: Send + Sync {
    /// Report a single count on the metric.
    fn increment(&self, metric: &str);

    /// Report a measured value (a duration in milliseconds, or a size)
    /// on the metric.
    fn timing(&self, metric: &str, value: u64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        counts: Mutex<Vec<String>>,
    }

    impl MetricsSink for RecordingSink {
        fn increment(&self, metric: &str) {
            self.counts.lock().push(metric.to_string());
        }

        fn timing(&self, _metric: &str, _value: u64) {}
    }

    #[test]
    fn test_sink_is_object_safe() {
        let sink: Box<dyn MetricsSink> = Box::new(RecordingSink::default());
        sink.increment("profile.ick.ickadd.calls");
    }
}
