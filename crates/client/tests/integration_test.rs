//! Integration tests for the client crate

use ick_client::{Error, Ick, MetricsSink};
use ick_common::ScoreValue;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct RecordingSink {
    counts: Mutex<Vec<String>>,
    timings: Mutex<Vec<(String, u64)>>,
}

impl MetricsSink for RecordingSink {
    fn increment(&self, metric: &str) {
        self.counts.lock().push(metric.to_string());
    }

    fn timing(&self, metric: &str, value: u64) {
        self.timings.lock().push((metric.to_string(), value));
    }
}

#[test]
fn test_full_producer_consumer_cycle() {
    let ick = Ick::new();

    let (num_new, num_changed) = ick.add("q", &[(10.0, "a"), (20.0, "b"), (30.0, "c")]).unwrap();
    assert_eq!((num_new, num_changed), (3, 0));

    let held = ick.reserve("q", 2, false).unwrap();
    assert_eq!(held, vec![("a".to_string(), 10.0), ("b".to_string(), 20.0)]);

    let removed = ick.commit("q", &["a", "b"]).unwrap();
    assert_eq!(removed, 2);

    let stats = ick.stats("q").unwrap().unwrap();
    assert_eq!(stats.pset_size, 1);
    assert_eq!(stats.cset_size, 0);
}

#[test]
fn test_exchange_round_trip() {
    let ick = Ick::new();
    ick.add("q", &[(1.0, "a"), (2.0, "b")]).unwrap();
    ick.reserve("q", 1, false).unwrap();

    let (num_committed, reserved) = ick.exchange("q", 1, &["a"], false).unwrap();
    assert_eq!(num_committed, 1);
    assert_eq!(reserved, vec![("b".to_string(), 2.0)]);
}

#[test]
fn test_validation_rejects_before_storage() {
    let ick = Ick::new();

    assert!(matches!(ick.add("", &[]), Err(Error::Validation(_))));
    assert!(matches!(
        ick.add("a{b}", &[(1.0, "m")]),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        ick.add("q", &[(f64::NAN, "m")]),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        ick.add("q", &[(1.0, "")]),
        Err(Error::Validation(_))
    ));

    // The rejected calls must have left no queue behind.
    assert!(ick.stats("q").unwrap().is_none());
}

#[test]
fn test_del_and_unlink() {
    let ick = Ick::new();
    assert_eq!(ick.del("never").unwrap(), 0);

    ick.add("q", &[(1.0, "a")]).unwrap();
    assert!(ick.del("q").unwrap() >= 1);
    assert!(ick.stats("q").unwrap().is_none());

    ick.add("q", &[(1.0, "a")]).unwrap();
    assert!(ick.unlink("q").unwrap() >= 1);
    assert!(ick.stats("q").unwrap().is_none());
}

#[test]
fn test_stats_score_projection() {
    let ick = Ick::new();
    ick.add("q", &[(5.0, "x")]).unwrap();
    let stats = ick.stats("q").unwrap().unwrap();
    assert_eq!(stats.pset_min, Some(ScoreValue::Int(5)));

    ick.add("q", &[(4.4, "y")]).unwrap();
    let stats = ick.stats("q").unwrap().unwrap();
    assert_eq!(stats.pset_min, Some(ScoreValue::Float(4.4)));
    assert_eq!(stats.pset_max, Some(ScoreValue::Int(5)));
}

#[test]
fn test_metrics_sink_observes_calls() {
    let sink = Arc::new(RecordingSink::default());
    let ick = Ick::new().with_metrics(sink.clone());

    ick.add("q", &[(1.0, "a")]).unwrap();
    ick.reserve("q", 1, false).unwrap();
    ick.commit("q", &["a"]).unwrap();

    let counts = sink.counts.lock();
    assert!(counts.contains(&"profile.ick.ickadd.calls".to_string()));
    assert!(counts.contains(&"profile.ick.ickreserve.calls".to_string()));
    assert!(counts.contains(&"profile.ick.ickcommit.calls".to_string()));

    let timings = sink.timings.lock();
    assert!(
        timings
            .iter()
            .any(|(metric, value)| metric == "profile.ick.ickreserve.num_results" && *value == 1)
    );
}

#[test]
fn test_pipeline_resolves_after_execute() {
    let ick = Ick::new();

    let mut pipeline = ick.pipeline();
    let added = pipeline.add("q", &[(1.0, "a"), (2.0, "b")]).unwrap();
    let held = pipeline.reserve("q", 1, false).unwrap();
    let stats = pipeline.stats("q").unwrap();
    assert_eq!(pipeline.len(), 3);
    pipeline.execute();

    assert_eq!(added.value().unwrap(), (2, 0));
    assert_eq!(held.value().unwrap(), vec![("a".to_string(), 1.0)]);
    let stats = stats.value().unwrap().unwrap();
    assert_eq!(stats.pset_size, 1);
    assert_eq!(stats.cset_size, 1);
}

#[test]
fn test_deferred_before_execution_is_unresolved() {
    let ick = Ick::new();
    let mut pipeline = ick.pipeline();
    let added = pipeline.add("q", &[(1.0, "a")]).unwrap();
    assert!(matches!(added.value(), Err(Error::Unresolved)));
}

#[test]
fn test_deferred_rejects_second_transform() {
    let ick = Ick::new();
    let mut pipeline = ick.pipeline();
    let stats = pipeline.stats("q").unwrap();

    let result = stats.attach(|_| Ok(None));
    assert!(matches!(result, Err(Error::TransformAlreadyAttached)));
}

#[test]
fn test_pipeline_surfaces_per_call_errors_in_handles() {
    // Corrupt one queue by planting a foreign manifest value.
    let store = ick_store::MemoryStore::new();
    ick_store::Store::atomically(&store, |txn| -> ick_store::Result<()> {
        ick_store::StoreTxn::set_if_absent(txn, "bad", "not-an-ick")?;
        Ok(())
    })
    .unwrap();
    let engine = Arc::new(ick_engine::IckEngine::with_store(
        store,
        ick_engine::EngineConfig::default(),
    ));
    let ick = Ick::with_engine(engine);

    let mut pipeline = ick.pipeline();
    let bad = pipeline.stats("bad").unwrap();
    let good = pipeline.add("good", &[(1.0, "m")]).unwrap();
    pipeline.execute();

    assert!(matches!(bad.value(), Err(Error::Engine(_))));
    assert_eq!(good.value().unwrap(), (1, 0));
}

#[test]
fn test_reserve_zero_returns_empty() {
    let ick = Ick::new();
    ick.add("q", &[(1.0, "a")]).unwrap();
    ick.reserve("q", 1, false).unwrap();
    assert!(ick.reserve("q", 0, false).unwrap().is_empty());
}
