// SnapshotCollector tests: clamping, filter/passthrough naming, partial failures

mod common;

use common::{FakeIntrospector, usage};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vmstats::introspector::PoolUsage;
use vmstats::models::PoolCategory;
use vmstats::{Diagnostic, SnapshotCollector};

fn collector(fake: FakeIntrospector) -> SnapshotCollector {
    SnapshotCollector::new(Arc::new(fake))
}

#[test]
fn test_collect_assembles_all_sections() {
    let snap = collector(FakeIntrospector::g1()).collect();

    assert_eq!(snap.uptime, Duration::from_secs(3600));
    assert_eq!(snap.memory.heap_used, 500);
    assert_eq!(snap.memory.heap_committed, 800);
    assert_eq!(snap.memory.heap_max, 1000);
    assert_eq!(snap.memory.heap_used_percent(), 50);
    assert_eq!(snap.memory.non_heap_used, 64);
    assert_eq!(snap.memory.non_heap_committed, 128);
    assert_eq!(snap.threads.count, 12);
    assert_eq!(snap.threads.peak_count, 20);
    assert_eq!(snap.classes.loaded_count, 900);
    assert_eq!(snap.classes.total_loaded_count, 950);
    assert_eq!(snap.classes.unloaded_count, 50);
    assert_eq!(snap.buffer_pools.len(), 1);
    assert_eq!(snap.buffer_pools[0].name, "direct");
    assert_eq!(snap.buffer_pools[0].total_capacity, 4096);
}

#[test]
fn test_collect_clamps_negative_heap_fields_independently() {
    let mut fake = FakeIntrospector::g1();
    fake.heap = usage(-1, 2048, -1);
    fake.non_heap = usage(77, -5, -1);
    let snap = collector(fake).collect();

    assert_eq!(snap.memory.heap_used, 0);
    assert_eq!(snap.memory.heap_committed, 2048);
    assert_eq!(snap.memory.heap_max, 0);
    assert_eq!(snap.memory.heap_used_percent(), -1);
    assert_eq!(snap.memory.non_heap_used, 77);
    assert_eq!(snap.memory.non_heap_committed, 0);
}

#[test]
fn test_collect_truncates_heap_percent_after_clamping() {
    let mut fake = FakeIntrospector::g1();
    fake.heap = usage(333, 500, 1000);
    let snap = collector(fake).collect();
    assert_eq!(snap.memory.heap_used_percent(), 33);
}

#[test]
fn test_collect_drops_unrecognized_pools_and_keeps_order() {
    let snap = collector(FakeIntrospector::g1()).collect();
    let names: Vec<PoolCategory> = snap.memory.pools.iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        vec![PoolCategory::Young, PoolCategory::Old, PoolCategory::Survivor]
    );

    let eden = snap.memory.pool(PoolCategory::Young).unwrap();
    assert_eq!(eden.used, 100);
    assert_eq!(eden.committed, 200);
    assert_eq!(eden.max, 400);
    assert_eq!(eden.peak_used, 101);
    assert_eq!(eden.peak_max, 400);
}

#[test]
fn test_collect_clamps_pool_sentinels() {
    let mut fake = FakeIntrospector::g1();
    fake.pools = vec![(
        "G1 Old Gen".to_string(),
        PoolUsage {
            usage: usage(10, -1, -1),
            peak: usage(-1, 20, -1),
        },
    )];
    let snap = collector(fake).collect();
    let old = &snap.memory.pools[0];
    assert_eq!(old.used, 10);
    assert_eq!(old.committed, 0);
    assert_eq!(old.max, 0);
    assert_eq!(old.peak_used, 0);
    assert_eq!(old.peak_max, 0);
}

#[test]
fn test_collect_skips_a_failing_pool_and_keeps_the_rest() {
    let mut fake = FakeIntrospector::g1();
    fake.pools.retain(|(n, _)| n.starts_with("G1"));
    let fake = fake.with_failing_pool("G1 Survivor Space");

    let snap = collector(fake).collect();
    assert_eq!(snap.memory.pools.len(), 2);
    assert!(snap.memory.pool(PoolCategory::Survivor).is_none());
    assert!(snap.memory.pool(PoolCategory::Young).is_some());
    assert!(snap.memory.pool(PoolCategory::Old).is_some());
}

#[test]
fn test_collect_canonicalizes_known_collectors() {
    let snap = collector(FakeIntrospector::g1()).collect();
    let young = snap.gc.collector("young").unwrap();
    assert_eq!(young.collection_count, 9);
    assert_eq!(young.collection_time, Duration::from_millis(120));
    assert!(snap.gc.collector("old").is_some());
    assert_eq!(snap.gc.total_collection_count(), 9);
}

#[test]
fn test_collect_passes_unknown_collector_names_through() {
    let mut fake = FakeIntrospector::g1();
    fake.collectors[1].name = "ZGC Pauses".into();
    fake.collectors[1].collection_count = 3;
    let snap = collector(fake).collect();

    assert_eq!(snap.gc.collectors.len(), 2);
    assert_eq!(snap.gc.collectors[0].name, "young");
    assert_eq!(snap.gc.collectors[1].name, "ZGC Pauses");
    assert_eq!(snap.gc.collectors[1].collection_count, 3);
}

#[test]
fn test_collect_without_buffer_pool_facility_returns_empty_sequence() {
    let snap = collector(FakeIntrospector::g1().without_buffer_pools()).collect();
    assert!(snap.buffer_pools.is_empty());
    assert_eq!(snap.memory.pools.len(), 3);
}

#[test]
fn test_collect_reports_recovered_failures_to_hook() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let fake = FakeIntrospector::g1()
        .with_failing_pool("G1 Eden Space")
        .without_buffer_pools();
    let collector = collector(fake).with_diagnostics(Arc::new(move |d: &Diagnostic| {
        let label = match d {
            Diagnostic::PoolSkipped { pool, .. } => format!("pool:{pool}"),
            Diagnostic::BufferPoolsUnavailable { .. } => "buffers".to_string(),
        };
        sink.lock().unwrap().push(label);
    }));

    let snap = collector.collect();
    assert_eq!(snap.memory.pools.len(), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["pool:G1 Eden Space".to_string(), "buffers".to_string()]
    );
}

#[test]
fn test_collect_does_not_report_filtered_pools() {
    let seen = Arc::new(Mutex::new(0usize));
    let sink = seen.clone();
    let collector = collector(FakeIntrospector::g1()).with_diagnostics(Arc::new(
        move |_: &Diagnostic| {
            *sink.lock().unwrap() += 1;
        },
    ));
    collector.collect();
    assert_eq!(*seen.lock().unwrap(), 0);
}

#[test]
fn test_consecutive_collects_have_the_same_shape() {
    let collector = collector(FakeIntrospector::g1());
    let first = collector.collect();
    let second = collector.collect();
    assert_eq!(first.shape(), second.shape());
    assert!(second.timestamp >= first.timestamp);
}

#[test]
fn test_concurrent_collects_each_return_valid_snapshots() {
    let fake = Arc::new(FakeIntrospector::g1().with_failing_pool("G1 Old Gen"));
    let collector = Arc::new(SnapshotCollector::new(fake.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let collector = collector.clone();
            std::thread::spawn(move || (0..25).map(|_| collector.collect()).collect::<Vec<_>>())
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        for snap in handle.join().unwrap() {
            assert_eq!(snap.shape().0, vec!["young", "survivor"]);
            assert_eq!(snap.shape().1, vec!["young", "old"]);
            assert_eq!(snap.memory.heap_used_percent(), 50);
            total += 1;
        }
    }
    assert_eq!(total, 200);
    assert!(fake.reads.load(std::sync::atomic::Ordering::SeqCst) > 0);
}
