//! Stress tests for concurrent producers and worker startup
//!
//! These tests verify:
//! - All tasks from many concurrent producers are emitted exactly once
//! - Per-producer submission order survives into emission order
//! - Concurrent first use spawns exactly one worker
//! - High-volume drain completeness

use deferlog::prelude::*;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Default)]
struct CollectingSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl Sink for CollectingSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

#[test]
fn test_concurrent_producers_all_emitted_in_producer_order() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 200;

    let sink = CollectingSink::default();
    let records = Arc::clone(&sink.records);
    let dispatcher = Arc::new(
        AsyncDispatcher::builder()
            .min_level(LogLevel::Trace)
            .sink(sink)
            .build(),
    );

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    dispatcher
                        .event(LogLevel::Info)
                        .message("p {} s {}")
                        .arg(producer as i64)
                        .arg(seq as i64)
                        .log();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    dispatcher.shutdown();

    let records = records.lock();
    assert_eq!(records.len(), PRODUCERS * PER_PRODUCER);

    // Emission order must be consistent with each producer's submission
    // order: per-producer sequence numbers appear strictly increasing.
    let mut last_seq = vec![-1i64; PRODUCERS];
    for record in records.iter() {
        let producer = match record.args[0] {
            ArgValue::Int(p) => p as usize,
            ref other => panic!("unexpected producer arg: {:?}", other),
        };
        let seq = match record.args[1] {
            ArgValue::Int(s) => s,
            ref other => panic!("unexpected seq arg: {:?}", other),
        };
        assert!(
            seq > last_seq[producer],
            "producer {} emitted {} after {}",
            producer,
            seq,
            last_seq[producer]
        );
        last_seq[producer] = seq;
    }
}

#[test]
fn test_concurrent_first_use_spawns_single_worker() {
    const THREADS: usize = 16;

    let sink = CollectingSink::default();
    let records = Arc::clone(&sink.records);
    let dispatcher = Arc::new(
        AsyncDispatcher::builder()
            .min_level(LogLevel::Trace)
            .sink(sink)
            .build(),
    );

    // All producers race the very first submission through a barrier.
    let barrier = Arc::new(std::sync::Barrier::new(THREADS));
    let worker_ids = Arc::new(Mutex::new(HashSet::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            let barrier = Arc::clone(&barrier);
            let worker_ids = Arc::clone(&worker_ids);
            std::thread::spawn(move || {
                barrier.wait();
                let ids = Arc::clone(&worker_ids);
                dispatcher
                    .event(LogLevel::Info)
                    .message("racer {}")
                    .arg(i as i64)
                    .arg_with(move || {
                        ids.lock()
                            .insert(format!("{:?}", std::thread::current().id()));
                        0i64
                    })
                    .log();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    dispatcher.shutdown();

    assert_eq!(records.lock().len(), THREADS);
    assert_eq!(
        worker_ids.lock().len(),
        1,
        "every deferred evaluation must run on the same single worker"
    );
}

#[test]
fn test_high_volume_drain_loses_nothing() {
    const TASKS: usize = 20_000;

    let sink = CollectingSink::default();
    let records = Arc::clone(&sink.records);
    let dispatcher = AsyncDispatcher::builder()
        .min_level(LogLevel::Trace)
        .sink(sink)
        .build();

    for i in 0..TASKS {
        dispatcher
            .event(LogLevel::Debug)
            .message("bulk {}")
            .arg(i as i64)
            .log();
    }
    dispatcher.shutdown();

    assert_eq!(records.lock().len(), TASKS);
    assert_eq!(dispatcher.metrics().submitted_count(), TASKS as u64);
    assert_eq!(dispatcher.metrics().emitted_count(), TASKS as u64);
    assert_eq!(dispatcher.metrics().in_flight(), 0);
}

#[test]
fn test_independent_dispatchers_do_not_share_state() {
    let sink_a = CollectingSink::default();
    let sink_b = CollectingSink::default();
    let records_a = Arc::clone(&sink_a.records);
    let records_b = Arc::clone(&sink_b.records);

    let a = AsyncDispatcher::builder()
        .min_level(LogLevel::Info)
        .sink(sink_a)
        .build();
    let b = AsyncDispatcher::builder()
        .min_level(LogLevel::Error)
        .sink(sink_b)
        .build();

    a.info("for a");
    b.info("gated off for b");
    b.error("for b");

    a.shutdown();
    // a's shutdown must not affect b
    b.error("still accepted");
    b.shutdown();

    assert_eq!(records_a.lock().len(), 1);
    assert_eq!(records_b.lock().len(), 2);
}
