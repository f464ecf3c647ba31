// 並行性・ライフサイクル統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::RecordingReporter;
use line_parser::{
    BoundedQueue, DefaultParserConfig, MemoryLineSource, NoOpProgressReporter, ParserError,
    ParsingPipeline,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

fn numbered_lines(count: usize) -> MemoryLineSource {
    MemoryLineSource::from_lines((0..count).map(|i| format!("line-{i}")))
}

#[test]
fn test_second_run_rejected_while_running() {
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(2).with_queue_capacity(2),
        NoOpProgressReporter::new(),
    );
    let source = numbered_lines(20);
    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);

    let first = thread::scope(|scope| {
        let running = scope.spawn(|| {
            pipeline.run_raw(
                &source,
                |_: u64, raw: &str| {
                    if raw == "line-0" {
                        entered_tx.lock().unwrap().send(()).unwrap();
                        release_rx.lock().unwrap().recv().unwrap();
                    }
                },
                1_000,
            )
        });

        entered_rx.recv_timeout(Duration::from_secs(10)).unwrap();

        let rejected_calls = AtomicUsize::new(0);
        let rejected = pipeline.run_raw(
            &source,
            |_: u64, _: &str| {
                rejected_calls.fetch_add(1, Ordering::SeqCst);
            },
            1_000,
        );
        assert!(matches!(rejected, Err(ParserError::AlreadyRunning)));
        assert_eq!(rejected_calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.is_running());

        release_tx.send(()).unwrap();
        running.join().unwrap()
    });

    // 拒否された呼び出しは実行中の処理に影響しない
    assert_eq!(first.unwrap().lines_processed, 20);
    assert!(!pipeline.is_running());
}

#[test]
fn test_progress_is_counted_per_worker() {
    let reporter = RecordingReporter::new();
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(4).with_queue_capacity(4),
        &reporter,
    );

    let summary = pipeline
        .run_raw(&numbered_lines(100), |_: u64, _: &str| {}, 10)
        .unwrap();

    assert_eq!(summary.worker_count(), 4);
    assert_eq!(summary.lines_processed, 100);
    for stats in &summary.workers {
        let reports = reporter.progress_for(stats.worker_id);
        let expected: Vec<u64> = (1..=stats.processed / 10).map(|n| n * 10).collect();
        assert_eq!(reports, expected, "worker {}", stats.worker_id);
        assert_eq!(stats.progress_reports, stats.processed / 10);
    }
}

#[test]
fn test_consumption_indices_unique_and_dense() {
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(8).with_queue_capacity(16),
        NoOpProgressReporter::new(),
    );
    let indices = Mutex::new(Vec::new());

    pipeline
        .run_raw(
            &numbered_lines(5_000),
            |index: u64, _: &str| indices.lock().unwrap().push(index),
            1_000,
        )
        .unwrap();

    let indices = indices.into_inner().unwrap();
    let unique: HashSet<u64> = indices.iter().copied().collect();
    assert_eq!(indices.len(), 5_000);
    assert_eq!(unique, (0..5_000).collect());
}

#[test]
fn test_single_worker_preserves_input_order() {
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(1).with_queue_capacity(3),
        NoOpProgressReporter::new(),
    );
    let seen = Mutex::new(Vec::new());

    pipeline
        .run_raw(
            &numbered_lines(50),
            |index: u64, raw: &str| seen.lock().unwrap().push((index, raw.to_string())),
            1_000,
        )
        .unwrap();

    let seen = seen.into_inner().unwrap();
    for (position, (index, raw)) in seen.iter().enumerate() {
        assert_eq!(*index, position as u64);
        assert_eq!(raw, &format!("line-{position}"));
    }
}

#[test]
fn test_capacity_one_backpressure() {
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(3).with_queue_capacity(1),
        NoOpProgressReporter::new(),
    );
    let count = AtomicUsize::new(0);

    let summary = pipeline
        .run_raw(
            &numbered_lines(1_000),
            |_: u64, _: &str| {
                count.fetch_add(1, Ordering::SeqCst);
            },
            100,
        )
        .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1_000);
    assert_eq!(summary.lines_read, 1_000);
}

#[test]
fn test_queue_never_exceeds_capacity() {
    let queue = BoundedQueue::new(4);
    let observed_max = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..3 {
            scope.spawn(|| {
                while queue.pop().is_some() {
                    observed_max.fetch_max(queue.len(), Ordering::SeqCst);
                }
            });
        }

        for i in 0..2_000 {
            assert!(queue.push(i));
            observed_max.fetch_max(queue.len(), Ordering::SeqCst);
        }
        queue.close();
    });

    assert!(observed_max.load(Ordering::SeqCst) <= 4);
    assert!(queue.is_empty());
}
