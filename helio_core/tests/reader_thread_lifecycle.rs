//! Test line-reader thread lifecycle and cleanup to prevent thread leaks.
//!
//! Verifies that:
//! - Threads are properly cleaned up when LineReader is dropped
//! - Multiple readers can be created and destroyed without accumulating threads
//! - The failure contract holds: one Failed event, then the loop is gone

use helio_core::mocks::{FailingSource, ScriptedLines};
use helio_core::reader::{LineReader, ReaderEvent};
use helio_traits::MonotonicClock;
use std::time::Duration;

const READ_TIMEOUT: Duration = Duration::from_millis(20);

fn quiet_source() -> ScriptedLines {
    ScriptedLines::new(Vec::<String>::new())
}

#[test]
fn reader_thread_exits_on_drop() {
    let reader = LineReader::spawn(
        move || Ok(quiet_source()),
        READ_TIMEOUT,
        MonotonicClock::new(),
    );

    // Give the thread time to enter its read loop.
    std::thread::sleep(Duration::from_millis(50));

    // Drop the reader - thread should exit gracefully.
    drop(reader);
}

#[test]
fn multiple_readers_dont_leak_threads() {
    for _ in 0..10 {
        let reader = LineReader::spawn(
            move || Ok(quiet_source()),
            READ_TIMEOUT,
            MonotonicClock::new(),
        );
        std::thread::sleep(Duration::from_millis(5));
        let _ = reader.try_events();
        drop(reader);
    }
}

#[test]
fn reader_stop_is_prompt() {
    let reader = LineReader::spawn(
        move || Ok(quiet_source()),
        READ_TIMEOUT,
        MonotonicClock::new(),
    );
    std::thread::sleep(Duration::from_millis(50));

    let start = std::time::Instant::now();
    reader.stop();
    let elapsed = start.elapsed();

    // Worst case: one in-flight read (bounded by READ_TIMEOUT) + join
    // overhead. Allow generous headroom for loaded CI machines.
    assert!(
        elapsed < Duration::from_millis(500),
        "stop took {elapsed:?}, expected < 500ms"
    );
}

#[test]
fn lines_are_delivered_in_order() {
    let source = ScriptedLines::new(["  {\"a\":1}  ", "{\"b\":2}"]);
    let reader = LineReader::spawn(move || Ok(source), READ_TIMEOUT, MonotonicClock::new());

    let first = reader.recv_timeout(Duration::from_secs(2));
    let second = reader.recv_timeout(Duration::from_secs(2));
    match (first, second) {
        (Some(ReaderEvent::Line(a)), Some(ReaderEvent::Line(b))) => {
            // Lines arrive whitespace-trimmed.
            assert_eq!(a, "{\"a\":1}");
            assert_eq!(b, "{\"b\":2}");
        }
        other => panic!("expected two lines, got {other:?}"),
    }
    reader.stop();
}

#[test]
fn failed_source_emits_one_event_then_the_thread_ends() {
    let reader = LineReader::spawn(
        move || Ok(FailingSource("device unplugged")),
        READ_TIMEOUT,
        MonotonicClock::new(),
    );

    match reader.recv_timeout(Duration::from_secs(2)) {
        Some(ReaderEvent::Failed(e)) => assert!(format!("{e}").contains("device unplugged")),
        other => panic!("expected a failure event, got {other:?}"),
    }
    // The loop has exited; nothing further arrives.
    assert!(reader.recv_timeout(Duration::from_millis(100)).is_none());
    reader.stop();
}
