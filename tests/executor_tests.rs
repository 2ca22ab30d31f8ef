use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tube_sync::fetch::execute;
use tube_sync::{
    FetchError, FetchOutcome, FetchReport, FetchTarget, FetchTool, ProgressReporter, RemoteItem,
    SilentReporter,
};

fn targets(n: usize) -> Vec<FetchTarget> {
    (1..=n)
        .map(|i| RemoteItem::new(format!("id{}", i), format!("Song {}", i)).to_fetch_target())
        .collect()
}

/// Fake tool that sleeps a little, fails on chosen ids and tracks how many
/// fetches run at once.
struct ScriptedTool {
    recoverable: Vec<&'static str>,
    fatal: Vec<&'static str>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTool {
    fn new(delay_ms: u64) -> Self {
        Self {
            recoverable: Vec::new(),
            fatal: Vec::new(),
            delay: Duration::from_millis(delay_ms),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FetchTool for ScriptedTool {
    fn fetch(&self, target: &FetchTarget) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(target.id.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = if self.fatal.iter().any(|id| *id == target.id) {
            Err(FetchError::Fatal("extractor is broken".to_string()))
        } else {
            thread::sleep(self.delay);
            if self.recoverable.iter().any(|id| *id == target.id) {
                Err(FetchError::Recoverable("Video unavailable".to_string()))
            } else {
                Ok(())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
struct RecordingReporter {
    finished: Mutex<Vec<(String, usize)>>,
    completed: Mutex<Option<usize>>,
}

impl ProgressReporter for RecordingReporter {
    fn on_fetch_item_finished(
        &self,
        target: &FetchTarget,
        _outcome: &FetchOutcome,
        done: usize,
        _total: usize,
    ) {
        self.finished.lock().unwrap().push((target.id.clone(), done));
    }

    fn on_fetch_complete(&self, report: &FetchReport) {
        *self.completed.lock().unwrap() = Some(report.attempted());
    }
}

#[test]
fn test_recoverable_failure_does_not_stop_batch() {
    let mut tool = ScriptedTool::new(20);
    tool.recoverable = vec!["id3"];

    let report = execute(&targets(5), 2, &tool, &SilentReporter).unwrap();

    assert_eq!(tool.calls().len(), 5);
    assert_eq!(report.fetched.len(), 4);
    assert_eq!(report.recoverable_failures(), 1);
    assert_eq!(report.failures[0].target.id, "id3");
    assert_eq!(report.failures[0].reason, "Video unavailable");
    assert!(report.skipped.is_empty());
    assert!(!report.is_fatal());
}

#[test]
fn test_fatal_failure_halts_submission() {
    let mut tool = ScriptedTool::new(50);
    tool.fatal = vec!["id1"];

    let report = execute(&targets(5), 2, &tool, &SilentReporter).unwrap();

    assert!(report.is_fatal());
    assert_eq!(report.fatal.as_ref().unwrap().target.id, "id1");
    // id1 plus at most the one sibling that was already running
    assert!(report.attempted() <= 2, "attempted {}", report.attempted());
    assert_eq!(report.attempted() + report.skipped.len(), 5);
    assert!(tool.calls().len() <= 2);
}

#[test]
fn test_fatal_failure_single_worker_skips_rest() {
    let mut tool = ScriptedTool::new(1);
    tool.fatal = vec!["id1"];

    let report = execute(&targets(5), 1, &tool, &SilentReporter).unwrap();

    assert_eq!(tool.calls(), vec!["id1"]);
    let skipped: Vec<&str> = report.skipped.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(skipped, vec!["id2", "id3", "id4", "id5"]);
}

#[test]
fn test_concurrency_is_bounded() {
    let tool = ScriptedTool::new(30);

    let report = execute(&targets(12), 3, &tool, &SilentReporter).unwrap();

    assert_eq!(report.fetched.len(), 12);
    let max = tool.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "saw {} concurrent fetches", max);
    assert!(max >= 2, "expected parallel fetches, saw {}", max);
}

#[test]
fn test_submission_follows_input_order_with_one_worker() {
    let tool = ScriptedTool::new(0);

    execute(&targets(4), 1, &tool, &SilentReporter).unwrap();

    assert_eq!(tool.calls(), vec!["id1", "id2", "id3", "id4"]);
}

#[test]
fn test_reports_each_finished_item() {
    let mut tool = ScriptedTool::new(5);
    tool.recoverable = vec!["id2"];
    let reporter = RecordingReporter::default();

    execute(&targets(4), 2, &tool, &reporter).unwrap();

    let finished = reporter.finished.lock().unwrap().clone();
    assert_eq!(finished.len(), 4);
    let mut counts: Vec<usize> = finished.iter().map(|(_, done)| *done).collect();
    counts.sort();
    assert_eq!(counts, vec![1, 2, 3, 4]);
    let mut ids: Vec<String> = finished.into_iter().map(|(id, _)| id).collect();
    ids.sort();
    assert_eq!(ids, vec!["id1", "id2", "id3", "id4"]);
    assert_eq!(*reporter.completed.lock().unwrap(), Some(4));
}
