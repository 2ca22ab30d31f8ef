use crate::fetch::{FetchOutcome, FetchReport};
use crate::model::FetchTarget;

/// Trait for reporting sync progress.
///
/// CLI implements with tracing/indicatif, tests can record events.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_complete(&self, _local_files: usize) {}
    fn on_listing_start(&self, _playlist_id: &str) {}
    fn on_listing_complete(&self, _remote_items: usize, _duration_secs: f64) {}
    fn on_fetch_start(&self, _total: usize) {}
    /// Called from a worker thread each time one target finishes, in
    /// completion order.
    fn on_fetch_item_finished(
        &self,
        _target: &FetchTarget,
        _outcome: &FetchOutcome,
        _done: usize,
        _total: usize,
    ) {
    }
    fn on_fetch_complete(&self, _report: &FetchReport) {}
    fn on_delete_start(&self, _total: usize) {}
    fn on_delete_complete(&self, _deleted: usize, _missing: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
