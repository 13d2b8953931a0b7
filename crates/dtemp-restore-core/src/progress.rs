use std::path::Path;

/// Trait for reporting restoration progress.
///
/// CLI implements with indicatif, tests use `SilentReporter`.
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_listing_complete(&self, _entries: usize, _candidates: usize, _sidecars: usize) {}
    fn on_restore_start(&self, _total_candidates: usize) {}
    fn on_item_restored(&self, _identifier: &str, _destination: &Path) {}
    fn on_item_skipped(&self, _identifier: &str, _reason: &str) {}
    fn on_restore_complete(&self, _restored: usize, _skipped: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
