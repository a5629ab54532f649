/// Trait for reporting replacement progress.
///
/// CLI implements with indicatif. All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_replace_start(&self, _total_candidates: usize) {}
    fn on_file_progress(&self, _index: usize, _total: usize, _path: &str) {}
    fn on_file_rewritten(&self, _path: &str) {}
    fn on_replace_complete(&self, _modified: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
