use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use unisprite_core::ProgressReporter;

/// CLI progress reporter using an indicatif bar over the candidate list.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_replace_start(&self, total_candidates: usize) {
        let pb = ProgressBar::new(total_candidates as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Replacing [{bar:30.cyan/dim}] {pos}/{len} {wide_msg}",
        ) {
            pb.set_style(
                style
                    .progress_chars("━╸─")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_file_progress(&self, index: usize, _total: usize, path: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_position(index as u64);
            pb.set_message(path.to_string());
        }
    }

    fn on_file_rewritten(&self, path: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.println(format!("  \x1b[33m~\x1b[0m {}", path));
        }
    }

    fn on_replace_complete(&self, modified: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Replace complete: {} files rewritten in {:.2}s",
            modified, duration_secs
        );
    }
}
