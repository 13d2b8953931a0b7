use dtemp_restore_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// CLI progress reporter: one bar over the candidate list.
pub struct CliReporter {
    bar: ProgressBar,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_listing_complete(&self, entries: usize, candidates: usize, sidecars: usize) {
        println!("Files in folder: {}", entries);
        println!("Files without extension: {}", candidates);
        println!("Sidecar files: {}", sidecars);
    }

    fn on_restore_start(&self, total_candidates: usize) {
        let pb = &self.bar;
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.set_length(total_candidates as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Restoring [{bar:30.cyan/dim}] {pos}/{len} files ({eta} remaining)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_item_restored(&self, identifier: &str, _destination: &Path) {
        self.bar.set_message(identifier.to_string());
        self.bar.inc(1);
    }

    fn on_item_skipped(&self, identifier: &str, _reason: &str) {
        self.bar.set_message(identifier.to_string());
        self.bar.inc(1);
    }

    fn on_restore_complete(&self, restored: usize, skipped: usize, duration_secs: f64) {
        self.bar.finish_and_clear();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Restore pass complete: {} restored, {} skipped in {:.2}s",
            restored, skipped, duration_secs
        );
    }
}
