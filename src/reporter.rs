use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tube_sync::{FetchOutcome, FetchReport, FetchTarget, ProgressReporter};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Listing phase: spinner (remote size unknown upfront)
/// - Fetch phase: progress bar, one line printed above it per finished item
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn println(&self, line: String) {
        match self.bar.lock().ok().as_deref().and_then(Option::as_ref) {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {spinner:.cyan} Fetching [{bar:30.cyan/dim}] {pos}/{len} ({elapsed})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━╸─")
    .tick_chars(TICK_CHARS)
}

impl ProgressReporter for CliReporter {
    fn on_listing_start(&self, playlist_id: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_message(format!("Listing remote playlist {}...", playlist_id));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_listing_complete(&self, remote_items: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Remote playlist: {} videos in {:.2}s",
            "✓".green(),
            remote_items,
            duration_secs
        );
    }

    fn on_fetch_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(bar_style());
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_fetch_item_finished(
        &self,
        target: &FetchTarget,
        outcome: &FetchOutcome,
        done: usize,
        _total: usize,
    ) {
        let line = match outcome {
            FetchOutcome::Fetched => {
                format!("{} Finished downloading {}", "[+]".green().bold(), target.title)
            }
            FetchOutcome::Failed(reason) => format!(
                "{} Could not download {}: {}",
                "[-]".red().bold(),
                target.title,
                reason
            ),
            FetchOutcome::Fatal(reason) => format!(
                "{} Fetch tool failed on {}: {}",
                "[-]".red().bold(),
                target.title,
                reason
            ),
            FetchOutcome::Skipped => return,
        };
        self.println(line);
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(done as u64);
            }
        }
    }

    fn on_fetch_complete(&self, report: &FetchReport) {
        self.finish_bar();
        eprintln!(
            "  {} Fetch complete: {} downloaded, {} failed, {} skipped in {:.2}s",
            "✓".green(),
            report.fetched.len(),
            report.failures.len(),
            report.skipped.len(),
            report.duration.as_secs_f64()
        );
    }

    fn on_delete_complete(&self, deleted: usize, missing: usize) {
        eprintln!(
            "  {} Cleanup complete: {} deleted, {} already gone",
            "✓".green(),
            deleted,
            missing
        );
    }
}
