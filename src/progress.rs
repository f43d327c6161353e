//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements [`ProgressCallback`]
//! to display one progress bar per scanned directory in the terminal.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::duplicates::ExecutionStrategy;
use crate::scanner::FileFailure;

/// Progress callback for scan batches.
///
/// Implement this trait to receive progress updates while the scheduler
/// fingerprints a directory. Methods may be called from worker threads.
pub trait ProgressCallback: Send + Sync {
    /// Called when a directory batch starts.
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory being scanned
    /// * `total` - Number of files in the batch
    /// * `strategy` - How the batch will be executed
    fn on_batch_start(&self, directory: &Path, total: usize, strategy: ExecutionStrategy);

    /// Called after each file has been processed, successfully or not.
    ///
    /// # Arguments
    ///
    /// * `completed` - Files finished so far in this batch (1-based)
    /// * `path` - The file just finished
    fn on_progress(&self, completed: usize, path: &Path);

    /// Called when a file is skipped.
    fn on_file_failed(&self, _failure: &FileFailure) {}

    /// Called when a directory batch completes.
    fn on_batch_end(&self, directory: &Path);
}

/// Progress reporter using indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    skipped: AtomicUsize,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixeldupe::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            skipped: AtomicUsize::new(0),
            quiet,
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_batch_start(&self, directory: &Path, total: usize, strategy: ExecutionStrategy) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::batch_style());
        pb.set_prefix(format!("{} [{}]", directory.display(), strategy));
        self.skipped.store(0, Ordering::Relaxed);
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        *bar = Some(pb);
    }

    fn on_progress(&self, _completed: usize, _path: &Path) {
        // Pool workers finish out of order, so count rather than seek
        let bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ref pb) = *bar {
            pb.inc(1);
        }
    }

    fn on_file_failed(&self, _failure: &FileFailure) {
        let skipped = self.skipped.fetch_add(1, Ordering::Relaxed) + 1;
        let bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ref pb) = *bar {
            pb.set_message(format!("{} skipped", skipped));
        }
    }

    fn on_batch_end(&self, _directory: &Path) {
        let mut bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = bar.take() {
            pb.finish_and_clear();
        }
    }
}
