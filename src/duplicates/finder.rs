//! Scan scheduler: directories in, fingerprint index out.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives the pipeline:
//! 1. **Enumerate** every requested directory (one or two), flat
//! 2. **Fingerprint** each directory as its own batch, choosing a
//!    sequential or parallel [`ExecutionStrategy`] per batch
//! 3. **Index** every successful `(fingerprint, path)` pair
//! 4. **Report** the fingerprints shared by two or more paths
//!
//! A file that cannot be fingerprinted is recorded as a [`FileFailure`] and
//! skipped; it never aborts the batch. A directory that cannot be listed
//! aborts the whole scan before any file is decoded.
//!
//! # Example
//!
//! ```no_run
//! use pixeldupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_threads(4));
//! let outcome = finder
//!     .find_duplicates(&[Path::new("./camera"), Path::new("./backup")])
//!     .unwrap();
//!
//! for group in outcome.report.groups() {
//!     println!("{}: {:?}", group.fingerprint, group.paths);
//! }
//! for failure in &outcome.failures {
//!     eprintln!("skipped {}", failure);
//! }
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use super::executor::{default_threads, ExecutionStrategy, DEFAULT_PARALLEL_THRESHOLD};
use super::{build_report, DuplicateReport, FingerprintIndex};
use crate::progress::ProgressCallback;
use crate::scanner::{
    list_files, FileErrorKind, FileFailure, Fingerprint, Fingerprinter, ScanError,
};

/// Maximum number of directories in one scan.
pub const MAX_DIRECTORIES: usize = 2;

/// Configuration for the scan scheduler.
#[derive(Clone)]
pub struct FinderConfig {
    /// Batches with more files than this run on a worker pool.
    pub parallel_threshold: usize,
    /// Worker pool size for parallel batches.
    pub threads: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("parallel_threshold", &self.parallel_threshold)
            .field("threads", &self.threads)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "ProgressCallback"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            threads: default_threads(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the batch size above which a worker pool is used.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the worker pool size (minimum 1).
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Statistics for one directory batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Directory the batch was enumerated from
    pub directory: PathBuf,
    /// Regular files found in the directory
    pub files: usize,
    /// Files successfully fingerprinted
    pub fingerprinted: usize,
    /// Files skipped due to failures
    pub failed: usize,
    /// How the batch was executed
    pub strategy: ExecutionStrategy,
    /// Wall-clock time for the batch in milliseconds
    pub duration_ms: u64,
}

/// Summary statistics from a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// One entry per directory, in request order
    pub batches: Vec<BatchSummary>,
    /// Total files enumerated
    pub total_files: usize,
    /// Files successfully fingerprinted
    pub fingerprinted_files: usize,
    /// Files skipped
    pub failed_files: usize,
    /// Distinct fingerprints seen
    pub distinct_fingerprints: usize,
    /// Number of duplicate groups (filled by [`DuplicateFinder::find_duplicates`])
    pub duplicate_groups: usize,
    /// Files belonging to some duplicate group
    pub duplicate_files: usize,
    /// Total scan duration in milliseconds
    pub scan_duration_ms: u64,
}

/// Raw result of [`DuplicateFinder::scan`].
#[derive(Debug)]
pub struct ScanResult {
    /// Every successfully fingerprinted file
    pub index: FingerprintIndex,
    /// Every skipped file with its reason
    pub failures: Vec<FileFailure>,
    /// Statistics
    pub summary: ScanSummary,
}

/// Result of [`DuplicateFinder::find_duplicates`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Duplicate groups
    pub report: DuplicateReport,
    /// Every skipped file with its reason
    pub failures: Vec<FileFailure>,
    /// Statistics
    pub summary: ScanSummary,
}

impl ScanOutcome {
    /// Whether every enumerated file was fingerprinted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Errors that abort a scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// Scans take one or two directories.
    #[error("Expected one or two directories, got {0}")]
    InvalidDirectoryCount(usize),

    /// A directory could not be enumerated.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Scan scheduler for one or two directories.
pub struct DuplicateFinder {
    config: FinderConfig,
    fingerprinter: Fingerprinter,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            fingerprinter: Fingerprinter::new(),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan the given directories and report duplicate groups.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::scan`].
    pub fn find_duplicates<P: AsRef<Path>>(
        &self,
        directories: &[P],
    ) -> Result<ScanOutcome, FinderError> {
        let ScanResult {
            index,
            failures,
            mut summary,
        } = self.scan(directories)?;

        let report = build_report(&index);
        summary.duplicate_groups = report.len();
        summary.duplicate_files = report.duplicate_files();

        log::info!(
            "Found {} duplicate groups ({} files) among {} fingerprinted files",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.fingerprinted_files
        );

        Ok(ScanOutcome {
            report,
            failures,
            summary,
        })
    }

    /// Fingerprint every regular file in the given directories.
    ///
    /// Each directory is a separate batch and its size alone decides
    /// whether it runs on a worker pool.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidDirectoryCount`] unless one or two directories are given
    /// - [`FinderError::Scan`] if any directory cannot be enumerated; nothing
    ///   is fingerprinted in that case
    pub fn scan<P: AsRef<Path>>(&self, directories: &[P]) -> Result<ScanResult, FinderError> {
        if directories.is_empty() || directories.len() > MAX_DIRECTORIES {
            return Err(FinderError::InvalidDirectoryCount(directories.len()));
        }

        let start_time = Instant::now();
        log::info!("Starting scan of {} directory(ies)", directories.len());

        let batches = directories
            .iter()
            .map(|dir| {
                let dir = dir.as_ref();
                list_files(dir).map(|files| (dir.to_path_buf(), files))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let index = FingerprintIndex::new();
        let mut failures = Vec::new();
        let mut summary = ScanSummary::default();

        for (directory, files) in batches {
            let (batch, batch_failures) = self.scan_batch(&directory, files, &index);
            summary.total_files += batch.files;
            summary.fingerprinted_files += batch.fingerprinted;
            summary.failed_files += batch.failed;
            summary.batches.push(batch);
            failures.extend(batch_failures);
        }

        summary.distinct_fingerprints = index.len();
        summary.scan_duration_ms = start_time.elapsed().as_millis() as u64;

        log::info!(
            "Scan complete: {} files, {} fingerprinted, {} skipped in {}ms",
            summary.total_files,
            summary.fingerprinted_files,
            summary.failed_files,
            summary.scan_duration_ms
        );

        Ok(ScanResult {
            index,
            failures,
            summary,
        })
    }

    /// Fingerprint one directory's files into `index`.
    fn scan_batch(
        &self,
        directory: &Path,
        files: Vec<PathBuf>,
        index: &FingerprintIndex,
    ) -> (BatchSummary, Vec<FileFailure>) {
        let start_time = Instant::now();
        let total = files.len();
        let strategy =
            ExecutionStrategy::select(total, self.config.parallel_threshold, self.config.threads);

        log::info!(
            "Scanning {} ({} files, {})",
            directory.display(),
            total,
            strategy
        );

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_batch_start(directory, total, strategy);
        }

        let completed = AtomicUsize::new(0);
        let outcomes = strategy.map(files, |path| {
            let outcome = match self.process_file(&path) {
                Ok(fingerprint) => {
                    log::trace!("{} -> {}", path.display(), fingerprint);
                    index.insert(fingerprint, path.clone());
                    None
                }
                Err(failure) => {
                    report_failure(&failure);
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_file_failed(&failure);
                    }
                    Some(failure)
                }
            };

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(done, &path);
            }
            outcome
        });

        let failures: Vec<FileFailure> = outcomes.into_iter().flatten().collect();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_batch_end(directory);
        }

        let batch = BatchSummary {
            directory: directory.to_path_buf(),
            files: total,
            fingerprinted: total - failures.len(),
            failed: failures.len(),
            strategy,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        log::debug!(
            "Batch {} done: {} fingerprinted, {} skipped",
            directory.display(),
            batch.fingerprinted,
            batch.failed
        );

        (batch, failures)
    }

    /// Decode and fingerprint one file, turning a panic in the decoder or
    /// hasher into an `Unexpected` failure.
    fn process_file(&self, path: &Path) -> Result<Fingerprint, FileFailure> {
        match panic::catch_unwind(AssertUnwindSafe(|| {
            self.fingerprinter.fingerprint_file(path)
        })) {
            Ok(result) => result,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "panic while processing file".to_string());
                Err(FileFailure::new(path, FileErrorKind::Unexpected, message))
            }
        }
    }
}

fn report_failure(failure: &FileFailure) {
    match failure.kind {
        FileErrorKind::Unexpected => log::error!("Skipping {}", failure),
        FileErrorKind::UnreadableImage | FileErrorKind::FileAccess => {
            log::warn!("Skipping {}", failure)
        }
    }
}
