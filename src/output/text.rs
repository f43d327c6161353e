//! Human-readable console listing.
//!
//! One block per duplicate group (its fingerprint, then each path), then a
//! one-line summary. Skipped files go to a separate writer so the listing on
//! stdout stays clean when piped.
//!
//! Colors come from `yansi` and follow its global switch, which the CLI
//! turns off for `--no-color`.

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::ScanOutcome;
use crate::scanner::{FileErrorKind, FileFailure};

/// Text output formatter.
pub struct TextOutput<'a> {
    outcome: &'a ScanOutcome,
}

impl<'a> TextOutput<'a> {
    #[must_use]
    pub fn new(outcome: &'a ScanOutcome) -> Self {
        Self { outcome }
    }

    /// Write the group listing and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let report = &self.outcome.report;

        if report.is_empty() {
            writeln!(writer, "{}", "No duplicate images found.".yellow())?;
        }

        for (idx, group) in report.groups().iter().enumerate() {
            writeln!(
                writer,
                "{} {} {}",
                format!("Group {}", idx + 1).bold(),
                format!("({} files)", group.len()).dim(),
                group.fingerprint.cyan()
            )?;
            for path in &group.paths {
                writeln!(writer, "  {}", path.display())?;
            }
            writeln!(writer)?;
        }

        let summary = &self.outcome.summary;
        writeln!(
            writer,
            "{} duplicate groups, {} files ({} redundant) out of {} scanned in {}ms",
            summary.duplicate_groups.bold(),
            summary.duplicate_files,
            report.redundant_files(),
            summary.total_files,
            summary.scan_duration_ms
        )?;
        if summary.failed_files > 0 {
            writeln!(
                writer,
                "{}",
                format!("{} files skipped", summary.failed_files).yellow()
            )?;
        }
        Ok(())
    }

    /// Write one line per skipped file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_skipped<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for failure in &self.outcome.failures {
            write_failure(writer, failure)?;
        }
        Ok(())
    }
}

/// Write a single failure as `skipped: <path>: <kind>: <message>`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_failure<W: Write>(writer: &mut W, failure: &FileFailure) -> io::Result<()> {
    let label = match failure.kind {
        FileErrorKind::Unexpected => "skipped".red(),
        FileErrorKind::UnreadableImage | FileErrorKind::FileAccess => "skipped".yellow(),
    };
    writeln!(
        writer,
        "{}: {}: {}: {}",
        label,
        failure.path.display(),
        failure.kind,
        failure.message
    )
}
