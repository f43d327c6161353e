//! CSV output formatter for scan results.
//!
//! One row per file. Duplicate rows come first, numbered by group; skipped
//! files follow with an empty `group_id` and their reason.
//!
//! # Columns
//!
//! - `group_id`: 1-based group number (empty for skipped files)
//! - `status`: `duplicate` or `skipped`
//! - `structural`: structural hash as hex (empty for skipped files)
//! - `color`: color hash as hex (empty for skipped files)
//! - `path`: file path
//! - `reason`: failure kind and message (empty for duplicates)

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateReport;
use crate::scanner::FileFailure;

const HEADER: [&str; 6] = ["group_id", "status", "structural", "color", "path", "reason"];

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: Option<usize>,
    status: &'static str,
    structural: String,
    color: String,
    path: std::borrow::Cow<'a, str>,
    reason: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a DuplicateReport,
    skipped: &'a [FileFailure],
}

impl<'a> CsvOutput<'a> {
    #[must_use]
    pub fn new(report: &'a DuplicateReport, skipped: &'a [FileFailure]) -> Self {
        Self { report, skipped }
    }

    /// Write the CSV document, header included.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        // Written up front so an empty result still has a header row
        csv_writer.write_record(HEADER)?;

        for (idx, group) in self.report.groups().iter().enumerate() {
            let structural = group.fingerprint.structural_hex();
            let color = group.fingerprint.color_hex();
            for path in &group.paths {
                csv_writer.serialize(CsvRow {
                    group_id: Some(idx + 1),
                    status: "duplicate",
                    structural: structural.clone(),
                    color: color.clone(),
                    path: path.to_string_lossy(),
                    reason: String::new(),
                })?;
            }
        }

        for failure in self.skipped {
            csv_writer.serialize(CsvRow {
                group_id: None,
                status: "skipped",
                structural: String::new(),
                color: String::new(),
                path: failure.path.to_string_lossy(),
                reason: format!("{}: {}", failure.kind.as_str(), failure.message),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
