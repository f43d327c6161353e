//! JSON output formatter for scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "fingerprint": { "structural": "c3c3...", "color": "0000..." },
//!       "files": ["/photos/a.png", "/backup/a.png"]
//!     }
//!   ],
//!   "skipped": [
//!     { "path": "/photos/broken.png", "kind": "unreadable_image", "message": "..." }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "fingerprinted_files": 2,
//!     "skipped_files": 1,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 2,
//!     "redundant_files": 1,
//!     "scan_duration_ms": 12,
//!     "batches": [ ... ],
//!     "exit_code": 3,
//!     "exit_code_name": "PD003"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{BatchSummary, DuplicateGroup, ScanOutcome};
use crate::error::ExitCode;
use crate::scanner::{FileFailure, Fingerprint};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Shared fingerprint, both halves as hex
    pub fingerprint: Fingerprint,
    /// Paths in the order they were indexed
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            fingerprint: group.fingerprint,
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub fingerprinted_files: usize,
    pub skipped_files: usize,
    pub distinct_fingerprints: usize,
    pub duplicate_groups: usize,
    pub duplicate_files: usize,
    /// Files removable while keeping one per group
    pub redundant_files: usize,
    pub scan_duration_ms: u64,
    /// Per-directory statistics, including the strategy used
    pub batches: Vec<BatchSummary>,
    pub exit_code: i32,
    /// Machine-readable exit code name (e.g., "PD000")
    pub exit_code_name: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub duplicates: Vec<JsonDuplicateGroup>,
    pub skipped: Vec<FileFailure>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the document for a finished scan.
    #[must_use]
    pub fn new(outcome: &ScanOutcome, exit_code: ExitCode) -> Self {
        let summary = &outcome.summary;
        Self {
            duplicates: outcome.report.groups().iter().map(Into::into).collect(),
            skipped: outcome.failures.clone(),
            summary: JsonSummary {
                total_files: summary.total_files,
                fingerprinted_files: summary.fingerprinted_files,
                skipped_files: summary.failed_files,
                distinct_fingerprints: summary.distinct_fingerprints,
                duplicate_groups: summary.duplicate_groups,
                duplicate_files: summary.duplicate_files,
                redundant_files: outcome.report.redundant_files(),
                scan_duration_ms: summary.scan_duration_ms,
                batches: summary.batches.clone(),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
