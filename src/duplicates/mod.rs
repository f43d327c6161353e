//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Choosing sequential or pooled execution per batch ([`executor`])
//! - Scheduling a scan over one or two directories ([`finder`])
//! - Accumulating fingerprints concurrently ([`index`])
//! - Filtering the index into duplicate groups ([`report`])

pub mod executor;
pub mod finder;
pub mod index;
pub mod report;

pub use executor::{default_threads, ExecutionStrategy, DEFAULT_PARALLEL_THRESHOLD};
pub use finder::{
    BatchSummary, DuplicateFinder, FinderConfig, FinderError, ScanOutcome, ScanResult,
    ScanSummary, MAX_DIRECTORIES,
};
pub use index::FingerprintIndex;
pub use report::{build_report, DuplicateGroup, DuplicateReport};
