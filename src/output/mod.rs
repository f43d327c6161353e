//! Output formatters for scan results.
//!
//! - [`text`]: colored console listing (default)
//! - [`json`]: a single document for automation and scripting
//! - [`csv`]: one row per file for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use pixeldupe::duplicates::DuplicateFinder;
//! use pixeldupe::error::ExitCode;
//! use pixeldupe::output::JsonOutput;
//! use std::path::Path;
//!
//! let outcome = DuplicateFinder::with_defaults()
//!     .find_duplicates(&[Path::new(".")])
//!     .unwrap();
//! let code = ExitCode::for_scan(outcome.report.len(), outcome.failures.len());
//!
//! let output = JsonOutput::new(&outcome, code);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use text::TextOutput;
