//! Scanner module for file enumeration, image decoding and fingerprinting.
//!
//! This module provides functionality for:
//! - Flat (non-recursive) directory listing of regular files
//! - Decoding image files with classified failures
//! - Two-part image fingerprints (structural pHash + color distribution)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory enumeration
//! - [`decode`]: Opening and decoding image files
//! - [`fingerprint`]: The [`Fingerprint`] key and [`Fingerprinter`]
//! - [`color`]: Color-distribution hash
//!
//! # Example
//!
//! ```no_run
//! use pixeldupe::scanner::{list_files, Fingerprinter};
//! use std::path::Path;
//!
//! let fingerprinter = Fingerprinter::new();
//! for path in list_files(Path::new("./photos")).unwrap() {
//!     match fingerprinter.fingerprint_file(&path) {
//!         Ok(fp) => println!("{}: {}", path.display(), fp),
//!         Err(failure) => eprintln!("Warning: {}", failure),
//!     }
//! }
//! ```

pub mod color;
pub mod decode;
pub mod fingerprint;
pub mod walker;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// Re-export main types
pub use color::color_hash;
pub use decode::decode_image;
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use walker::list_files;

/// Errors that abort the enumeration of a whole directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The path does not exist or is not a directory.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The directory exists but could not be read.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Classification of a per-file failure.
///
/// Every kind is recovered the same way (the file is skipped), but
/// `Unexpected` is kept apart in diagnostics since it may point at a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// The file exists but is not a decodable image.
    UnreadableImage,
    /// The file vanished mid-scan or permission was denied.
    FileAccess,
    /// Anything else.
    Unexpected,
}

impl FileErrorKind {
    /// Short machine-readable label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnreadableImage => "unreadable_image",
            Self::FileAccess => "file_access",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableImage => write!(f, "Unreadable image"),
            Self::FileAccess => write!(f, "File access error"),
            Self::Unexpected => write!(f, "Unexpected error"),
        }
    }
}

/// A file that was skipped during a scan, with the reason.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind} for {path}: {message}")]
pub struct FileFailure {
    /// The file that could not be fingerprinted
    pub path: PathBuf,
    /// Failure classification
    pub kind: FileErrorKind,
    /// Human-readable reason
    pub message: String,
}

impl FileFailure {
    /// Create a new failure record.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Classify an I/O error raised while opening or reading `path`.
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                FileErrorKind::FileAccess
            }
            _ => FileErrorKind::Unexpected,
        };
        Self::new(path, kind, err.to_string())
    }
}
