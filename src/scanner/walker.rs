//! Flat directory enumeration.
//!
//! # Overview
//!
//! [`list_files`] returns the regular files directly inside a directory.
//! It never descends into subdirectories, never follows symbolic links and
//! does not filter by extension: anything that is not an image is left for
//! the decoder to reject.
//!
//! Entries are sorted by file name so that sequential scans append paths to
//! the index in a deterministic order.
//!
//! # Example
//!
//! ```no_run
//! use pixeldupe::scanner::list_files;
//! use std::path::Path;
//!
//! let files = list_files(Path::new("/home/user/Pictures")).unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// List the regular files in `dir`, non-recursively.
///
/// # Errors
///
/// - [`ScanError::DirectoryNotFound`] if `dir` does not exist or is not a directory
/// - [`ScanError::Io`] if the directory itself cannot be read
///
/// Entries that fail individually (e.g. vanish between listing and stat)
/// are logged and left out.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ScanError::DirectoryNotFound(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
        }
        Err(e) => {
            return Err(ScanError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                } else {
                    log::trace!("Skipping non-file entry: {}", entry.path().display());
                }
            }
            // An error without a path, or at depth 0, means the directory
            // itself could not be read.
            Err(e) if e.depth() == 0 || e.path().is_none_or(|p| p == dir) => {
                return Err(ScanError::Io {
                    path: dir.to_path_buf(),
                    source: io::Error::from(e),
                });
            }
            Err(e) => {
                log::warn!("Failed to read directory entry in {}: {}", dir.display(), e);
            }
        }
    }

    log::debug!("Enumerated {} files in {}", files.len(), dir.display());
    Ok(files)
}
