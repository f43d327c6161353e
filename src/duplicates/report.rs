//! Duplicate groups and the final report.
//!
//! # Overview
//!
//! A [`DuplicateReport`] is the filtered view of a [`FingerprintIndex`]:
//! only fingerprints shared by two or more paths survive. Building it is
//! pure and keeps the index's iteration order.
//!
//! # Example
//!
//! ```
//! use pixeldupe::duplicates::{build_report, FingerprintIndex};
//! use pixeldupe::scanner::Fingerprint;
//! use std::path::PathBuf;
//!
//! let index = FingerprintIndex::new();
//! index.insert(Fingerprint::new(1, 1), PathBuf::from("/a.png"));
//! index.insert(Fingerprint::new(1, 1), PathBuf::from("/b.png"));
//! index.insert(Fingerprint::new(2, 2), PathBuf::from("/c.png"));
//!
//! let report = build_report(&index);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.groups()[0].paths.len(), 2);
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::FingerprintIndex;
use crate::scanner::Fingerprint;

/// Paths sharing one fingerprint. Always holds at least two paths when
/// produced by [`build_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Fingerprint shared by every path
    pub fingerprint: Fingerprint,
    /// Files in insertion order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (all files minus one).
    #[must_use]
    pub fn redundant_copies(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Read-only set of duplicate groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateReport {
    groups: Vec<DuplicateGroup>,
}

impl DuplicateReport {
    /// Build a report from index entries, dropping entries with fewer than
    /// two paths.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Fingerprint, Vec<PathBuf>)>,
    {
        let groups = entries
            .into_iter()
            .filter(|(_, paths)| paths.len() >= 2)
            .map(|(fingerprint, paths)| DuplicateGroup { fingerprint, paths })
            .collect();
        Self { groups }
    }

    /// All groups in index order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of files that belong to some group.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// Number of files that could be removed keeping one per group.
    #[must_use]
    pub fn redundant_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::redundant_copies).sum()
    }

    /// The group containing `path`, if any.
    #[must_use]
    pub fn group_of(&self, path: &Path) -> Option<&DuplicateGroup> {
        self.groups
            .iter()
            .find(|group| group.paths.iter().any(|p| p == path))
    }

    /// Whether `path` appears in any group.
    #[must_use]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.group_of(path).is_some()
    }
}

impl<'a> IntoIterator for &'a DuplicateReport {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Filter `index` down to fingerprints shared by two or more paths.
#[must_use]
pub fn build_report(index: &FingerprintIndex) -> DuplicateReport {
    DuplicateReport::from_entries(index.snapshot())
}
