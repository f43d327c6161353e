//! Thread-safe fingerprint index.
//!
//! # Overview
//!
//! [`FingerprintIndex`] maps each [`Fingerprint`] to the paths that produced
//! it. Workers call [`FingerprintIndex::insert`] concurrently; a single
//! coarse lock makes append-or-create atomic, so no insert is lost.
//!
//! Iteration order is first-seen order of fingerprints, and paths within an
//! entry keep their insertion order.
//!
//! # Example
//!
//! ```
//! use pixeldupe::duplicates::FingerprintIndex;
//! use pixeldupe::scanner::Fingerprint;
//! use std::path::PathBuf;
//!
//! let index = FingerprintIndex::new();
//! let fp = Fingerprint::new(1, 2);
//! index.insert(fp, PathBuf::from("/a.png"));
//! index.insert(fp, PathBuf::from("/b.png"));
//!
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.path_count(), 2);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::scanner::Fingerprint;

#[derive(Debug, Default)]
struct Entries {
    /// Position of each fingerprint in `groups`
    slots: HashMap<Fingerprint, usize>,
    /// Groups in first-seen order
    groups: Vec<(Fingerprint, Vec<PathBuf>)>,
}

/// Fingerprint to paths mapping, safe to fill from many workers.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    entries: Mutex<Entries>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // A worker panicking mid-insert cannot leave a half-written entry,
        // so a poisoned lock is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `path` to the entry for `fingerprint`, creating it if absent.
    pub fn insert(&self, fingerprint: Fingerprint, path: PathBuf) {
        let mut entries = self.lock();
        let Entries { slots, groups } = &mut *entries;
        match slots.get(&fingerprint) {
            Some(&slot) => {
                log::trace!("Fingerprint {} collision: {}", fingerprint, path.display());
                groups[slot].1.push(path);
            }
            None => {
                slots.insert(fingerprint, groups.len());
                groups.push((fingerprint, vec![path]));
            }
        }
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().groups.len()
    }

    /// Whether nothing has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().groups.is_empty()
    }

    /// Total number of paths across all fingerprints.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.lock().groups.iter().map(|(_, paths)| paths.len()).sum()
    }

    /// Paths recorded for `fingerprint`, if any.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Vec<PathBuf>> {
        let entries = self.lock();
        entries
            .slots
            .get(fingerprint)
            .map(|&slot| entries.groups[slot].1.clone())
    }

    /// Copy of the current contents in iteration order.
    ///
    /// Meant to be called once all inserts for a scan have completed.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Fingerprint, Vec<PathBuf>)> {
        self.lock().groups.clone()
    }

    /// Consume the index, returning its contents in iteration order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(Fingerprint, Vec<PathBuf>)> {
        self.entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .groups
    }
}
