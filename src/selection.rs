//! Caller-held ordered selection of files.
//!
//! The library itself keeps no state between calls. Front ends that let a
//! user build up a list of files can keep one of these and feed it to
//! [`Concatenator::concatenate`](crate::concatenator::Concatenator::concatenate).
//! It never holds two entries with the same comparison key and only reorders
//! on [`OrderedSelection::sort_natural`].

use crate::file_type::TypeClassifier;
use crate::list_import::ImportReport;
use crate::natural_order::NaturalOrder;
use crate::paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Counts from [`OrderedSelection::add_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
    /// Files appended to the selection.
    pub added: usize,
    /// Files already in the selection under the same comparison key.
    pub duplicates: usize,
    /// Files rejected by the classifier.
    pub skipped_not_allowed: usize,
}

/// An ordered list of files with no duplicate comparison keys.
///
/// # Examples
///
/// ```
/// use plaincat::file_type::TypeClassifier;
/// use plaincat::natural_order::NaturalOrder;
/// use plaincat::selection::OrderedSelection;
/// use std::path::Path;
///
/// let mut selection = OrderedSelection::new();
/// let summary = selection.add_files(
///     ["/d/b10.txt", "/d/b2.txt", "/d/b2.txt", "/d/pic.png"],
///     &TypeClassifier::default(),
/// );
/// assert_eq!(summary.added, 2);
/// assert_eq!(summary.duplicates, 1);
/// assert_eq!(summary.skipped_not_allowed, 1);
///
/// selection.sort_natural(&NaturalOrder::default());
/// assert_eq!(selection.as_slice()[0], Path::new("/d/b2.txt"));
/// assert!(selection.contains(Path::new("/d/b10.txt")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedSelection {
    entries: Vec<PathBuf>,
    keys: HashSet<String>,
}

impl OrderedSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `files` in order, dropping disallowed types and duplicates.
    pub fn add_files<I, P>(&mut self, files: I, classifier: &TypeClassifier) -> AddSummary
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut summary = AddSummary::default();
        for file in files {
            let file = file.as_ref();
            if !classifier.is_allowed(file) {
                summary.skipped_not_allowed += 1;
            } else if self.push(file) {
                summary.added += 1;
            } else {
                summary.duplicates += 1;
            }
        }
        summary
    }

    /// Appends the `added` entries of an import report. Returns how many were
    /// new to this selection.
    pub fn absorb(&mut self, report: &ImportReport) -> usize {
        report
            .added
            .iter()
            .filter(|path| self.push(path))
            .count()
    }

    fn push(&mut self, path: &Path) -> bool {
        if self.keys.insert(paths::comparison_key_for(path)) {
            self.entries.push(path.to_path_buf());
            true
        } else {
            false
        }
    }

    /// Removes and returns the entry at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.keys.remove(&paths::comparison_key_for(&removed));
        Some(removed)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }

    /// Stable natural-order sort of the whole selection.
    pub fn sort_natural(&mut self, order: &NaturalOrder) {
        order.sort_paths(&mut self.entries);
    }

    /// Returns true if an entry with the same comparison key is present.
    pub fn contains(&self, path: &Path) -> bool {
        self.keys.contains(&paths::comparison_key_for(path))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the selection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in selection order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.entries.iter()
    }

    /// The entries in selection order, ready for
    /// [`Concatenator::concatenate`](crate::concatenator::Concatenator::concatenate).
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.entries
    }
}
