//! Importing file selections from list (manifest) files.
//!
//! A list file holds one path per line. Blank lines and lines starting with
//! `#` or `;` are ignored, a single pair of surrounding quotes is removed,
//! `~` and environment references are expanded, and relative paths are
//! resolved against the list file's own directory.
//!
//! Every remaining line ends up in exactly one bucket of the [`ImportReport`]:
//! added, already present, not found, or skipped because its type is not
//! allowed.

use crate::file_type::TypeClassifier;
use crate::paths;
use crate::text_decode::{self, TextEncoding};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of example lines shown per problem bucket in the summary.
const SUMMARY_PREVIEW: usize = 5;

/// Errors that abort a whole import.
#[derive(Debug)]
pub enum ImportError {
    /// The list file could not be read.
    ManifestReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The list file could not be decoded with any supported encoding.
    ManifestDecodeFailed { path: PathBuf, reason: String },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestReadFailed { path, source } => {
                write!(f, "Failed to read list file {}: {}", path.display(), source)
            }
            Self::ManifestDecodeFailed { path, reason } => {
                write!(
                    f,
                    "Could not decode list file {} using common encodings: {}",
                    path.display(),
                    reason
                )
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ManifestReadFailed { source, .. } => Some(source),
            Self::ManifestDecodeFailed { .. } => None,
        }
    }
}

/// Result type for list imports.
pub type ImportResult<T> = Result<T, ImportError>;

/// Outcome of importing a list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// New resolved paths, in list order.
    pub added: Vec<PathBuf>,
    /// Resolved paths that were already selected or already added by an
    /// earlier line.
    pub already_present: Vec<PathBuf>,
    /// Lines (as written) whose target is not an existing regular file.
    pub not_found: Vec<String>,
    /// Lines (as written) rejected by the type classifier.
    pub skipped_not_allowed: Vec<String>,
    /// Encoding the list file was decoded with.
    pub encoding: Option<TextEncoding>,
}

impl ImportReport {
    /// Total number of lines that were classified.
    pub fn total(&self) -> usize {
        self.added.len()
            + self.already_present.len()
            + self.not_found.len()
            + self.skipped_not_allowed.len()
    }

    /// Returns true if no line was classified.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added: {}\nAlready present: {}\nNot found: {}\nSkipped (not allowed type): {}",
            self.added.len(),
            self.already_present.len(),
            self.not_found.len(),
            self.skipped_not_allowed.len()
        )?;

        for (label, items) in [
            ("Not found", &self.not_found),
            ("Skipped (not allowed type)", &self.skipped_not_allowed),
        ] {
            if items.is_empty() {
                continue;
            }
            write!(f, "\n\n{} examples:", label)?;
            for item in items.iter().take(SUMMARY_PREVIEW) {
                write!(f, "\n  - {}", item)?;
            }
            if items.len() > SUMMARY_PREVIEW {
                write!(f, "\n  ... and {} more", items.len() - SUMMARY_PREVIEW)?;
            }
        }
        Ok(())
    }
}

/// Reads list files and reconciles them against an existing selection.
#[derive(Debug, Clone, Default)]
pub struct ListImporter {
    classifier: TypeClassifier,
}

impl ListImporter {
    /// Creates an importer using the built-in allowlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an importer using a custom classifier.
    pub fn with_classifier(classifier: TypeClassifier) -> Self {
        Self { classifier }
    }

    /// Imports the list file at `manifest`.
    ///
    /// Relative entries resolve against `base_dir`, or against the list file's
    /// own directory when `base_dir` is `None`. Entries matching anything in
    /// `existing` (by comparison key) are reported as already present.
    ///
    /// # Errors
    ///
    /// Fails without a partial report if the list file cannot be read or
    /// decoded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plaincat::list_import::ListImporter;
    /// use std::path::{Path, PathBuf};
    ///
    /// let selected: Vec<PathBuf> = Vec::new();
    /// let report = ListImporter::new()
    ///     .import_list(Path::new("files.txt"), None, &selected)
    ///     .expect("list file should be readable");
    /// println!("{}", report);
    /// ```
    pub fn import_list<P: AsRef<Path>>(
        &self,
        manifest: &Path,
        base_dir: Option<&Path>,
        existing: &[P],
    ) -> ImportResult<ImportReport> {
        let bytes = fs::read(manifest).map_err(|e| ImportError::ManifestReadFailed {
            path: manifest.to_path_buf(),
            source: e,
        })?;

        let (text, encoding) = text_decode::decode_with_fallback(&bytes).map_err(|e| {
            ImportError::ManifestDecodeFailed {
                path: manifest.to_path_buf(),
                reason: e.reason,
            }
        })?;

        let base_dir = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => manifest.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        let mut report = self.import_lines(&text, &base_dir, existing);
        report.encoding = Some(encoding);
        Ok(report)
    }

    /// Classifies already-decoded list text. Relative entries resolve against
    /// `base_dir`.
    pub fn import_lines<P: AsRef<Path>>(
        &self,
        text: &str,
        base_dir: &Path,
        existing: &[P],
    ) -> ImportReport {
        let mut seen: HashSet<String> = existing
            .iter()
            .map(|p| paths::comparison_key_for(p.as_ref()))
            .collect();
        let mut report = ImportReport::default();

        // Universal newlines: `\n`, `\r\n` and a lone `\r` all end a line.
        for raw in text.split(['\r', '\n']) {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let entry = strip_quotes(line);
            if entry.is_empty() {
                continue;
            }

            let expanded = paths::expand(entry);
            let candidate = match paths::resolve_against(Path::new(&expanded), base_dir) {
                Ok(candidate) => candidate,
                Err(_) => {
                    report.not_found.push(line.to_string());
                    continue;
                }
            };

            if !self.classifier.is_allowed(&candidate) {
                report.skipped_not_allowed.push(line.to_string());
                continue;
            }

            if !candidate.is_file() {
                report.not_found.push(line.to_string());
                continue;
            }

            if seen.insert(paths::comparison_key(&candidate)) {
                report.added.push(candidate);
            } else {
                report.already_present.push(candidate);
            }
        }

        report
    }
}

/// Removes one matching pair of straight double or single quotes.
fn strip_quotes(line: &str) -> &str {
    for quote in ['"', '\''] {
        if line.len() >= 2
            && let Some(inner) = line
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    line
}
