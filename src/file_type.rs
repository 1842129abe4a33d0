//! Plaintext file type classification.
//!
//! This module decides whether a path names a file we are willing to
//! concatenate. The decision is made purely from the path string: the base
//! name is checked against a set of reserved names (files like `LICENSE` or
//! `Makefile` that carry no extension), then the final suffix is checked
//! against a set of allowed extensions.
//!
//! Only the final suffix is considered, so `archive.tar.gz` is classified by
//! `.gz` alone.
//!
//! # Examples
//!
//! ```
//! use plaincat::file_type::TypeClassifier;
//!
//! let classifier = TypeClassifier::default();
//! assert!(classifier.is_allowed("notes.MD"));
//! assert!(classifier.is_allowed("LICENSE"));
//! assert!(!classifier.is_allowed("image.png"));
//! ```

use std::collections::HashSet;
use std::path::Path;

/// Extensions accepted by default. Stored lowercase with the leading dot.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // Documents and markup
    ".txt", ".md", ".markdown", ".rst", ".html", ".htm", ".xml", ".csv", ".tsv",
    // Configuration
    ".ini", ".cfg", ".conf", ".properties", ".env",
    // Data
    ".json", ".yaml", ".yml", ".toml",
    // Scripting
    ".py", ".js", ".jsx", ".ts", ".tsx",
    // Compiled languages
    ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".go", ".rb", ".php", ".swift", ".kt",
    // Shells
    ".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat",
    // Query and other languages
    ".sql", ".pl", ".lua", ".r", ".scala", ".clj", ".groovy", ".dart",
    // Stylesheets
    ".css", ".scss", ".less",
];

/// Base names accepted regardless of extension. Stored lowercase.
pub const DEFAULT_NAMES: &[&str] = &[
    "license",
    "makefile",
    "dockerfile",
    ".editorconfig",
    ".gitattributes",
    ".gitignore",
    ".dockerignore",
];

/// Outcome of classifying a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Accepted because the whole base name is reserved.
    ReservedName,
    /// Accepted because of the final suffix.
    Extension,
    /// Not a recognized plaintext file.
    Rejected,
}

impl Classification {
    /// Returns true for either accepting variant.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Classification::Rejected)
    }
}

/// Allowlist-based plaintext classifier.
///
/// Holds the extension set and the disjoint reserved-name set. Both are
/// case-folded on insertion, and inputs are case-folded before lookup.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    extensions: HashSet<String>,
    names: HashSet<String>,
}

impl TypeClassifier {
    /// Creates a classifier with the built-in allowlist.
    pub fn new() -> Self {
        let mut classifier = Self::empty();
        classifier.populate_standard_types();
        classifier
    }

    /// Creates a classifier that accepts nothing.
    pub fn empty() -> Self {
        Self {
            extensions: HashSet::new(),
            names: HashSet::new(),
        }
    }

    fn populate_standard_types(&mut self) {
        for ext in DEFAULT_EXTENSIONS {
            self.add_extension(ext);
        }
        for name in DEFAULT_NAMES {
            self.add_name(name);
        }
    }

    /// Adds an extension to the allowlist.
    ///
    /// The leading dot is optional: `"rs"` and `".rs"` register the same
    /// suffix. Empty input is ignored.
    pub fn add_extension(&mut self, ext: &str) {
        let ext = ext.trim().to_lowercase();
        let bare = ext.trim_start_matches('.');
        if bare.is_empty() {
            return;
        }
        self.extensions.insert(format!(".{}", bare));
    }

    /// Adds a reserved base name to the allowlist.
    pub fn add_name(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if !name.is_empty() {
            self.names.insert(name);
        }
    }

    /// Classifies a path without touching the filesystem.
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> Classification {
        let path_str = path.as_ref().to_string_lossy();
        let base = base_name(&path_str).to_lowercase();

        if self.names.contains(&base) {
            return Classification::ReservedName;
        }

        match final_suffix(&base) {
            Some(ext) if self.extensions.contains(ext) => Classification::Extension,
            _ => Classification::Rejected,
        }
    }

    /// Returns true if the path names an allowed plaintext file.
    pub fn is_allowed<P: AsRef<Path>>(&self, path: P) -> bool {
        self.classify(path).is_allowed()
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Text after the last path separator.
fn base_name(path: &str) -> &str {
    path.rsplit(std::path::is_separator).next().unwrap_or(path)
}

/// The final suffix of a base name, dot included.
///
/// Leading dots are part of the stem, so `.gitignore` has no suffix. A name
/// ending in a bare dot has no suffix either.
fn final_suffix(base: &str) -> Option<&str> {
    let stem_start = base.len() - base.trim_start_matches('.').len();
    let rest = &base[stem_start..];
    let dot = rest.rfind('.')?;
    let ext = &rest[dot..];
    if ext.len() > 1 { Some(ext) } else { None }
}
