//! Optional configuration for the allowlist and ordering.
//!
//! The command-line tool always runs with the defaults; library callers can
//! load a TOML file to widen the allowlist or switch to case-sensitive
//! ordering.
//!
//! # Configuration File Format
//!
//! ```toml
//! [types]
//! extra_extensions = ["rs", ".adoc"]
//! extra_names = ["justfile"]
//!
//! [ordering]
//! case_sensitive = false
//! ```
//!
//! Every section and key is optional.

use crate::file_type::TypeClassifier;
use crate::natural_order::NaturalOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcatConfig {
    /// Allowlist additions.
    #[serde(default)]
    pub types: TypeRules,

    /// Ordering options.
    #[serde(default)]
    pub ordering: OrderingRules,
}

/// Additions to the built-in allowlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeRules {
    /// Extra extensions, with or without the leading dot (e.g. "rs", ".adoc").
    #[serde(default)]
    pub extra_extensions: Vec<String>,

    /// Extra reserved base names (e.g. "justfile").
    #[serde(default)]
    pub extra_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingRules {
    /// Compare letters by exact code point instead of case-folded.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl ConcatConfig {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Builds the classifier: the built-in allowlist plus configured additions.
    pub fn classifier(&self) -> TypeClassifier {
        let mut classifier = TypeClassifier::default();
        for ext in &self.types.extra_extensions {
            classifier.add_extension(ext);
        }
        for name in &self.types.extra_names {
            classifier.add_name(name);
        }
        classifier
    }

    /// Builds the natural-order comparator.
    pub fn ordering(&self) -> NaturalOrder {
        NaturalOrder {
            case_sensitive: self.ordering.case_sensitive,
        }
    }
}
