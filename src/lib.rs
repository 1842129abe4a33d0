//! plaincat - concatenate plaintext files into one labeled document
//!
//! This library classifies files against a plaintext allowlist, orders names
//! naturally (`file2` before `file10`), imports file selections from list
//! files, and writes the selected files into a single document where each
//! file is introduced by a `--- File: <name> ---` header.

pub mod cli;
pub mod concatenator;
pub mod config;
pub mod file_type;
pub mod list_import;
pub mod natural_order;
pub mod output;
pub mod paths;
pub mod selection;
pub mod text_decode;

pub use concatenator::{ConcatError, ConcatReport, Concatenator};
pub use config::{ConcatConfig, ConfigError};
pub use file_type::TypeClassifier;
pub use list_import::{ImportError, ImportReport, ListImporter};
pub use natural_order::{NaturalOrder, natural_cmp};
pub use selection::OrderedSelection;

pub use cli::{Cli, run_cli};
