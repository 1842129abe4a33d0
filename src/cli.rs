//! Command-line interface module for plaincat.
//!
//! The binary takes a directory and an optional output path, concatenates
//! every allowed plaintext file in the directory in natural order, and
//! reports unreadable files without stopping.

use crate::concatenator::{ConcatReport, Concatenator, DEFAULT_OUTPUT_NAME};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "plaincat",
    version,
    about = "Concatenate the plaintext files in a folder into one labeled document"
)]
pub struct Cli {
    /// Folder whose plaintext files are concatenated (not recursive)
    pub input_dir: PathBuf,

    /// Output file
    #[arg(default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,
}

/// Runs the directory concatenation described by `cli`.
///
/// Returns the report on success, or a human-readable message for fatal
/// failures (bad input folder, nothing to concatenate, output not writable).
///
/// # Examples
///
/// ```no_run
/// use plaincat::cli::{Cli, run_cli};
/// use std::path::PathBuf;
///
/// let cli = Cli {
///     input_dir: PathBuf::from("notes"),
///     output: PathBuf::from("concatenated.txt"),
/// };
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<ConcatReport, String> {
    let report = Concatenator::new()
        .concatenate_directory(&cli.input_dir, &cli.output)
        .map_err(|e| e.to_string())?;

    OutputFormatter::concat_summary(&report);
    Ok(report)
}
