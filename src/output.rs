//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output. The library never
//! prints; only the binary goes through here.

use crate::concatenator::ConcatReport;
use colored::*;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use plaincat::output::OutputFormatter;
    /// OutputFormatter::success("Concatenated file saved to: out.txt");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// Warnings describe per-file problems, so they go to stderr.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints the outcome of a concatenation run.
    pub fn concat_summary(report: &ConcatReport) {
        for (path, reason) in &report.failed {
            Self::warning(&format!("Error reading {}: {}", path.display(), reason));
        }

        let file_word = if report.included.len() == 1 {
            "file"
        } else {
            "files"
        };
        Self::info(&format!("{} {} included", report.included.len(), file_word));
        Self::success(&format!(
            "Concatenated file saved to: {}",
            report.output_path.display()
        ));
    }
}
