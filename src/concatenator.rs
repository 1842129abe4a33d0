/// Concatenation of plaintext files into a single labeled document.
///
/// Each source file is emitted as a header line naming the file, a blank
/// line, the file's text, and two newlines. Unreadable sources are recorded
/// in the [`ConcatReport`] and skipped; the output itself is written in one
/// go once every source has been processed.
use crate::config::ConcatConfig;
use crate::file_type::TypeClassifier;
use crate::natural_order::NaturalOrder;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "concatenated.txt";

/// Errors that stop a concatenation run.
#[derive(Debug)]
pub enum ConcatError {
    /// The list of files to concatenate was empty.
    NoFiles,
    /// The input directory does not exist or is not a directory.
    InvalidDirectory { path: PathBuf },
    /// The input directory could not be listed.
    DirectoryReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The combined output could not be written.
    OutputWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConcatError {
    /// Returns true for errors caused by invalid arguments rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoFiles | Self::InvalidDirectory { .. })
    }
}

impl fmt::Display for ConcatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFiles => write!(f, "No files to concatenate."),
            Self::InvalidDirectory { path } => {
                write!(
                    f,
                    "Folder does not exist or is not a directory: {}",
                    path.display()
                )
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::OutputWriteFailed { path, source } => {
                write!(f, "Error writing to {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConcatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryReadFailed { source, .. } | Self::OutputWriteFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Result type for concatenation operations.
pub type ConcatResult<T> = Result<T, ConcatError>;

/// Represents the result of a concatenation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcatReport {
    /// Where the document was written. Empty for [`Concatenator::render`].
    pub output_path: PathBuf,
    /// Sources included in the output, in order.
    pub included: Vec<PathBuf>,
    /// Sources that could not be read, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl ConcatReport {
    /// Returns true if every source made it into the output.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for ConcatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Concatenated {} file(s) into {}",
            self.included.len(),
            self.output_path.display()
        )?;
        for (path, reason) in &self.failed {
            write!(f, "\nError reading {}: {}", path.display(), reason)?;
        }
        Ok(())
    }
}

/// Builds the header line for a source file.
pub fn header_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    format!("--- File: {} ---", name)
}

/// Concatenates plaintext files.
///
/// Holds the classifier and ordering used for directory mode; explicit lists
/// are concatenated as given.
#[derive(Debug, Clone, Default)]
pub struct Concatenator {
    classifier: TypeClassifier,
    order: NaturalOrder,
}

impl Concatenator {
    /// Creates a concatenator with the built-in allowlist and case-insensitive
    /// natural ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a concatenator from configuration.
    pub fn with_config(config: &ConcatConfig) -> Self {
        Self {
            classifier: config.classifier(),
            order: config.ordering(),
        }
    }

    /// Builds the combined document in memory.
    ///
    /// Sources that cannot be read as UTF-8 text are skipped and listed in the
    /// report.
    pub fn render<P: AsRef<Path>>(&self, paths: &[P]) -> (String, ConcatReport) {
        let mut output = String::new();
        let mut report = ConcatReport::default();

        for path in paths {
            let path = path.as_ref();
            match read_text(path) {
                Ok(text) => {
                    output.push_str(&header_for(path));
                    output.push_str("\n\n");
                    output.push_str(&text);
                    output.push_str("\n\n");
                    report.included.push(path.to_path_buf());
                }
                Err(reason) => report.failed.push((path.to_path_buf(), reason)),
            }
        }

        (output, report)
    }

    /// Concatenates `paths`, in order, into `output_path`.
    ///
    /// The output is overwritten with a single write after every source has
    /// been processed.
    ///
    /// # Errors
    ///
    /// Returns `ConcatError::NoFiles` for an empty list (nothing is written)
    /// and `ConcatError::OutputWriteFailed` if the output cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plaincat::concatenator::Concatenator;
    /// use std::path::Path;
    ///
    /// let report = Concatenator::new()
    ///     .concatenate(&["a.txt", "b.md"], Path::new("out.txt"))
    ///     .expect("output should be writable");
    /// for (path, reason) in &report.failed {
    ///     eprintln!("skipped {}: {}", path.display(), reason);
    /// }
    /// ```
    pub fn concatenate<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output_path: &Path,
    ) -> ConcatResult<ConcatReport> {
        if paths.is_empty() {
            return Err(ConcatError::NoFiles);
        }

        let (output, mut report) = self.render(paths);

        fs::write(output_path, output).map_err(|e| ConcatError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        })?;

        report.output_path = output_path.to_path_buf();
        Ok(report)
    }

    /// Lists the allowed regular files directly inside `dir_path`, in natural
    /// order of their names.
    ///
    /// # Errors
    ///
    /// Returns `ConcatError::InvalidDirectory` if `dir_path` is not a
    /// directory, or `ConcatError::DirectoryReadFailed` if it cannot be read.
    pub fn list_directory(&self, dir_path: &Path) -> ConcatResult<Vec<PathBuf>> {
        if !dir_path.is_dir() {
            return Err(ConcatError::InvalidDirectory {
                path: dir_path.to_path_buf(),
            });
        }

        let entries = fs::read_dir(dir_path).map_err(|e| ConcatError::DirectoryReadFailed {
            path: dir_path.to_path_buf(),
            source: e,
        })?;

        // Names that are not valid UTF-8 are kept as-is; only the sort key
        // and the allowlist check use the lossy form.
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let key = entry.file_name().to_string_lossy().into_owned();
            if self.classifier.is_allowed(&key) && path.is_file() {
                files.push((key, path));
            }
        }

        files.sort_by(|(a, _), (b, _)| self.order.compare(a, b));
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    /// Concatenates every allowed file in `dir_path` (non-recursive), in
    /// natural order, into `output_path`.
    ///
    /// # Errors
    ///
    /// Fails before listing if `dir_path` is not a directory, and with
    /// `ConcatError::NoFiles` if it holds no allowed files.
    pub fn concatenate_directory(
        &self,
        dir_path: &Path,
        output_path: &Path,
    ) -> ConcatResult<ConcatReport> {
        let files = self.list_directory(dir_path)?;
        self.concatenate(&files, output_path)
    }
}

/// Reads a whole file as UTF-8.
fn read_text(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e.utf8_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_header_uses_base_name() {
        assert_eq!(
            header_for(Path::new("/some/dir/notes.md")),
            "--- File: notes.md ---"
        );
    }

    #[test]
    fn test_render_format() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "A").expect("Failed to write test file");
        fs::write(&b, "B\n").expect("Failed to write test file");

        let (output, report) = Concatenator::new().render(&[a, b]);
        assert_eq!(
            output,
            "--- File: a.txt ---\n\nA\n\n--- File: b.txt ---\n\nB\n\n\n"
        );
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_render_skips_invalid_utf8() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "ok").expect("Failed to write test file");
        fs::write(&bad, [0xFFu8, 0xFE, 0x00]).expect("Failed to write test file");

        let (output, report) = Concatenator::new().render(&[bad.clone(), good.clone()]);
        assert_eq!(output, "--- File: good.txt ---\n\nok\n\n");
        assert_eq!(report.included, vec![good]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, bad);
        assert!(report.failed[0].1.contains("invalid UTF-8"));
    }

    #[test]
    fn test_empty_list_is_validation_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let out = dir.path().join("out.txt");
        let empty: [PathBuf; 0] = [];

        let err = Concatenator::new().concatenate(&empty, &out).unwrap_err();
        assert!(matches!(err, ConcatError::NoFiles));
        assert!(err.is_validation());
        assert!(!out.exists());
    }

    #[test]
    fn test_list_directory_filters_and_sorts() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for name in ["file10.txt", "file2.txt", "file1.txt", "image.png", "LICENSE"] {
            fs::write(dir.path().join(name), name).expect("Failed to write test file");
        }
        fs::create_dir(dir.path().join("nested.md")).expect("Failed to create directory");

        let files = Concatenator::new()
            .list_directory(dir.path())
            .expect("Failed to list directory");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["file1.txt", "file2.txt", "file10.txt", "LICENSE"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_directory_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().expect("Failed to create temp directory");
        let input = dir.path().join("in");
        fs::create_dir(&input).expect("Failed to create directory");
        let latin = input.join(OsStr::from_bytes(b"caf\xE9.txt"));
        fs::write(&latin, "latin name").expect("Failed to write test file");
        fs::write(input.join("ok.txt"), "ok").expect("Failed to write test file");
        let out = dir.path().join("out.txt");

        let report = Concatenator::new()
            .concatenate_directory(&input, &out)
            .expect("Failed to concatenate directory");
        assert!(report.is_complete_success());
        assert_eq!(report.included, vec![latin, input.join("ok.txt")]);
        assert!(fs::read_to_string(&out).unwrap().contains("latin name"));
    }

    #[test]
    fn test_invalid_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").expect("Failed to write test file");

        let result = Concatenator::new().concatenate_directory(&file, &dir.path().join("o.txt"));
        assert!(matches!(result, Err(ConcatError::InvalidDirectory { .. })));

        let result = Concatenator::new()
            .concatenate_directory(&dir.path().join("missing"), &dir.path().join("o.txt"));
        assert!(matches!(result, Err(ConcatError::InvalidDirectory { .. })));
    }

    #[test]
    fn test_output_write_failure() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let a = dir.path().join("a.txt");
        fs::write(&a, "A").expect("Failed to write test file");
        let out = dir.path().join("no_such_dir").join("out.txt");

        let err = Concatenator::new().concatenate(&[a], &out).unwrap_err();
        assert!(matches!(err, ConcatError::OutputWriteFailed { .. }));
        assert!(!err.is_validation());
    }
}
