//! Path expansion, resolution and duplicate detection.
//!
//! A path read from a manifest goes through three stages:
//! 1. raw text, possibly with `~` and environment references
//! 2. resolved: absolute and lexically normalized (no `.` or `..`), symlinks
//!    left as they are
//! 3. comparison key: the resolved form folded per platform convention, used
//!    only to decide whether two entries refer to the same file

use path_absolutize::Absolutize;
use regex::{Captures, Regex};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static POSIX_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\w+|\{[^}]*\})").expect("static regex is valid")
});

#[cfg(windows)]
static WINDOWS_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([^%]+)%").expect("static regex is valid"));

/// Replaces a leading `~` (alone or followed by a separator) with the home
/// directory. `~user` forms and paths without a home directory are returned
/// unchanged.
pub fn expand_home(raw: &str) -> String {
    expand_home_with(raw, dirs::home_dir())
}

fn expand_home_with(raw: &str, home: Option<PathBuf>) -> String {
    let Some(rest) = raw.strip_prefix('~') else {
        return raw.to_string();
    };
    if !(rest.is_empty() || rest.starts_with(std::path::is_separator)) {
        return raw.to_string();
    }
    match home {
        Some(home) => format!("{}{}", home.to_string_lossy(), rest),
        None => raw.to_string(),
    }
}

/// Expands environment references from the process environment.
///
/// `$NAME` and `${NAME}` are recognized everywhere, `%NAME%` on Windows.
/// Undefined variables are left verbatim.
pub fn expand_vars(raw: &str) -> String {
    expand_vars_with(raw, |name| std::env::var(name).ok())
}

/// Expands environment references using `lookup` instead of the process
/// environment.
pub fn expand_vars_with<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = POSIX_VAR
        .replace_all(raw, |caps: &Captures| {
            let token = &caps[1];
            let name = token
                .strip_prefix('{')
                .and_then(|t| t.strip_suffix('}'))
                .unwrap_or(token);
            match lookup(name) {
                Some(value) if !name.is_empty() => value,
                _ => caps[0].to_string(),
            }
        })
        .into_owned();

    #[cfg(windows)]
    let expanded = WINDOWS_VAR
        .replace_all(&expanded, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    expanded
}

/// Expands home and environment references, in that order.
pub fn expand(raw: &str) -> String {
    expand_vars(&expand_home(raw))
}

/// Makes `path` absolute against `base` (when relative) and removes `.` and
/// `..` segments without consulting the filesystem.
pub fn resolve_against(path: &Path, base: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    Ok(joined.absolutize()?.to_path_buf())
}

/// Makes `path` absolute against the current directory and normalizes it.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(path.absolutize()?.to_path_buf())
}

/// Key used to decide whether two resolved paths name the same file.
///
/// Windows folds case and separators; other hosts compare the path text as
/// is. Hard links and symlinks are not resolved.
pub fn comparison_key(resolved: &Path) -> String {
    let text = resolved.to_string_lossy();
    if cfg!(windows) {
        text.replace('/', "\\").to_lowercase()
    } else {
        text.into_owned()
    }
}

/// Comparison key for a path that may still be relative.
///
/// Falls back to the unnormalized text when the current directory is
/// unavailable.
pub fn comparison_key_for(path: &Path) -> String {
    match absolute(path) {
        Ok(resolved) => comparison_key(&resolved),
        Err(_) => comparison_key(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "PROJECT" => Some("/work/proj".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_vars_dollar_forms() {
        assert_eq!(
            expand_vars_with("$PROJECT/notes.txt", env),
            "/work/proj/notes.txt"
        );
        assert_eq!(
            expand_vars_with("${PROJECT}/a.md", env),
            "/work/proj/a.md"
        );
        assert_eq!(expand_vars_with("x$EMPTY.txt", env), "x.txt");
    }

    #[test]
    fn test_expand_vars_leaves_unknown() {
        assert_eq!(
            expand_vars_with("$MISSING/a.txt", env),
            "$MISSING/a.txt"
        );
        assert_eq!(expand_vars_with("${}/a.txt", env), "${}/a.txt");
        assert_eq!(expand_vars_with("cost$.txt", env), "cost$.txt");
    }

    #[test]
    fn test_expand_home() {
        let home = Some(PathBuf::from("/home/u"));
        assert_eq!(expand_home_with("~", home.clone()), "/home/u");
        assert_eq!(
            expand_home_with("~/docs/a.txt", home.clone()),
            "/home/u/docs/a.txt"
        );
        assert_eq!(expand_home_with("~other/a.txt", home.clone()), "~other/a.txt");
        assert_eq!(expand_home_with("a/~/b.txt", home), "a/~/b.txt");
        assert_eq!(expand_home_with("~/a.txt", None), "~/a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_against_normalizes() {
        let base = Path::new("/lists/sub");
        assert_eq!(
            resolve_against(Path::new("../docs/./a.txt"), base).unwrap(),
            PathBuf::from("/lists/docs/a.txt")
        );
        assert_eq!(
            resolve_against(Path::new("/abs/x/../b.md"), base).unwrap(),
            PathBuf::from("/abs/b.md")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_comparison_key_posix_is_exact() {
        assert_ne!(
            comparison_key(Path::new("/a/File.txt")),
            comparison_key(Path::new("/a/file.txt"))
        );
        assert_eq!(comparison_key(Path::new("/a/b.txt")), "/a/b.txt");
    }

    #[cfg(windows)]
    #[test]
    fn test_comparison_key_windows_folds() {
        assert_eq!(
            comparison_key(Path::new(r"C:\A\File.TXT")),
            comparison_key(Path::new("c:/a/file.txt"))
        );
    }
}
