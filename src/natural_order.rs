//! Natural ordering of names and paths.
//!
//! Strings are split into maximal runs of ASCII digits and runs of everything
//! else. Digit runs compare by numeric value, other runs compare by code point
//! (case-folded unless case-sensitive ordering is requested). This puts
//! `file2.txt` before `file10.txt`.
//!
//! Digit runs that differ only in leading zeros (`img02` vs `img2`) compare
//! equal. When one token sequence is a prefix of the other, the shorter one
//! sorts first. A digit run sorts before a non-digit run at the same position.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits `s` into alternating digit and non-digit runs.
fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(current) if current != is_digit => {
                tokens.push(make_token(&s[start..idx], current));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(current) = in_digits {
        tokens.push(make_token(&s[start..], current));
    }
    tokens
}

fn make_token(run: &str, digits: bool) -> Token<'_> {
    if digits {
        Token::Digits(run)
    } else {
        Token::Text(run)
    }
}

/// Compares two ASCII digit runs by magnitude without parsing them, so runs
/// of any length are handled.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_text(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    }
}

/// Natural-order comparator.
///
/// The default is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NaturalOrder {
    /// Compare non-digit runs by exact code point instead of case-folded.
    pub case_sensitive: bool,
}

impl NaturalOrder {
    /// Case-insensitive ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-sensitive ordering.
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    /// Compares two strings in natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaincat::natural_order::NaturalOrder;
    /// use std::cmp::Ordering;
    ///
    /// let order = NaturalOrder::new();
    /// assert_eq!(order.compare("file2", "file10"), Ordering::Less);
    /// assert_eq!(order.compare("img02", "img2"), Ordering::Equal);
    /// ```
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let left = tokenize(a);
        let right = tokenize(b);

        for (l, r) in left.iter().zip(right.iter()) {
            let ord = match (l, r) {
                (Token::Digits(x), Token::Digits(y)) => compare_digits(x, y),
                (Token::Text(x), Token::Text(y)) => compare_text(x, y, self.case_sensitive),
                (Token::Digits(_), Token::Text(_)) => Ordering::Less,
                (Token::Text(_), Token::Digits(_)) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        left.len().cmp(&right.len())
    }

    /// Compares two paths on their full (lossy) string form.
    pub fn compare_paths(&self, a: &Path, b: &Path) -> Ordering {
        self.compare(&a.to_string_lossy(), &b.to_string_lossy())
    }

    /// Stable in-place sort of strings.
    pub fn sort_strings<S: AsRef<str>>(&self, items: &mut [S]) {
        items.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Stable in-place sort of paths.
    pub fn sort_paths<P: AsRef<Path>>(&self, items: &mut [P]) {
        items.sort_by(|a, b| self.compare_paths(a.as_ref(), b.as_ref()));
    }

    /// Returns a sorted copy of `paths`.
    pub fn sorted_paths(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut sorted = paths.to_vec();
        self.sort_paths(&mut sorted);
        sorted
    }
}

/// Case-insensitive natural comparison.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalOrder::default().compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_alternating_runs() {
        assert_eq!(
            tokenize("file10.txt"),
            vec![
                Token::Text("file"),
                Token::Digits("10"),
                Token::Text(".txt")
            ]
        );
        assert_eq!(tokenize("42"), vec![Token::Digits("42")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_numeric_runs_by_value() {
        let mut names = vec!["file10.txt", "file2.txt", "file1.txt"];
        NaturalOrder::new().sort_strings(&mut names);
        assert_eq!(names, vec!["file1.txt", "file2.txt", "file10.txt"]);
    }

    #[test]
    fn test_leading_zeros_compare_equal() {
        assert_eq!(natural_cmp("img02", "img2"), Ordering::Equal);
        assert_eq!(natural_cmp("img002", "img10"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
        assert_eq!(natural_cmp("file1", "file1.txt"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_digits_before_text() {
        assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
        assert_eq!(natural_cmp("10", "a"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive_default() {
        assert_eq!(natural_cmp("README.md", "readme.md"), Ordering::Equal);
        assert_eq!(natural_cmp("Beta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_case_sensitive_option() {
        let order = NaturalOrder::case_sensitive();
        assert_eq!(order.compare("Beta", "alpha"), Ordering::Less);
        assert_eq!(order.compare("b2", "b10"), Ordering::Less);
    }

    #[test]
    fn test_huge_digit_runs_do_not_overflow() {
        let a = "v99999999999999999999999999999999";
        let b = "v100000000000000000000000000000000";
        assert_eq!(natural_cmp(a, b), Ordering::Less);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut names = vec!["B.txt", "a2.txt", "b.txt", "a02.txt"];
        NaturalOrder::new().sort_strings(&mut names);
        assert_eq!(names, vec!["a2.txt", "a02.txt", "B.txt", "b.txt"]);
    }

    #[test]
    fn test_sort_paths() {
        let paths = vec![
            PathBuf::from("/d/chapter10.md"),
            PathBuf::from("/d/chapter9.md"),
            PathBuf::from("/d/chapter1.md"),
        ];
        let sorted = NaturalOrder::new().sorted_paths(&paths);
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("/d/chapter1.md"),
                PathBuf::from("/d/chapter9.md"),
                PathBuf::from("/d/chapter10.md"),
            ]
        );
    }
}
