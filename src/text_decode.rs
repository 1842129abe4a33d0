//! Decoding of manifest files whose encoding is not known up front.
//!
//! Candidates are tried in a fixed order and the first one that decodes the
//! whole input wins: UTF-8 (an optional byte order mark is dropped), then
//! Windows-1252, then ISO-8859-1, which maps every byte and so never fails.

/// A text encoding the manifest reader knows how to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, tolerating a leading byte order mark.
    Utf8,
    /// Windows code page 1252.
    Windows1252,
    /// ISO-8859-1.
    Latin1,
}

/// Order in which candidates are tried.
pub const CANDIDATES: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
    TextEncoding::Latin1,
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Code points for bytes 0x80..=0x9F in Windows-1252. `None` marks the five
/// bytes the code page leaves undefined.
#[rustfmt::skip]
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Failure to decode under every candidate encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Reason reported by the last candidate tried.
    pub reason: String,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not decode text with any supported encoding: {}",
            self.reason
        )
    }
}

impl std::error::Error for DecodeError {}

impl TextEncoding {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Latin1 => "iso-8859-1",
        }
    }

    /// Decodes the whole input or reports why it could not.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body)
                    .map(str::to_string)
                    .map_err(|e| format!("{}: {}", self.label(), e))
            }
            TextEncoding::Windows1252 => bytes
                .iter()
                .enumerate()
                .map(|(pos, &b)| match b {
                    0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)].ok_or_else(|| {
                        format!(
                            "{}: undefined byte 0x{:02X} at position {}",
                            self.label(),
                            b,
                            pos
                        )
                    }),
                    _ => Ok(char::from(b)),
                })
                .collect(),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Decodes `bytes` with the first candidate that accepts all of it.
pub fn decode_with_fallback(bytes: &[u8]) -> Result<(String, TextEncoding), DecodeError> {
    decode_with(bytes, CANDIDATES)
}

/// Decodes `bytes` with the first of `candidates` that accepts all of it.
pub fn decode_with(
    bytes: &[u8],
    candidates: &[TextEncoding],
) -> Result<(String, TextEncoding), DecodeError> {
    let mut last_reason = String::from("no candidate encodings");
    for encoding in candidates {
        match encoding.decode(bytes) {
            Ok(text) => return Ok((text, *encoding)),
            Err(reason) => last_reason = reason,
        }
    }
    Err(DecodeError {
        reason: last_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_plain() {
        let (text, enc) = decode_with_fallback("naïve.txt\n".as_bytes()).unwrap();
        assert_eq!(text, "naïve.txt\n");
        assert_eq!(enc, TextEncoding::Utf8);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"a.txt");
        let (text, enc) = decode_with_fallback(&bytes).unwrap();
        assert_eq!(text, "a.txt");
        assert_eq!(enc, TextEncoding::Utf8);
    }

    #[test]
    fn test_windows1252_fallback() {
        // 0x80 is the euro sign in cp1252 and invalid as a UTF-8 lead byte
        let (text, enc) = decode_with_fallback(b"price\x80.txt").unwrap();
        assert_eq!(text, "price\u{20AC}.txt");
        assert_eq!(enc, TextEncoding::Windows1252);

        let (text, _) = decode_with_fallback(b"caf\xE9.md").unwrap();
        assert_eq!(text, "caf\u{E9}.md");
    }

    #[test]
    fn test_latin1_last_resort() {
        let (text, enc) = decode_with_fallback(b"x\x81y").unwrap();
        assert_eq!(text, "x\u{81}y");
        assert_eq!(enc, TextEncoding::Latin1);
    }

    #[test]
    fn test_all_candidates_fail() {
        let err = decode_with(b"x\x81y", &[TextEncoding::Utf8, TextEncoding::Windows1252])
            .unwrap_err();
        assert!(err.reason.contains("0x81"));
    }

    #[test]
    fn test_no_candidates() {
        assert!(decode_with(b"abc", &[]).is_err());
    }
}
