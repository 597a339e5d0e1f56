//! Tagged string wire representation.
//!
//! A string is either plain or tagged, and the first character alone decides
//! which:
//!
//! ```text
//! plain:   <escaped literal>                    never starts with SEP
//! tagged:  SEP <escaped type> SEP <escaped payload>
//! ```
//!
//! The boundary between type and payload is the first *live* separator after
//! the leading one, i.e. a separator not immediately preceded by the escape
//! character. [`BoundaryScanner`] finds it in a single left-to-right pass.

use crate::escape::Escaper;
use crate::{Error, Result};

/// Result of [`Tagger::decode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The unescaped type tag, or `None` for a plain string.
    pub tag: Option<String>,
    /// The unescaped payload or literal.
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Normal,
    AfterEscape,
}

/// Two-state automaton locating live separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryScanner {
    separator: char,
    escape: char,
}

impl BoundaryScanner {
    #[must_use]
    pub const fn new(escaper: &Escaper) -> Self {
        BoundaryScanner {
            separator: escaper.separator(),
            escape: escaper.escape_char(),
        }
    }

    /// Returns the byte offset of the first live separator in `s`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::{BoundaryScanner, Escaper};
    ///
    /// let scanner = BoundaryScanner::new(&Escaper::default());
    /// assert_eq!(scanner.find_live(r"a^$b$c"), Some(4));
    /// assert_eq!(scanner.find_live(r"a^$b"), None);
    /// ```
    #[must_use]
    pub fn find_live(&self, s: &str) -> Option<usize> {
        let mut state = ScanState::Normal;
        for (idx, c) in s.char_indices() {
            state = match state {
                ScanState::Normal if c == self.separator => return Some(idx),
                _ if c == self.escape => ScanState::AfterEscape,
                _ => ScanState::Normal,
            };
        }
        None
    }
}

/// Builds and parses tagged strings for one separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tagger {
    escaper: Escaper,
    scanner: BoundaryScanner,
}

impl Tagger {
    #[must_use]
    pub const fn new(escaper: Escaper) -> Self {
        Tagger {
            scanner: BoundaryScanner::new(&escaper),
            escaper,
        }
    }

    #[inline]
    #[must_use]
    pub const fn escaper(&self) -> &Escaper {
        &self.escaper
    }

    /// Returns `SEP + escape(tag) + SEP + escape(payload)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::{Escaper, Tagger};
    ///
    /// let tagger = Tagger::new(Escaper::default());
    /// assert_eq!(tagger.encode_tagged("duration", "10m"), "$duration$10m");
    /// assert_eq!(tagger.encode_tagged("duration", "1$"), "$duration$1^$");
    /// ```
    #[must_use]
    pub fn encode_tagged(&self, tag: &str, payload: &str) -> String {
        let sep = self.escaper.separator();
        let mut out = String::with_capacity(tag.len() + payload.len() + 4);
        out.push(sep);
        out.push_str(&self.escaper.escape(tag));
        out.push(sep);
        out.push_str(&self.escaper.escape(payload));
        out
    }

    /// Returns `escape(literal)`, which never begins with the separator.
    #[must_use]
    pub fn encode_plain(&self, literal: &str) -> String {
        self.escaper.escape(literal)
    }

    /// Splits `s` into its tag and value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when `s` starts with the separator but has no
    /// live boundary separator after it.
    pub fn decode(&self, s: &str) -> Result<Decoded> {
        let sep = self.escaper.separator();
        let Some(rest) = s.strip_prefix(sep) else {
            return Ok(Decoded {
                tag: None,
                value: self.escaper.unescape(s),
            });
        };

        let boundary = self
            .scanner
            .find_live(rest)
            .ok_or_else(|| Error::format(s, "missing separator between type and payload"))?;
        let tag_segment = &rest[..boundary];
        let payload_segment = &rest[boundary + sep.len_utf8()..];

        Ok(Decoded {
            tag: Some(self.escaper.unescape(tag_segment)),
            value: self.escaper.unescape(payload_segment),
        })
    }
}

impl Default for Tagger {
    fn default() -> Self {
        Tagger::new(Escaper::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger(separator: char) -> Tagger {
        Tagger::new(Escaper::new(separator).unwrap())
    }

    #[test]
    fn test_scanner_skips_escaped_separators() {
        let scanner = BoundaryScanner::new(&Escaper::default());
        assert_eq!(scanner.find_live("$"), Some(0));
        assert_eq!(scanner.find_live("^$"), None);
        assert_eq!(scanner.find_live("^^$"), None);
        assert_eq!(scanner.find_live("^x$"), Some(2));
        assert_eq!(scanner.find_live("ab"), None);
    }

    #[test]
    fn test_decode_plain() {
        let t = Tagger::default();
        let decoded = t.decode("hello").unwrap();
        assert_eq!(decoded.tag, None);
        assert_eq!(decoded.value, "hello");

        let decoded = t.decode("^$100").unwrap();
        assert_eq!(decoded.tag, None);
        assert_eq!(decoded.value, "$100");
    }

    #[test]
    fn test_decode_tagged() {
        let t = Tagger::default();
        let decoded = t.decode("$duration$10m").unwrap();
        assert_eq!(decoded.tag.as_deref(), Some("duration"));
        assert_eq!(decoded.value, "10m");
    }

    #[test]
    fn test_decode_tag_with_escaped_separator() {
        let t = Tagger::default();
        let encoded = t.encode_tagged("a$b", "x$y$");
        assert_eq!(encoded, "$a^$b$x^$y^$");
        let decoded = t.decode(&encoded).unwrap();
        assert_eq!(decoded.tag.as_deref(), Some("a$b"));
        assert_eq!(decoded.value, "x$y$");
    }

    #[test]
    fn test_decode_empty_payload() {
        let t = Tagger::default();
        let decoded = t.decode(&t.encode_tagged("unit", "")).unwrap();
        assert_eq!(decoded.tag.as_deref(), Some("unit"));
        assert_eq!(decoded.value, "");
    }

    #[test]
    fn test_decode_malformed() {
        let t = Tagger::default();
        assert!(t.decode("$").unwrap_err().is_format());
        assert!(t.decode("$duration").unwrap_err().is_format());
        assert!(t.decode("$duration^$10m").unwrap_err().is_format());
    }

    #[test]
    fn test_plain_strings_never_look_tagged() {
        let t = Tagger::default();
        for literal in ["$", "$duration$10m", "^$", ""] {
            let encoded = t.encode_plain(literal);
            assert!(!encoded.starts_with('$'));
            let decoded = t.decode(&encoded).unwrap();
            assert_eq!(decoded.tag, None);
            assert_eq!(decoded.value, literal);
        }
    }

    #[test]
    fn test_multibyte_separator() {
        let t = tagger('§');
        let encoded = t.encode_tagged("date", "2024§01");
        assert!(encoded.starts_with('§'));
        let decoded = t.decode(&encoded).unwrap();
        assert_eq!(decoded.tag.as_deref(), Some("date"));
        assert_eq!(decoded.value, "2024§01");
    }
}
