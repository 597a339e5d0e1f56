//! Escaping of the separator character.
//!
//! Every literal separator in user text is written as the two-character
//! sequence `ESC SEP`. Nothing else changes; the escape character itself is
//! never escaped. For every string `s`, `unescape(escape(s)) == s`.

use crate::error::ConfigError;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '$';

/// The fixed escape character.
pub const ESCAPE_CHAR: char = '^';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Escaper {
    separator: char,
    escape: char,
}

impl Escaper {
    /// Creates an escaper for `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeparator`] when `separator` is the escape character.
    pub fn new(separator: char) -> Result<Self, ConfigError> {
        if separator == ESCAPE_CHAR {
            return Err(ConfigError::InvalidSeparator {
                separator,
                escape: ESCAPE_CHAR,
            });
        }
        Ok(Escaper {
            separator,
            escape: ESCAPE_CHAR,
        })
    }

    #[inline]
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    #[inline]
    #[must_use]
    pub const fn escape_char(&self) -> char {
        self.escape
    }

    /// Replaces every separator in `s` with `ESC SEP`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::Escaper;
    ///
    /// let escaper = Escaper::new('$').unwrap();
    /// assert_eq!(escaper.escape("1$"), "1^$");
    /// assert_eq!(escaper.escape("a^b"), "a^b");
    /// ```
    #[must_use]
    pub fn escape(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        for c in s.chars() {
            if c == self.separator {
                out.push(self.escape);
            }
            out.push(c);
        }
        out
    }

    /// Replaces every `ESC SEP` pair with `SEP`, left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::Escaper;
    ///
    /// let escaper = Escaper::new('$').unwrap();
    /// assert_eq!(escaper.unescape("1^$"), "1$");
    /// assert_eq!(escaper.unescape("^^$"), "^$");
    /// ```
    #[must_use]
    pub fn unescape(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == self.escape && chars.peek() == Some(&self.separator) {
                continue;
            }
            out.push(c);
        }
        out
    }
}

impl Default for Escaper {
    fn default() -> Self {
        Escaper {
            separator: DEFAULT_SEPARATOR,
            escape: ESCAPE_CHAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_only_touches_separator() {
        let escaper = Escaper::default();
        assert_eq!(escaper.escape(""), "");
        assert_eq!(escaper.escape("plain"), "plain");
        assert_eq!(escaper.escape("$"), "^$");
        assert_eq!(escaper.escape("$$"), "^$^$");
        assert_eq!(escaper.escape("^"), "^");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let escaper = Escaper::default();
        for s in ["", "$", "^", "^$", "$^", "^^$$", "a$b^c$", "ünï$cödé"] {
            assert_eq!(escaper.unescape(&escaper.escape(s)), s, "input {:?}", s);
        }
    }

    #[test]
    fn test_escaped_text_never_starts_with_separator() {
        let escaper = Escaper::default();
        for s in ["$", "$abc", "$$"] {
            assert!(!escaper.escape(s).starts_with('$'));
        }
    }

    #[test]
    fn test_custom_separator() {
        let escaper = Escaper::new('S').unwrap();
        assert_eq!(escaper.escape("Sam$"), "^Sam$");
        assert_eq!(escaper.unescape("^Sam$"), "Sam$");
    }

    #[test]
    fn test_separator_cannot_be_escape_char() {
        assert_eq!(
            Escaper::new('^'),
            Err(ConfigError::InvalidSeparator {
                separator: '^',
                escape: '^'
            })
        );
    }
}
