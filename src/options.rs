//! Configuration options for tagged encoding.
//!
//! This module provides two option types:
//!
//! - [`CodecOptions`]: fixed for the lifetime of a [`TaggedCodec`](crate::TaggedCodec)
//!   (separator character, pretty-printed text output)
//! - [`SerializeOptions`]: chosen per call (text output or intermediate JSON tree)
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagged::{CodecOptions, TaggedCodec};
//!
//! // Use `#` instead of the default `$` separator
//! let options = CodecOptions::new().with_separator('#');
//! let codec = TaggedCodec::with_options(Vec::new(), options).unwrap();
//! assert_eq!(codec.separator(), '#');
//! ```

use crate::escape::DEFAULT_SEPARATOR;

/// Configuration options for a [`TaggedCodec`](crate::TaggedCodec).
///
/// # Examples
///
/// ```rust
/// use serde_tagged::CodecOptions;
///
/// // Default options: `$` separator, compact text
/// let options = CodecOptions::new();
/// assert_eq!(options.separator, '$');
///
/// // Pretty-printed text with a custom separator
/// let options = CodecOptions::pretty().with_separator('S');
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub separator: char,
    pub pretty: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            separator: DEFAULT_SEPARATOR,
            pretty: false,
        }
    }
}

impl CodecOptions {
    /// Creates default options (`$` separator, compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed text output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::CodecOptions;
    ///
    /// let options = CodecOptions::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        CodecOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the separator character.
    ///
    /// The separator must differ from the escape character `^`; this is
    /// checked when the codec is built.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Enables or disables pretty-printed text output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Per-call options for [`TaggedCodec::serialize_with`](crate::TaggedCodec::serialize_with).
///
/// With `to_object` set, the encoded JSON tree is returned instead of text, so it
/// can be embedded in a larger document before final serialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    pub to_object: bool,
}

impl SerializeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options requesting the intermediate JSON tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::SerializeOptions;
    ///
    /// assert!(SerializeOptions::to_object().to_object);
    /// assert!(!SerializeOptions::new().to_object);
    /// ```
    #[must_use]
    pub fn to_object() -> Self {
        SerializeOptions { to_object: true }
    }
}
