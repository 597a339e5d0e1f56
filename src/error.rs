//! Error types for tagged encoding and decoding.
//!
//! ## Error Categories
//!
//! - **Configuration Errors** ([`ConfigError`]): raised while building a codec, when a
//!   serializer is incomplete, two serializers share a type, or the separator is unusable
//! - **Format Errors**: a string starts with the separator but carries no tag boundary
//! - **Unknown Types**: a well-formed tag names a type nobody registered
//! - **Unsupported Types**: an opaque value reached the encoder but no serializer claims it
//! - **JSON / I/O Errors**: failures of the underlying text codec or of a reader/writer
//!
//! A failed call leaves the codec untouched; it can be used again right away.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagged::{Error, TaggedCodec};
//!
//! let codec = TaggedCodec::builder().build().unwrap();
//! let err = codec.deserialize(r#""$duration$10m""#).unwrap_err();
//! assert!(err.is_unknown_type());
//! ```

use std::fmt;
use thiserror::Error;

/// Construction-time failures. A codec is never built from a configuration
/// that produced one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A serializer lacks one or more of `type`, `isSerializable`, `serialize`, `deserialize`.
    #[error("serializer at index {index} is missing required capabilities: {}", missing.join(", "))]
    MissingCapabilities {
        index: usize,
        missing: Vec<&'static str>,
    },

    /// Two serializers declare the same type name.
    #[error("duplicate serializer type `{0}`")]
    DuplicateType(String),

    /// A type name ends in the escape character, hiding the type/payload boundary.
    #[error("serializer type `{type_name}` ends in the reserved escape character {escape:?}")]
    ReservedCharacter { type_name: String, escape: char },

    /// The separator collides with the escape character.
    #[error("separator {separator:?} must differ from the escape character {escape:?}")]
    InvalidSeparator { separator: char, escape: char },
}

/// Represents all possible errors raised by the codec.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid codec configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A string begins with the separator but no live boundary separator follows it
    #[error("Malformed tagged string {input:?}: {msg}")]
    Format { input: String, msg: String },

    /// A tag was decoded but no registered serializer has that type
    #[error("Unknown serializer type `{0}`")]
    UnknownType(String),

    /// A value the underlying text format cannot hold and no serializer claims
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Failure of the underlying JSON text codec
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error, typically raised by a serializer implementation
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error for a malformed tagged string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::Error;
    ///
    /// let err = Error::format("$broken", "no closing separator");
    /// assert!(err.is_format());
    /// assert!(err.to_string().contains("$broken"));
    /// ```
    pub fn format(input: &str, msg: &str) -> Self {
        Error::Format {
            input: input.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unknown-type error naming the offending tag.
    pub fn unknown_type(tag: &str) -> Self {
        Error::UnknownType(tag.to_string())
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// Serializer implementations use this to report payloads they cannot parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::Error;
    ///
    /// let err = Error::custom("bad duration unit");
    /// assert!(err.to_string().contains("bad duration unit"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for construction-time configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns `true` for malformed tagged strings.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    /// Returns `true` when a decoded tag names an unregistered type.
    #[must_use]
    pub const fn is_unknown_type(&self) -> bool {
        matches!(self, Error::UnknownType(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
