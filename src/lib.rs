//! # serde_tagged
//!
//! Carry values JSON cannot represent (timestamps, big integers, durations,
//! your own domain types) through JSON text, by encoding them as specially
//! tagged strings produced by pluggable serializers.
//!
//! ## How it works
//!
//! You register [`TypeSerializer`]s, each with a unique type name. While
//! encoding a [`Value`] tree, every node a serializer claims becomes a string
//!
//! ```text
//! $<type>$<payload>
//! ```
//!
//! and every ordinary string is escaped so it can never be mistaken for one:
//! each separator inside user text is written as `^$`. Decoding walks the
//! tree back, splits tagged strings at their first unescaped separator and
//! hands the payload to the serializer registered for the type.
//!
//! ## Key Features
//!
//! - **Always round-trips**: payloads, literals and type names may contain the
//!   separator; escaping is transparent
//! - **Deterministic dispatch**: serializers are tried in registration order,
//!   first match wins
//! - **Configurable separator**: any character except the escape character `^`
//! - **Text or tree**: produce JSON text, or a JSON tree to embed in a larger document
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_tagged::{tagged, SerializerDescriptor, TaggedCodec, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct Duration { amount: u32, unit: String }
//!
//! let codec = TaggedCodec::builder()
//!     .register(SerializerDescriptor::typed::<Duration, _, _>(
//!         "duration",
//!         |d| format!("{}{}", d.amount, d.unit),
//!         |s| {
//!             let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
//!             Ok(Duration {
//!                 amount: s[..split].parse().map_err(serde_tagged::Error::custom)?,
//!                 unit: s[split..].to_string(),
//!             })
//!         },
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let value = tagged!({
//!     "number": 1,
//!     "timeout": (Value::opaque(Duration { amount: 10, unit: "m".into() }))
//! });
//!
//! let text = codec.serialize(&value).unwrap();
//! assert_eq!(text, r#"{"number":1,"timeout":"$duration$10m"}"#);
//!
//! let back = codec.deserialize(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Built-in Serializers
//!
//! [`serializers::standard()`] provides `date` (`chrono::DateTime<Utc>`) and
//! `bigint` (`num_bigint::BigInt`).
//!
//! ## Limitations
//!
//! - Type names may not end in the escape character `^`
//! - Encoded size is not minimized
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - built-in serializers end to end
//! - **`custom_serializer.rs`** - writing a [`TypeSerializer`] for your own type
//! - **`custom_separator.rs`** - choosing another separator, tree output
//!
//! Run any example with: `cargo run --example <name>`

pub mod codec;
pub mod error;
pub mod escape;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod serializers;
pub mod tag;
pub mod tree;
pub mod value;

pub use codec::{CodecBuilder, Encoded, Input, JsonText, TaggedCodec, TextCodec};
pub use error::{ConfigError, Error, Result};
pub use escape::{Escaper, DEFAULT_SEPARATOR, ESCAPE_CHAR};
pub use map::ValueMap;
pub use options::{CodecOptions, SerializeOptions};
pub use registry::{SerializerDescriptor, SerializerRegistry, TypeSerializer};
pub use tag::{BoundaryScanner, Decoded, Tagger};
pub use tree::TreeCodec;
pub use value::{Number, Opaque, OpaqueValue, Value};

use serde::Serialize;

/// Convert any `T: Serialize` to a plain [`Value`].
///
/// The result contains no opaque nodes; strings are kept verbatim.
///
/// # Examples
///
/// ```rust
/// use serde_tagged::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_object().and_then(|o| o.get("x")), Some(&Value::from(1)));
/// ```
///
/// # Errors
///
/// Returns an error if `T`'s `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    Ok(Value::from(serde_json::to_value(value)?))
}
