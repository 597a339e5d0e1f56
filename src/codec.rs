//! The public entry point.
//!
//! [`TaggedCodec`] binds a validated serializer registry, the separator
//! configuration and a [`TextCodec`] (JSON by default) together:
//!
//! ```text
//! serialize:    Value --TreeCodec::encode--> JSON tree --TextCodec::stringify--> text
//! deserialize:  text  --TextCodec::parse-->  JSON tree --TreeCodec::decode-->    Value
//! ```
//!
//! A codec is immutable once built and can be shared across threads.

use crate::escape::Escaper;
use crate::registry::{SerializerRegistry, TypeSerializer};
use crate::tag::Tagger;
use crate::tree::TreeCodec;
use crate::{CodecOptions, Error, Result, SerializeOptions, Value};
use serde_json::Value as JsonValue;
use std::io;
use std::sync::Arc;

/// The underlying tree-text format.
pub trait TextCodec: Send + Sync {
    /// Parses text into a JSON tree.
    fn parse(&self, text: &str) -> Result<JsonValue>;

    /// Renders a JSON tree as text.
    fn stringify(&self, tree: &JsonValue) -> Result<String>;
}

/// [`TextCodec`] backed by `serde_json`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonText {
    pub pretty: bool,
}

impl TextCodec for JsonText {
    fn parse(&self, text: &str) -> Result<JsonValue> {
        Ok(serde_json::from_str(text)?)
    }

    fn stringify(&self, tree: &JsonValue) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(text)
    }
}

/// Input accepted by [`TaggedCodec::deserialize`]: text or an already parsed tree.
#[derive(Clone, Copy, Debug)]
pub enum Input<'a> {
    Text(&'a str),
    Tree(&'a JsonValue),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a JsonValue> for Input<'a> {
    fn from(tree: &'a JsonValue) -> Self {
        Input::Tree(tree)
    }
}

/// Output of [`TaggedCodec::serialize_with`].
#[derive(Clone, Debug, PartialEq)]
pub enum Encoded {
    Text(String),
    Tree(JsonValue),
}

impl Encoded {
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Encoded::Text(text) => Some(text),
            Encoded::Tree(_) => None,
        }
    }

    #[must_use]
    pub fn into_tree(self) -> Option<JsonValue> {
        match self {
            Encoded::Tree(tree) => Some(tree),
            Encoded::Text(_) => None,
        }
    }
}

/// Encodes and decodes value trees, carrying opaque values as tagged strings.
///
/// # Examples
///
/// ```rust
/// use serde_tagged::{tagged, SerializerDescriptor, TaggedCodec, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Duration { amount: u32, unit: String }
///
/// let codec = TaggedCodec::builder()
///     .register(SerializerDescriptor::typed::<Duration, _, _>(
///         "duration",
///         |d| format!("{}{}", d.amount, d.unit),
///         |s| {
///             let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
///             Ok(Duration {
///                 amount: s[..split].parse().map_err(serde_tagged::Error::custom)?,
///                 unit: s[split..].to_string(),
///             })
///         },
///     ))
///     .build()
///     .unwrap();
///
/// let value = tagged!({
///     "timeout": (Value::opaque(Duration { amount: 10, unit: "m".into() })),
///     "price": "$5"
/// });
///
/// let text = codec.serialize(&value).unwrap();
/// assert_eq!(text, r#"{"timeout":"$duration$10m","price":"^$5"}"#);
/// assert_eq!(codec.deserialize(&text).unwrap(), value);
/// ```
#[derive(Clone)]
pub struct TaggedCodec {
    tree: TreeCodec,
    text: Arc<dyn TextCodec>,
    options: CodecOptions,
}

impl TaggedCodec {
    /// Builds a codec with default options (`$` separator, compact JSON).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the serializers fail validation.
    pub fn new<I>(serializers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn TypeSerializer>>,
    {
        Self::with_options(serializers, CodecOptions::default())
    }

    /// Builds a codec with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the serializers fail validation or the
    /// separator is the escape character.
    pub fn with_options<I>(serializers: I, options: CodecOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn TypeSerializer>>,
    {
        let text = Arc::new(JsonText {
            pretty: options.pretty,
        });
        Self::assemble(serializers, options, text)
    }

    #[must_use]
    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    fn assemble<I>(serializers: I, options: CodecOptions, text: Arc<dyn TextCodec>) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn TypeSerializer>>,
    {
        let registry = SerializerRegistry::build(serializers)?;
        let escaper = Escaper::new(options.separator)?;
        Ok(TaggedCodec {
            tree: TreeCodec::new(registry, Tagger::new(escaper)),
            text,
            options,
        })
    }

    #[inline]
    #[must_use]
    pub fn separator(&self) -> char {
        self.options.separator
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SerializerRegistry {
        self.tree.registry()
    }

    /// Encodes `value` to text.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures, returns [`Error::UnsupportedType`] for
    /// an opaque value no serializer claims, and [`Error::Json`] if the text
    /// codec fails.
    pub fn serialize(&self, value: &Value) -> Result<String> {
        let tree = self.tree.encode(value)?;
        self.text.stringify(&tree)
    }

    /// Encodes `value` to the intermediate JSON tree.
    ///
    /// The tree is already JSON-native and can be embedded in a larger
    /// document before final serialization.
    ///
    /// # Errors
    ///
    /// Same as [`serialize`](Self::serialize), minus text codec failures.
    pub fn to_tree(&self, value: &Value) -> Result<JsonValue> {
        self.tree.encode(value)
    }

    /// Encodes `value` to text, or to a JSON tree when `options.to_object` is set.
    ///
    /// # Errors
    ///
    /// Same as [`serialize`](Self::serialize).
    pub fn serialize_with(&self, value: &Value, options: SerializeOptions) -> Result<Encoded> {
        if options.to_object {
            self.to_tree(value).map(Encoded::Tree)
        } else {
            self.serialize(value).map(Encoded::Text)
        }
    }

    /// Decodes text or a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for unparseable text, [`Error::Format`] for a
    /// malformed tagged string, [`Error::UnknownType`] for an unregistered
    /// tag, and propagates serializer failures.
    pub fn deserialize<'a>(&self, input: impl Into<Input<'a>>) -> Result<Value> {
        match input.into() {
            Input::Text(text) => {
                let tree = self.text.parse(text)?;
                self.tree.decode(&tree)
            }
            Input::Tree(tree) => self.tree.decode(tree),
        }
    }

    /// Decodes an already parsed JSON tree.
    ///
    /// # Errors
    ///
    /// Same as [`deserialize`](Self::deserialize), minus parse failures.
    pub fn from_tree(&self, tree: &JsonValue) -> Result<Value> {
        self.tree.decode(tree)
    }

    /// Encodes `value` and writes the text to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or writing to the writer fails.
    pub fn to_writer<W: io::Write>(&self, mut writer: W, value: &Value) -> Result<()> {
        let text = self.serialize(value)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(&e.to_string()))
    }

    /// Reads all text from `reader` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or decoding fails.
    pub fn from_reader<R: io::Read>(&self, mut reader: R) -> Result<Value> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io(&e.to_string()))?;
        self.deserialize(text.as_str())
    }
}

impl std::fmt::Debug for TaggedCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedCodec")
            .field("registry", self.tree.registry())
            .field("options", &self.options)
            .finish()
    }
}

/// Step-by-step construction of a [`TaggedCodec`].
///
/// # Examples
///
/// ```rust
/// use serde_tagged::{serializers::BigIntSerializer, TaggedCodec};
///
/// let codec = TaggedCodec::builder()
///     .register(BigIntSerializer)
///     .separator('#')
///     .pretty(true)
///     .build()
///     .unwrap();
/// assert_eq!(codec.separator(), '#');
/// assert_eq!(codec.registry().len(), 1);
/// ```
#[derive(Default)]
pub struct CodecBuilder {
    serializers: Vec<Arc<dyn TypeSerializer>>,
    options: CodecOptions,
    text: Option<Arc<dyn TextCodec>>,
}

impl CodecBuilder {
    /// Appends a serializer. Registration order decides lookup priority.
    #[must_use]
    pub fn register<S: TypeSerializer + 'static>(mut self, serializer: S) -> Self {
        self.serializers.push(Arc::new(serializer));
        self
    }

    #[must_use]
    pub fn register_arc(mut self, serializer: Arc<dyn TypeSerializer>) -> Self {
        self.serializers.push(serializer);
        self
    }

    #[must_use]
    pub fn register_all<I>(mut self, serializers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TypeSerializer>>,
    {
        self.serializers.extend(serializers);
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: char) -> Self {
        self.options.separator = separator;
        self
    }

    /// Pretty-prints text produced by the default JSON text codec.
    ///
    /// Has no effect once [`text_codec`](Self::text_codec) supplies another
    /// codec; the built codec then reports `pretty` as `false`.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.options.pretty = pretty;
        self
    }

    #[must_use]
    pub fn options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the default JSON text codec.
    #[must_use]
    pub fn text_codec<T: TextCodec + 'static>(mut self, text: T) -> Self {
        self.text = Some(Arc::new(text));
        self
    }

    /// Validates the configuration and builds the codec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on invalid serializers or separator.
    pub fn build(self) -> Result<TaggedCodec> {
        let mut options = self.options;
        let text = match self.text {
            Some(text) => {
                options.pretty = false;
                text
            }
            None => Arc::new(JsonText {
                pretty: options.pretty,
            }) as Arc<dyn TextCodec>,
        };
        TaggedCodec::assemble(self.serializers, options, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::registry::SerializerDescriptor;
    use crate::tagged;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Token(String);

    fn token() -> SerializerDescriptor {
        SerializerDescriptor::typed::<Token, _, _>(
            "token",
            |t| t.0.clone(),
            |s| Ok(Token(s.to_string())),
        )
    }

    #[test]
    fn test_serialize_to_text_and_tree() {
        let codec = TaggedCodec::builder().register(token()).build().unwrap();
        let value = tagged!({"t": (Value::opaque(Token("a$b".into())))});

        let text = codec.serialize(&value).unwrap();
        assert_eq!(text, r#"{"t":"$token$a^$b"}"#);

        let tree = codec
            .serialize_with(&value, SerializeOptions::to_object())
            .unwrap()
            .into_tree()
            .unwrap();
        assert_eq!(tree, json!({"t": "$token$a^$b"}));

        assert_eq!(codec.deserialize(text.as_str()).unwrap(), value);
        assert_eq!(codec.deserialize(&tree).unwrap(), value);
    }

    #[test]
    fn test_invalid_separator() {
        let err = TaggedCodec::builder().separator('^').build().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidSeparator { .. })
        ));
    }

    #[test]
    fn test_pretty_output() {
        let codec = TaggedCodec::with_options(Vec::new(), CodecOptions::pretty()).unwrap();
        let text = codec.serialize(&tagged!({"a": 1})).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(codec.deserialize(&text).unwrap(), tagged!({"a": 1}));
    }

    #[test]
    fn test_bad_json() {
        let codec = TaggedCodec::new(Vec::new()).unwrap();
        assert!(matches!(
            codec.deserialize("{not json").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn test_usable_after_failure() {
        let codec = TaggedCodec::builder().register(token()).build().unwrap();
        assert!(codec.deserialize(r#""$nope$x""#).is_err());
        assert!(codec.deserialize(r#""$token""#).is_err());
        assert_eq!(
            codec.deserialize(r#""$token$x""#).unwrap(),
            Value::opaque(Token("x".into()))
        );
    }

    #[test]
    fn test_writer_and_reader() {
        let codec = TaggedCodec::builder().register(token()).build().unwrap();
        let value = Value::Array(vec![Value::opaque(Token("w".into())), Value::from("^")]);

        let mut buffer = Vec::new();
        codec.to_writer(&mut buffer, &value).unwrap();
        assert_eq!(codec.from_reader(buffer.as_slice()).unwrap(), value);
    }

    struct UpperKeys;

    impl TextCodec for UpperKeys {
        fn parse(&self, text: &str) -> Result<JsonValue> {
            JsonText::default().parse(text)
        }

        fn stringify(&self, tree: &JsonValue) -> Result<String> {
            Ok(JsonText::default().stringify(tree)?.to_uppercase())
        }
    }

    #[test]
    fn test_custom_text_codec() {
        let codec = TaggedCodec::builder().text_codec(UpperKeys).build().unwrap();
        assert_eq!(codec.serialize(&tagged!({"a": "b"})).unwrap(), r#"{"A":"B"}"#);
    }

    #[test]
    fn test_pretty_ignored_with_custom_text_codec() {
        let codec = TaggedCodec::builder()
            .pretty(true)
            .text_codec(UpperKeys)
            .build()
            .unwrap();
        assert!(!codec.options().pretty);
        assert_eq!(codec.serialize(&tagged!([1, 2])).unwrap(), "[1,2]");

        let codec = TaggedCodec::builder().pretty(true).build().unwrap();
        assert!(codec.options().pretty);
    }

    #[test]
    fn test_codec_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TaggedCodec>();
    }
}
