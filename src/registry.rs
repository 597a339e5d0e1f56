//! Pluggable serializers and the registry that indexes them.
//!
//! A serializer is a bundle of four capabilities: a unique `type` name, a
//! predicate deciding whether it handles a value, and a pair of conversions
//! to and from a string payload. Implement [`TypeSerializer`] directly, or
//! assemble a [`SerializerDescriptor`] from closures.
//!
//! ## Lookup order
//!
//! [`SerializerRegistry::lookup_by_value`] tries serializers in registration
//! order and the first one whose `is_serializable` returns `true` wins. Keep
//! predicates strict so a serializer does not claim another one's values.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagged::{SerializerDescriptor, SerializerRegistry, TypeSerializer, Value};
//! use std::sync::Arc;
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(f64);
//!
//! let celsius = SerializerDescriptor::typed::<Celsius, _, _>(
//!     "celsius",
//!     |c| c.0.to_string(),
//!     |s| s.parse().map(Celsius).map_err(serde_tagged::Error::custom),
//! );
//!
//! let registry = SerializerRegistry::build(vec![Arc::new(celsius) as Arc<dyn TypeSerializer>]).unwrap();
//! let found = registry.lookup_by_value(&Value::opaque(Celsius(21.5))).unwrap();
//! assert_eq!(found.type_name(), "celsius");
//! assert!(registry.lookup_by_type("kelvin").is_none());
//! ```

use crate::error::ConfigError;
use crate::escape::ESCAPE_CHAR;
use crate::value::OpaqueValue;
use crate::{Error, Result, Value};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A converter between some values and a string payload.
///
/// Implementations must be pure: the same input always yields the same output,
/// and `deserialize(serialize(v))` must equal `v`.
pub trait TypeSerializer: Send + Sync {
    /// Unique, non-empty name written into tagged strings.
    fn type_name(&self) -> &str;

    /// Returns `true` if this serializer handles `value`.
    fn is_serializable(&self, value: &Value) -> bool;

    /// Converts a value accepted by [`is_serializable`](Self::is_serializable) into its payload.
    fn serialize(&self, value: &Value) -> Result<String>;

    /// Rebuilds a value from a payload produced by [`serialize`](Self::serialize).
    fn deserialize(&self, payload: &str) -> Result<Value>;

    /// Names of required capabilities this serializer does not provide.
    ///
    /// Trait implementations always provide all of them; descriptors assembled
    /// piecemeal may not.
    fn missing_capabilities(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

type IsSerializableFn = Box<dyn Fn(&Value) -> bool + Send + Sync>;
type SerializeFn = Box<dyn Fn(&Value) -> Result<String> + Send + Sync>;
type DeserializeFn = Box<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// A serializer assembled from closures.
///
/// Capabilities that were never supplied are reported by
/// [`missing_capabilities`](TypeSerializer::missing_capabilities), so an
/// incomplete descriptor is rejected when the registry is built.
///
/// # Examples
///
/// ```rust
/// use serde_tagged::{SerializerDescriptor, TypeSerializer};
///
/// let incomplete = SerializerDescriptor::new("duration")
///     .with_is_serializable(|_| false)
///     .with_deserialize(|s| Ok(s.into()));
/// assert_eq!(incomplete.missing_capabilities(), vec!["serialize"]);
/// ```
#[derive(Default)]
pub struct SerializerDescriptor {
    type_name: String,
    is_serializable: Option<IsSerializableFn>,
    serialize: Option<SerializeFn>,
    deserialize: Option<DeserializeFn>,
}

impl SerializerDescriptor {
    /// Starts a descriptor with no capabilities besides its type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        SerializerDescriptor {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// A complete descriptor for opaque values of the concrete type `T`.
    pub fn typed<T, S, D>(type_name: impl Into<String>, serialize: S, deserialize: D) -> Self
    where
        T: OpaqueValue,
        S: Fn(&T) -> String + Send + Sync + 'static,
        D: Fn(&str) -> Result<T> + Send + Sync + 'static,
    {
        SerializerDescriptor::new(type_name)
            .with_is_serializable(|value| value.downcast_ref::<T>().is_some())
            .with_serialize(move |value| {
                value.downcast_ref::<T>().map(&serialize).ok_or_else(|| {
                    Error::custom(format!(
                        "expected {}, found {}",
                        std::any::type_name::<T>(),
                        value.kind()
                    ))
                })
            })
            .with_deserialize(move |payload| deserialize(payload).map(Value::opaque))
    }

    #[must_use]
    pub fn with_is_serializable<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_serializable = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<String> + Send + Sync + 'static,
    {
        self.serialize = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_deserialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        self.deserialize = Some(Box::new(f));
        self
    }

    fn missing(&self, capability: &str) -> Error {
        Error::custom(format!(
            "serializer `{}` has no {} capability",
            self.type_name, capability
        ))
    }
}

impl TypeSerializer for SerializerDescriptor {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn is_serializable(&self, value: &Value) -> bool {
        self.is_serializable.as_ref().map_or(false, |f| f(value))
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        match &self.serialize {
            Some(f) => f(value),
            None => Err(self.missing("serialize")),
        }
    }

    fn deserialize(&self, payload: &str) -> Result<Value> {
        match &self.deserialize {
            Some(f) => f(payload),
            None => Err(self.missing("deserialize")),
        }
    }

    fn missing_capabilities(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.is_serializable.is_none() {
            missing.push("isSerializable");
        }
        if self.serialize.is_none() {
            missing.push("serialize");
        }
        if self.deserialize.is_none() {
            missing.push("deserialize");
        }
        missing
    }
}

impl fmt::Debug for SerializerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerDescriptor")
            .field("type_name", &self.type_name)
            .field("missing", &self.missing_capabilities())
            .finish()
    }
}

/// Validated, immutable set of serializers.
///
/// Entries keep registration order (for value lookup) and are keyed by type
/// name (for tag lookup).
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    serializers: IndexMap<String, Arc<dyn TypeSerializer>>,
}

impl SerializerRegistry {
    /// Validates `serializers` and indexes them.
    ///
    /// Every serializer is first checked for completeness, then the whole set
    /// is checked for duplicate type names. Any failure aborts construction.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingCapabilities`] naming the index and absent capabilities
    /// - [`ConfigError::ReservedCharacter`] for a type name ending in the escape character
    /// - [`ConfigError::DuplicateType`] naming the repeated type
    pub fn build<I>(serializers: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Arc<dyn TypeSerializer>>,
    {
        let serializers: Vec<_> = serializers.into_iter().collect();

        for (index, serializer) in serializers.iter().enumerate() {
            let mut missing = Vec::new();
            if serializer.type_name().is_empty() {
                missing.push("type");
            }
            missing.extend(serializer.missing_capabilities());
            if !missing.is_empty() {
                return Err(ConfigError::MissingCapabilities { index, missing });
            }
            if serializer.type_name().ends_with(ESCAPE_CHAR) {
                return Err(ConfigError::ReservedCharacter {
                    type_name: serializer.type_name().to_string(),
                    escape: ESCAPE_CHAR,
                });
            }
        }

        let mut indexed: IndexMap<String, Arc<dyn TypeSerializer>> =
            IndexMap::with_capacity(serializers.len());
        for serializer in serializers {
            match indexed.entry(serializer.type_name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(ConfigError::DuplicateType(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(serializer);
                }
            }
        }

        debug!(
            count = indexed.len(),
            types = ?indexed.keys().collect::<Vec<_>>(),
            "built serializer registry"
        );
        Ok(SerializerRegistry {
            serializers: indexed,
        })
    }

    /// Returns the first serializer, in registration order, that accepts `value`.
    #[must_use]
    pub fn lookup_by_value(&self, value: &Value) -> Option<&dyn TypeSerializer> {
        self.serializers
            .values()
            .find(|serializer| serializer.is_serializable(value))
            .map(|serializer| serializer.as_ref())
    }

    /// Returns the serializer registered under `tag`.
    #[must_use]
    pub fn lookup_by_type(&self, tag: &str) -> Option<&dyn TypeSerializer> {
        self.serializers.get(tag).map(|serializer| serializer.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.serializers.keys().map(String::as_str)
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("types", &self.serializers.keys().collect::<Vec<_>>())
            .finish()
    }
}
