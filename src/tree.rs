//! Recursive encoding and decoding of value trees.
//!
//! [`TreeCodec`] maps a [`Value`] onto an isomorphic JSON tree in which every
//! value claimed by a registered serializer has become a tagged string and
//! every plain string has been escaped. Object keys pass through untouched.
//!
//! Cyclic structures cannot be built from [`Value`], so recursion always
//! terminates; very deep trees recurse as deep as they nest.

use crate::registry::SerializerRegistry;
use crate::tag::Tagger;
use crate::{Error, Number, Result, Value, ValueMap};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct TreeCodec {
    registry: SerializerRegistry,
    tagger: Tagger,
}

impl TreeCodec {
    #[must_use]
    pub fn new(registry: SerializerRegistry, tagger: Tagger) -> Self {
        TreeCodec { registry, tagger }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SerializerRegistry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn tagger(&self) -> &Tagger {
        &self.tagger
    }

    /// Encodes `value` depth-first.
    ///
    /// A registered serializer is consulted before the node's own shape, so a
    /// serializer may claim arrays, objects or strings too.
    ///
    /// Non-finite floats (`NaN`, infinities) have no JSON form and encode as
    /// `null`, so they decode back as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Propagates serializer failures and returns [`Error::UnsupportedType`]
    /// for an opaque value no serializer claims.
    pub fn encode(&self, value: &Value) -> Result<JsonValue> {
        if let Some(serializer) = self.registry.lookup_by_value(value) {
            let payload = serializer.serialize(value)?;
            trace!(type_name = serializer.type_name(), "encoded tagged value");
            return Ok(JsonValue::String(
                self.tagger.encode_tagged(serializer.type_name(), &payload),
            ));
        }

        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.encode(item))
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),
            Value::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    map.insert(key.clone(), self.encode(item)?);
                }
                Ok(JsonValue::Object(map))
            }
            Value::String(s) => Ok(JsonValue::String(self.tagger.encode_plain(s))),
            Value::Number(n) => Ok(n.to_json().map_or(JsonValue::Null, JsonValue::Number)),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Null => Ok(JsonValue::Null),
            Value::Opaque(opaque) => Err(Error::unsupported_type(&format!(
                "no registered serializer accepts {}",
                opaque.type_name()
            ))),
        }
    }

    /// Decodes a JSON tree produced by [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for a malformed tagged string,
    /// [`Error::UnknownType`] for a tag with no registered serializer, and
    /// propagates serializer failures.
    pub fn decode(&self, value: &JsonValue) -> Result<Value> {
        match value {
            JsonValue::String(s) => self.decode_str(s),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.decode(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            JsonValue::Object(entries) => entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), self.decode(item)?)))
                .collect::<Result<ValueMap>>()
                .map(Value::Object),
            JsonValue::Number(n) => Ok(Number::from_json(n).map_or(Value::Null, Value::Number)),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Null => Ok(Value::Null),
        }
    }

    fn decode_str(&self, s: &str) -> Result<Value> {
        let decoded = self.tagger.decode(s)?;
        let Some(tag) = decoded.tag else {
            return Ok(Value::String(decoded.value));
        };

        match self.registry.lookup_by_type(&tag) {
            Some(serializer) => {
                trace!(type_name = %tag, "decoded tagged value");
                serializer.deserialize(&decoded.value)
            }
            None => {
                debug!(type_name = %tag, "no serializer registered for tag");
                Err(Error::unknown_type(&tag))
            }
        }
    }
}
