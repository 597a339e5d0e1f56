//! Dynamic value representation.
//!
//! This module provides the [`Value`] enum, the tree the codec walks. Besides
//! the JSON-native shapes (null, booleans, numbers, strings, arrays, objects)
//! a value can be [`Value::Opaque`]: any Rust value JSON cannot represent
//! directly, to be handled by a registered
//! [`TypeSerializer`](crate::TypeSerializer).
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_tagged::{tagged, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = tagged!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ## Opaque Values
//!
//! ```rust
//! use serde_tagged::Value;
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(f64);
//!
//! let value = Value::opaque(Celsius(21.5));
//! assert!(value.is_opaque());
//! assert_eq!(value.downcast_ref::<Celsius>(), Some(&Celsius(21.5)));
//! assert_eq!(value, Value::opaque(Celsius(21.5)));
//! ```

use crate::ValueMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value tree node.
///
/// Equality is structural; opaque values compare equal when they hold the
/// same concrete type and that type's `PartialEq` says so.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ValueMap),
    Opaque(Opaque),
}

/// A JSON-representable number.
///
/// # Examples
///
/// ```rust
/// use serde_tagged::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Floats convert only when they have no fractional part and fit in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Converts to a JSON number. Non-finite floats have no JSON form.
    pub(crate) fn to_json(self) -> Option<serde_json::Number> {
        match self {
            Number::Integer(i) => Some(serde_json::Number::from(i)),
            Number::Float(f) => serde_json::Number::from_f64(f),
        }
    }

    pub(crate) fn from_json(number: &serde_json::Number) -> Option<Self> {
        match number.as_i64() {
            Some(i) => Some(Number::Integer(i)),
            None => number.as_f64().map(Number::Float),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Object-safe view of a value stored behind [`Opaque`].
///
/// Implemented automatically for every `T: Any + Debug + PartialEq + Send + Sync`.
pub trait OpaqueValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Compares against another opaque value of possibly different type.
    fn dyn_eq(&self, other: &dyn OpaqueValue) -> bool;

    /// Name of the concrete Rust type, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T> OpaqueValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn OpaqueValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A shared, type-erased handle to a value JSON cannot represent.
///
/// Cloning is cheap; the wrapped value is immutable.
#[derive(Clone)]
pub struct Opaque(Arc<dyn OpaqueValue>);

impl Opaque {
    pub fn new<T: OpaqueValue>(value: T) -> Self {
        Opaque(Arc::new(value))
    }

    /// Returns the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.0).finish()
    }
}

impl Value {
    /// Wraps any Rust value as an opaque node.
    pub fn opaque<T: OpaqueValue>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Value::Opaque(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagged::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }

    /// If the value is an opaque `T`, returns a reference to it.
    ///
    /// This is the usual first step of a
    /// [`TypeSerializer::is_serializable`](crate::TypeSerializer::is_serializable)
    /// implementation.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_opaque().and_then(Opaque::downcast_ref::<T>)
    }

    /// Short description of the node's kind, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Opaque(opaque) => opaque.type_name(),
        }
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer, found {}", value.kind()))
        })
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.kind()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

/// Plain structural conversion: strings are taken verbatim, no tags are decoded.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Number::from_json(&n).map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[derive(Debug, PartialEq)]
    struct Meters(u32);

    #[derive(Debug, PartialEq)]
    struct Feet(u32);

    #[test]
    fn test_opaque_equality() {
        assert_eq!(Value::opaque(Meters(3)), Value::opaque(Meters(3)));
        assert_ne!(Value::opaque(Meters(3)), Value::opaque(Meters(4)));
        assert_ne!(Value::opaque(Meters(3)), Value::opaque(Feet(3)));
        assert_ne!(Value::opaque(Meters(3)), Value::from(3));
    }

    #[test]
    fn test_opaque_downcast() {
        let value = Value::opaque(Meters(7));
        assert_eq!(value.downcast_ref::<Meters>(), Some(&Meters(7)));
        assert!(value.downcast_ref::<Feet>().is_none());
        assert!(value.as_opaque().unwrap().is::<Meters>());
        assert!(value.kind().ends_with("Meters"));
        assert!(Value::from("x").downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_opaque_clone_shares_value() {
        let value = Value::opaque(Meters(1));
        let copy = value.clone();
        assert_eq!(value, copy);
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(Value::from(42.0)).unwrap(), 42);
        assert!(i64::try_from(Value::from("test")).is_err());
        assert_eq!(f64::try_from(Value::from(3)).unwrap(), 3.0);
        assert!(bool::try_from(Value::from(1)).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
    }

    #[test]
    fn test_from_json_is_plain() {
        let json = serde_json::json!({"a": [1, 2.5, "$x$y"], "b": null});
        let value = Value::from(json);
        let obj = value.as_object().unwrap();
        let arr = obj.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(arr[0], Value::Number(Number::Integer(1)));
        assert_eq!(arr[1], Value::Number(Number::Float(2.5)));
        assert_eq!(arr[2], Value::from("$x$y"));
        assert!(obj.get("b").unwrap().is_null());
    }

    #[test]
    fn test_number_to_json() {
        assert!(Number::Float(f64::NAN).to_json().is_none());
        assert!(Number::Float(f64::INFINITY).to_json().is_none());
        assert_eq!(
            Number::Integer(-5).to_json(),
            Some(serde_json::Number::from(-5))
        );
    }
}
