//! Ready-made serializers for common values JSON cannot represent.
//!
//! | Serializer | Type tag | Rust type | Payload |
//! |------------|----------|-----------|---------|
//! | [`DateTimeSerializer`] | `date` | `chrono::DateTime<Utc>` | RFC 3339, e.g. `2024-01-15T10:30:00Z` |
//! | [`BigIntSerializer`] | `bigint` | `num_bigint::BigInt` | decimal digits, e.g. `-123456789012345678901234567890` |
//!
//! None of them is registered unless asked for.
//!
//! ## Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use serde_tagged::{serializers, TaggedCodec, Value};
//!
//! let codec = TaggedCodec::new(serializers::standard()).unwrap();
//! let created = Value::opaque(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
//!
//! let text = codec.serialize(&created).unwrap();
//! assert_eq!(text, r#""$date$2024-01-15T10:30:00Z""#);
//! assert_eq!(codec.deserialize(&text).unwrap(), created);
//! ```

use crate::registry::TypeSerializer;
use crate::{Error, Result, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::sync::Arc;

/// UTC timestamps as RFC 3339 text, keeping sub-second precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateTimeSerializer;

impl TypeSerializer for DateTimeSerializer {
    fn type_name(&self) -> &str {
        "date"
    }

    fn is_serializable(&self, value: &Value) -> bool {
        value.downcast_ref::<DateTime<Utc>>().is_some()
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        value
            .downcast_ref::<DateTime<Utc>>()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .ok_or_else(|| Error::custom(format!("expected date, found {}", value.kind())))
    }

    fn deserialize(&self, payload: &str) -> Result<Value> {
        let dt = DateTime::parse_from_rfc3339(payload)
            .map_err(|e| Error::custom(format!("invalid date {:?}: {}", payload, e)))?;
        Ok(Value::opaque(dt.with_timezone(&Utc)))
    }
}

/// Arbitrary-precision integers as decimal text.
#[derive(Clone, Copy, Debug, Default)]
pub struct BigIntSerializer;

impl TypeSerializer for BigIntSerializer {
    fn type_name(&self) -> &str {
        "bigint"
    }

    fn is_serializable(&self, value: &Value) -> bool {
        value.downcast_ref::<BigInt>().is_some()
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        value
            .downcast_ref::<BigInt>()
            .map(BigInt::to_string)
            .ok_or_else(|| Error::custom(format!("expected bigint, found {}", value.kind())))
    }

    fn deserialize(&self, payload: &str) -> Result<Value> {
        let n: BigInt = payload
            .parse()
            .map_err(|e| Error::custom(format!("invalid bigint {:?}: {}", payload, e)))?;
        Ok(Value::opaque(n))
    }
}

/// The built-in serializers, dates first.
#[must_use]
pub fn standard() -> Vec<Arc<dyn TypeSerializer>> {
    vec![
        Arc::new(DateTimeSerializer) as Arc<dyn TypeSerializer>,
        Arc::new(BigIntSerializer),
    ]
}
