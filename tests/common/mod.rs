//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_tagged::{Error, Result, TypeSerializer, Value};

/// A span of time such as `10m`: an amount followed by a free-form unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Duration {
    pub amount: u32,
    pub unit: String,
}

impl Duration {
    pub fn new(amount: u32, unit: &str) -> Self {
        Duration {
            amount,
            unit: unit.to_string(),
        }
    }
}

pub struct DurationSerializer;

impl TypeSerializer for DurationSerializer {
    fn type_name(&self) -> &str {
        "duration"
    }

    fn is_serializable(&self, value: &Value) -> bool {
        value.downcast_ref::<Duration>().is_some()
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        let duration = value
            .downcast_ref::<Duration>()
            .ok_or_else(|| Error::custom("not a duration"))?;
        Ok(format!("{}{}", duration.amount, duration.unit))
    }

    fn deserialize(&self, payload: &str) -> Result<Value> {
        let split = payload
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(payload.len());
        let amount = payload[..split].parse().map_err(Error::custom)?;
        Ok(Value::opaque(Duration::new(amount, &payload[split..])))
    }
}
