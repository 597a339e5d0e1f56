//! Writing a TypeSerializer for your own type.
//!
//! Run with: cargo run --example custom_serializer

use serde_tagged::{tagged, Error, Result, TaggedCodec, TypeSerializer, Value};

#[derive(Debug, PartialEq)]
struct Rgb(u8, u8, u8);

struct RgbSerializer;

impl TypeSerializer for RgbSerializer {
    fn type_name(&self) -> &str {
        "rgb"
    }

    fn is_serializable(&self, value: &Value) -> bool {
        value.downcast_ref::<Rgb>().is_some()
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        let Rgb(r, g, b) = value
            .downcast_ref::<Rgb>()
            .ok_or_else(|| Error::custom("not a color"))?;
        Ok(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    fn deserialize(&self, payload: &str) -> Result<Value> {
        let hex = payload
            .strip_prefix('#')
            .filter(|hex| hex.is_ascii() && hex.len() == 6)
            .ok_or_else(|| Error::custom(format!("invalid color {:?}", payload)))?;
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(Error::custom);
        Ok(Value::opaque(Rgb(channel(0)?, channel(2)?, channel(4)?)))
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let codec = TaggedCodec::builder().register(RgbSerializer).build()?;

    let theme = tagged!({
        "background": (Value::opaque(Rgb(30, 30, 46))),
        "accent": (Value::opaque(Rgb(250, 179, 135)))
    });

    let text = codec.serialize(&theme)?;
    println!("{}", text);
    assert_eq!(codec.deserialize(&text)?, theme);

    match codec.deserialize(r#""$rgb$teal""#) {
        Ok(value) => println!("unexpected: {:?}", value),
        Err(err) => println!("rejected as expected: {}", err),
    }
    assert!(codec.deserialize(r#""$rgb$#aééb""#).is_err());

    Ok(())
}
