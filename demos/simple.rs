//! Built-in serializers end to end.
//!
//! Run with: cargo run --example simple

use chrono::Utc;
use num_bigint::BigInt;
use serde_tagged::{serializers, tagged, TaggedCodec, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let codec = TaggedCodec::new(serializers::standard())?;

    let supply: BigInt = "340282366920938463463374607431768211456".parse()?;
    let record = tagged!({
        "name": "ledger",
        "updated": (Value::opaque(Utc::now())),
        "supply": (Value::opaque(supply)),
        "note": "costs $5"
    });

    let text = codec.serialize(&record)?;
    println!("Encoded:\n{}\n", text);

    let back = codec.deserialize(&text)?;
    println!("Round-trips: {}", back == record);

    Ok(())
}
