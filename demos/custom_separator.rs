//! Choosing another separator, and producing a JSON tree instead of text.
//!
//! Run with: cargo run --example custom_separator

use serde_tagged::{
    serializers::BigIntSerializer, tagged, CodecOptions, SerializeOptions, TaggedCodec, Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let big = Value::opaque(num_bigint::BigInt::from(u64::MAX) * 3u32);

    // `$` is common in prices; `#` keeps them readable
    let codec = TaggedCodec::builder()
        .register(BigIntSerializer)
        .options(CodecOptions::pretty().with_separator('#'))
        .build()?;

    let order = tagged!({"total": (big.clone()), "label": "$ #1"});
    println!("{}\n", codec.serialize(&order)?);

    // The tree form can be embedded in a larger document
    let tree = codec
        .serialize_with(&order, SerializeOptions::to_object())?
        .into_tree()
        .ok_or("expected a tree")?;
    let envelope = serde_json::json!({"event": "checkout", "order": tree});
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    let back = codec.deserialize(&envelope["order"])?;
    assert_eq!(back, order);

    Ok(())
}
