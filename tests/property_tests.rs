//! Property-based tests for the round-trip guarantees.
//!
//! Strings are drawn from an alphabet heavy in separators and escape
//! characters so collisions are the common case, not the rare one.

mod common;

use common::{Duration, DurationSerializer};
use proptest::prelude::*;
use serde_tagged::{Escaper, SerializerDescriptor, TaggedCodec, TypeSerializer, Value, ValueMap};

const ALPHABET: &str = "[a-z$^S~ ]{0,8}";

fn codec(separator: char) -> TaggedCodec {
    TaggedCodec::builder()
        .register(DurationSerializer)
        .separator(separator)
        .build()
        .unwrap()
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1000i32..1000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        ALPHABET.prop_map(Value::from),
        (any::<u32>(), "[a-zA-Z$^~]{0,4}")
            .prop_map(|(amount, unit)| Value::opaque(Duration::new(amount, &unit))),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((ALPHABET, inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<ValueMap>())),
        ]
    })
}

fn separator() -> impl Strategy<Value = char> {
    prop_oneof![Just('$'), Just('S'), Just('~'), Just('§')]
}

proptest! {
    #[test]
    fn prop_escape_round_trip(s in ".*") {
        let escaper = Escaper::default();
        prop_assert_eq!(escaper.unescape(&escaper.escape(&s)), s);
    }

    #[test]
    fn prop_plain_never_starts_with_separator(s in ALPHABET, sep in separator()) {
        let escaper = Escaper::new(sep).unwrap();
        prop_assert!(!escaper.escape(&s).starts_with(sep));
    }

    #[test]
    fn prop_tree_round_trip(value in tree(), sep in separator()) {
        let codec = codec(sep);
        let tree = codec.to_tree(&value).unwrap();
        prop_assert_eq!(codec.from_tree(&tree).unwrap(), value);
    }

    #[test]
    fn prop_text_round_trip(value in tree(), sep in separator()) {
        let codec = codec(sep);
        let text = codec.serialize(&value).unwrap();
        prop_assert_eq!(codec.deserialize(&text).unwrap(), value);
    }

    #[test]
    fn prop_tagged_payload_collisions(payload in ALPHABET, type_name in "[a-z$S~]{1,6}", sep in separator()) {
        let descriptor = SerializerDescriptor::typed::<String, _, _>(
            type_name.clone(),
            |s| s.clone(),
            |s| Ok(s.to_string()),
        );
        let codec = TaggedCodec::builder()
            .register(descriptor)
            .separator(sep)
            .build()
            .unwrap();

        let value = Value::opaque(payload);
        let tree = codec.to_tree(&value).unwrap();
        let encoded = tree.as_str().unwrap();
        prop_assert!(encoded.starts_with(sep));
        prop_assert_eq!(codec.from_tree(&tree).unwrap(), value);
    }

    #[test]
    fn prop_first_match_wins(amount in any::<u32>(), order in any::<bool>()) {
        let other: std::sync::Arc<dyn TypeSerializer> = std::sync::Arc::new(
            SerializerDescriptor::typed::<Duration, _, _>(
                "other",
                |d| d.amount.to_string(),
                |s| Ok(Duration::new(s.parse().map_err(serde_tagged::Error::custom)?, "")),
            ),
        );
        let duration: std::sync::Arc<dyn TypeSerializer> = std::sync::Arc::new(DurationSerializer);
        let (first, second) = if order { (duration, other) } else { (other, duration) };
        let expected = first.type_name().to_string();

        let codec = TaggedCodec::builder()
            .register_arc(first)
            .register_arc(second)
            .build()
            .unwrap();
        let tree = codec.to_tree(&Value::opaque(Duration::new(amount, "s"))).unwrap();
        let found = codec.registry().lookup_by_value(&Value::opaque(Duration::new(amount, "s")));
        prop_assert_eq!(found.map(|s| s.type_name().to_string()), Some(expected.clone()));
        let prefix = format!("${}$", expected);
        prop_assert!(tree.as_str().unwrap().starts_with(&prefix));
    }
}
