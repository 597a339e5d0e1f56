/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Any other expression, such as an opaque value, goes through
/// `Value::from`; wrap it in parentheses when it spans several tokens.
///
/// ```rust
/// use serde_tagged::{tagged, Value};
///
/// let value = tagged!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "nothing": null,
///     "raw": (Value::opaque(7u64))
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! tagged {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tagged!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::tagged!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value, ValueMap};

    #[test]
    fn test_tagged_macro_primitives() {
        assert_eq!(tagged!(null), Value::Null);
        assert_eq!(tagged!(true), Value::Bool(true));
        assert_eq!(tagged!(false), Value::Bool(false));
        assert_eq!(tagged!(42), Value::Number(Number::Integer(42)));
        assert_eq!(tagged!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(tagged!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_tagged_macro_arrays() {
        assert_eq!(tagged!([]), Value::Array(vec![]));

        let arr = tagged!([1, "two", null]);
        assert_eq!(
            arr,
            Value::Array(vec![Value::from(1), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn test_tagged_macro_objects() {
        assert_eq!(tagged!({}), Value::Object(ValueMap::new()));

        let obj = tagged!({
            "name": "Alice",
            "nested": {"flag": true}
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert!(map.get("nested").map_or(false, Value::is_object));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_tagged_macro_opaque() {
        let value = tagged!([(Value::opaque(5u16))]);
        assert_eq!(value, Value::Array(vec![Value::opaque(5u16)]));
    }
}
