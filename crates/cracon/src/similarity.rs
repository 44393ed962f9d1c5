//! Decides whether a stored JSON node can be safely read as a requested type.
//!
//! "Similar" is deliberately strict:
//! - integers never match floats and floats never match integers;
//! - an integer must fit the requested width (and be `>= 0` when unsigned);
//! - strings and booleans only match themselves;
//! - a fixed-size array must have exactly the requested length;
//! - every element of a sequence must itself be similar.
//!
//! The check never fails loudly. Every `false` caused by a range or shape
//! mismatch is reported through `tracing` so a rejected value can be
//! diagnosed from the logs alone.

use serde_json::{Number, Value};
use tracing::{debug, warn};

use crate::kind::ValueKind;
use crate::value::ConfigValue;

/// Whether `value` can be materialized as a `T` without loss.
///
/// ```
/// use cracon::is_similar;
/// use serde_json::json;
///
/// assert!(is_similar::<i8>(&json!(-128)));
/// assert!(!is_similar::<i8>(&json!(128)));
/// assert!(!is_similar::<f32>(&json!(1)));
/// assert!(is_similar::<[u8; 2]>(&json!([0, 255])));
/// ```
pub fn is_similar<T: ConfigValue>(value: &Value) -> bool {
    is_similar_kind(&T::kind(), value)
}

/// Runtime form of [`is_similar`], dispatching on an explicit kind.
pub fn is_similar_kind(kind: &ValueKind, value: &Value) -> bool {
    match kind {
        ValueKind::Bool => expect(kind, value, value.is_boolean()),
        ValueKind::Str => expect(kind, value, value.is_string()),
        ValueKind::Int { .. } | ValueKind::Uint { .. } | ValueKind::Enum { .. } => {
            check_integer(kind, value)
        }
        ValueKind::Float { .. } => check_float(kind, value),
        ValueKind::Array { elem, len } => match value {
            Value::Array(items) if items.len() == *len => {
                items.iter().all(|item| is_similar_kind(elem, item))
            }
            Value::Array(items) => {
                debug!(
                    expected = %kind,
                    found_len = items.len(),
                    "fixed-size array length mismatch"
                );
                false
            }
            _ => expect(kind, value, false),
        },
        ValueKind::Vec { elem } => match value {
            Value::Array(items) => items.iter().all(|item| is_similar_kind(elem, item)),
            _ => expect(kind, value, false),
        },
    }
}

fn expect(kind: &ValueKind, value: &Value, matches: bool) -> bool {
    if !matches {
        debug!(expected = %kind, found = %value, "type mismatch");
    }
    matches
}

fn check_integer(kind: &ValueKind, value: &Value) -> bool {
    let Some(parsed) = value.as_number().and_then(integer_of) else {
        return expect(kind, value, false);
    };
    let Some((min, max)) = kind.int_range() else {
        return expect(kind, value, false);
    };
    if parsed < min {
        warn!(expected = %kind, found = %value, %min, "out of bounds (min)");
        return false;
    }
    if parsed > max {
        warn!(expected = %kind, found = %value, %max, "out of bounds (max)");
        return false;
    }
    true
}

fn integer_of(number: &Number) -> Option<i128> {
    if let Some(v) = number.as_i64() {
        return Some(v as i128);
    }
    number.as_u64().map(|v| v as i128)
}

fn check_float(kind: &ValueKind, value: &Value) -> bool {
    let parsed = match value {
        Value::Number(n) if n.is_f64() => n.as_f64(),
        _ => None,
    };
    let (Some(parsed), Some(limit)) = (parsed, kind.float_max()) else {
        return expect(kind, value, false);
    };
    if parsed < -limit {
        warn!(expected = %kind, found = %value, "out of bounds (min)");
        return false;
    }
    if parsed > limit {
        warn!(expected = %kind, found = %value, "out of bounds (max)");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Keys name the types each value must be similar to; every other type
    /// must reject it.
    fn fixture() -> Value {
        let data = json!({
            "int8_unsigned8_one": 1,
            "int8_unsigned8_zero": 0,
            "int8_neg_one": -1,
            "int8_unsigned8": 127,
            "int8_min": -128,
            "double_neg_large": -10.0e42,
            "double_large": 10.0e42,
            "int_unsigned_large": 5_000_000_000u64,
            "int_large": -5_000_000_000i64,
            "int_unsigned8_max": 255,
            "string_empty": "",
            "string_number": "1",
            "string_longish": "The universe is large, I mean really large, you know? ",
            "float_double_one": 1.0,
            "float_double_neg_one": -1.0,
            "bool_true": true,
            "bool_false": false,
            "array_str": ["hey", "oh"],
            "array_i": [1, 2, 3],
        });
        // Reparse so numbers carry the representation a file read produces.
        serde_json::from_str(&data.to_string()).unwrap()
    }

    fn check_all<T: ConfigValue>(name: &str) {
        let data = fixture();
        for (key, value) in data.as_object().unwrap() {
            let expected = key.contains(name);
            assert_eq!(
                is_similar::<T>(value),
                expected,
                "{key} similar to {} should be {expected}",
                T::kind()
            );
        }
    }

    #[test]
    fn test_int64() {
        check_all::<i64>("int");
    }

    #[test]
    fn test_int8() {
        check_all::<i8>("int8");
    }

    #[test]
    fn test_uint64() {
        check_all::<u64>("unsigned");
    }

    #[test]
    fn test_uint8() {
        check_all::<u8>("unsigned8");
    }

    #[test]
    fn test_string() {
        check_all::<String>("string");
    }

    #[test]
    fn test_float() {
        check_all::<f32>("float");
    }

    #[test]
    fn test_double() {
        check_all::<f64>("double");
    }

    #[test]
    fn test_boolean() {
        check_all::<bool>("bool");
    }

    #[test]
    fn test_vec_str() {
        check_all::<Vec<String>>("array_str");
    }

    #[test]
    fn test_vec_int() {
        check_all::<Vec<i32>>("array_i");
    }

    #[test]
    fn test_array_str_2() {
        check_all::<[String; 2]>("array_str");
    }

    #[test]
    fn test_array_str_wrong_len() {
        check_all::<[String; 10]>("matchnone!");
    }

    #[test]
    fn test_array_int_3() {
        check_all::<[i32; 3]>("array_i");
    }

    #[test]
    fn test_array_int_wrong_len() {
        check_all::<[i32; 10]>("matchnone!");
    }

    #[test]
    fn test_empty_sequences() {
        assert!(is_similar::<[i32; 0]>(&json!([])));
        assert!(is_similar::<Vec<bool>>(&json!([])));
        assert!(!is_similar::<[i32; 1]>(&json!([])));
    }

    #[test]
    fn test_nested_sequences() {
        assert!(is_similar::<Vec<[u8; 2]>>(&json!([[1, 2], [3, 4]])));
        assert!(!is_similar::<Vec<[u8; 2]>>(&json!([[1, 2], [3]])));
        assert!(!is_similar::<Vec<Vec<u8>>>(&json!([[1, 2], [256]])));
    }

    #[test]
    fn test_u64_above_i64_max() {
        assert!(is_similar::<u64>(&json!(u64::MAX)));
        assert!(!is_similar::<i64>(&json!(u64::MAX)));
    }

    #[test]
    fn test_null_is_never_similar() {
        assert!(!is_similar::<bool>(&Value::Null));
        assert!(!is_similar::<String>(&Value::Null));
        assert!(!is_similar::<Vec<i32>>(&Value::Null));
    }
}
