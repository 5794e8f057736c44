//! Lenient conversions of JSON values, mirroring how a workflow host
//! coerces loosely typed settings and inputs before handing them over.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Short name of the JSON type of `value`, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scalars only; arrays, objects and null have no string form here.
pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Objects are borrowed; strings holding a JSON object are parsed.
pub fn to_object(value: &Value) -> Option<Cow<'_, Map<String, Value>>> {
    match value {
        Value::Object(map) => Some(Cow::Borrowed(map)),
        Value::String(s) => serde_json::from_str::<Map<String, Value>>(s)
            .ok()
            .map(Cow::Owned),
        _ => None,
    }
}

pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}

/// `1`, `t`, `true` and their capitalized forms, plus the false counterparts.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Integers as-is, floats truncated toward zero, integer strings parsed.
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().and_then(truncate),
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Like `to_i64` but refuses anything with a fractional part and any
/// non-number, so `10.0` passes while `10.5` and `"10"` do not.
pub fn to_exact_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().and_then(integral),
        },
        _ => None,
    }
}

/// `Some` when `f` has no fractional part and fits into an `i64`.
pub fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 {
        truncate(f)
    } else {
        None
    }
}

fn truncate(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_bool() {
        let tests = [
            (json!(true), Some(true)),
            (json!(false), Some(false)),
            (json!("true"), Some(true)),
            (json!("F"), Some(false)),
            (json!(1), Some(true)),
            (json!(0.0), Some(false)),
            (json!("yes"), None),
            (json!(null), None),
            (json!([true]), None),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, to_bool(input), "while coercing {}", input);
        }
    }

    #[test]
    fn test_to_i64() {
        let tests = [
            (json!(1705316200000i64), Some(1705316200000)),
            (json!(-3), Some(-3)),
            (json!(12.9), Some(12)),
            (json!(" 42 "), Some(42)),
            (json!("42.5"), None),
            (json!("2024-01-15T10:56:40Z"), None),
            (json!(1e300), None),
            (json!(true), None),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, to_i64(input), "while coercing {}", input);
        }
    }

    #[test]
    fn test_to_exact_i64() {
        let tests = [
            (json!(10), Some(10)),
            (json!(10.0), Some(10)),
            (json!(-7.0), Some(-7)),
            (json!(10.5), None),
            (json!("10"), None),
            (json!(null), None),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, to_exact_i64(input), "while coercing {}", input);
        }
    }

    #[test]
    fn test_to_string() {
        assert_eq!(Some("abc".to_string()), to_string(&json!("abc")));
        assert_eq!(Some("42".to_string()), to_string(&json!(42)));
        assert_eq!(Some("false".to_string()), to_string(&json!(false)));
        assert_eq!(None, to_string(&json!(null)));
        assert_eq!(None, to_string(&json!({"a": 1})));
    }

    #[test]
    fn test_to_object() {
        let borrowed = json!({"temp": 1});
        assert_eq!(Some(&json!(1)), to_object(&borrowed).unwrap().get("temp"));

        let encoded = json!("{\"temp\": 2}");
        assert_eq!(Some(&json!(2)), to_object(&encoded).unwrap().get("temp"));

        assert!(to_object(&json!("[1, 2]")).is_none());
        assert!(to_object(&json!(7)).is_none());
    }

    #[test]
    fn test_kind_of() {
        assert_eq!("int", kind_of(&json!(1)));
        assert_eq!("float", kind_of(&json!(1.5)));
        assert_eq!("string", kind_of(&json!("1")));
        assert_eq!("null", kind_of(&json!(null)));
    }
}
