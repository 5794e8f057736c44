use std::fmt;

use serde_json::Value;

/// Numeric sample as it will appear on an exposition line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl SampleValue {
    /// JSON numbers and numeric strings; everything else is not a sample.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(SampleValue::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(SampleValue::UInt(u))
                } else {
                    n.as_f64().map(SampleValue::Float)
                }
            }
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(i) = s.parse::<i64>() {
            return Some(SampleValue::Int(i));
        }
        if let Ok(u) = s.parse::<u64>() {
            return Some(SampleValue::UInt(u));
        }
        s.parse::<f64>().ok().map(SampleValue::Float)
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SampleValue::Int(i) => write!(f, "{}", i),
            SampleValue::UInt(u) => write!(f, "{}", u),
            SampleValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            SampleValue::Float(v) if v == f64::INFINITY => write!(f, "+Inf"),
            SampleValue::Float(v) if v == f64::NEG_INFINITY => write!(f, "-Inf"),
            // Shortest round-trip form, never in exponent notation.
            SampleValue::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        #[rustfmt::skip]
        let tests = [
            (json!(1),                    Some("1")),
            (json!(42.5),                 Some("42.5")),
            (json!(15.0),                 Some("15")),
            (json!(-0.25),                Some("-0.25")),
            (json!(18446744073709551615u64), Some("18446744073709551615")),
            (json!(1e21),                 Some("1000000000000000000000")),
            (json!("200"),                Some("200")),
            (json!("3.14"),               Some("3.14")),
            (json!("1e3"),                Some("1000")),
            (json!("NaN"),                Some("NaN")),
            (json!("+Inf"),               Some("+Inf")),
            (json!("-inf"),               Some("-Inf")),
            (json!("9007199254740993"),   Some("9007199254740993")),
            (json!("prod"),               None),
            (json!(" 42"),                None),
            (json!(""),                   None),
            (json!(true),                 None),
            (json!(null),                 None),
            (json!([1]),                  None),
        ];

        for (input, expected) in &tests {
            let actual = SampleValue::from_json(input).map(|v| v.to_string());
            assert_eq!(expected.map(String::from), actual, "while classifying {}", input);
        }
    }
}
