//! Legacy `Y`/`N` flags <-> `bool`

use serde_json::Value;

/// Decode a legacy flag.
///
/// `"true"`, `"y"` and `"1"` (case-insensitive) are true, as is the number
/// `1`. Everything else, including absent values, is false.
pub fn decode(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => parse(s),
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Decode a legacy flag from its string form.
pub fn parse(s: &str) -> bool {
    let s = s.trim();
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("y") || s == "1"
}

/// Encode a flag for the wire.
pub fn encode(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// Encode a canonical field value; anything that is not `true` becomes `"N"`.
pub fn encode_value(value: &Value) -> Value {
    Value::String(encode(decode(value)).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_truthy() {
        for v in [json!("true"), json!("TRUE"), json!("y"), json!("Y"), json!("1"), json!(true), json!(1)] {
            assert!(decode(&v), "expected {v} to be true");
        }
    }

    #[test]
    fn test_decode_falsy() {
        for v in [json!("N"), json!("false"), json!("0"), json!(""), json!("yes"), json!(null), json!(0), json!(false)] {
            assert!(!decode(&v), "expected {v} to be false");
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(true), "Y");
        assert_eq!(encode(false), "N");
        assert_eq!(encode_value(&json!(true)), json!("Y"));
        assert_eq!(encode_value(&json!(null)), json!("N"));
    }
}
