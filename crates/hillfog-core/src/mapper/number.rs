//! Legacy numeric strings (`BigDecimal` rendered as text) <-> `f64`

use serde_json::{Number, Value};

/// Largest integer magnitude that `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Decode a wire value into a number.
///
/// Numbers pass through, strings are parsed after trimming. Absent, null,
/// unparsable or non-finite input yields `0.0`.
pub fn decode(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse(s),
        _ => 0.0,
    }
}

/// Parse a numeric string, falling back to `0.0`.
pub fn parse(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Render a number in the wire's string form.
pub fn encode(value: f64) -> String {
    value.to_string()
}

/// Canonical JSON form of a decoded number.
///
/// Integral values become JSON integers so that `"3"` and `3` decode to the
/// same canonical value.
pub fn to_json(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0))
    }
}

/// Encode a canonical field value for the wire.
///
/// Numbers are stringified, null becomes `"0"`, anything else is left as-is.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Value::String(encode(f)),
            _ => Value::String(n.to_string()),
        },
        Value::Null => Value::String("0".to_string()),
        other => other.clone(),
    }
}
