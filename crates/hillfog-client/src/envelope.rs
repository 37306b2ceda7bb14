//! Response envelope normalization
//!
//! The legacy backend answers in three shapes. They are recognized by an
//! ordered rule list, first match wins:
//!
//! 1. **success envelope**: an object with a `success` key. `success` is read
//!    with the legacy boolean rules; a false value is a
//!    [`ApiError::Validation`]. Otherwise the payload is `value`, else `data`,
//!    else whatever remains after dropping `success`/`message`.
//! 2. **grid**: an object with `gridData` (and usually `totalCount`).
//! 3. **bare**: any other JSON, returned as-is.
//!
//! [`classify`] runs before this on every HTTP reply and maps the status code.

use hillfog_core::mapper::boolean;
use hillfog_core::Record;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Unwrapped response payload
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Value(Value),
    Grid { items: Vec<Value>, total: u64 },
}

impl Normalized {
    /// Collapse into a single JSON value. A grid becomes its item array.
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Value(value) => value,
            Normalized::Grid { items, .. } => Value::Array(items),
        }
    }

    /// Items and total; a bare array counts as a full page and a bare
    /// object as a single item.
    pub fn into_page(self) -> (Vec<Value>, u64) {
        match self {
            Normalized::Grid { items, total } => (items, total),
            Normalized::Value(Value::Array(items)) => {
                let total = items.len() as u64;
                (items, total)
            }
            Normalized::Value(Value::Null) => (Vec::new(), 0),
            Normalized::Value(other) => (vec![other], 1),
        }
    }
}

/// Apply the envelope rules to a parsed body.
pub fn normalize(body: Value) -> ApiResult<Normalized> {
    match body {
        Value::Object(map) if map.contains_key("success") => unwrap_success(map),
        Value::Object(map) if map.contains_key("gridData") => grid(map),
        other => Ok(Normalized::Value(other)),
    }
}

/// Whether a body is a `success: false` envelope.
pub fn is_failure(body: &Value) -> bool {
    body.get("success").map(|s| !boolean::decode(s)).unwrap_or(false)
}

fn failure(map: Record) -> ApiError {
    let message = map.get("message").and_then(Value::as_str).map(str::to_string);
    ApiError::validation(message.as_deref(), Value::Object(map))
}

fn unwrap_success(mut envelope: Record) -> ApiResult<Normalized> {
    let succeeded = envelope.get("success").map(boolean::decode).unwrap_or(false);
    if !succeeded {
        return Err(failure(envelope));
    }

    let payload = envelope
        .remove("value")
        .filter(|v| !v.is_null())
        .or_else(|| envelope.remove("data").filter(|v| !v.is_null()));

    match payload {
        Some(Value::Object(inner)) if is_failure_record(&inner) => Err(failure(inner)),
        Some(Value::Object(inner)) if inner.contains_key("gridData") => grid(inner),
        Some(payload) => {
            if envelope.contains_key("gridData") {
                return grid(envelope);
            }
            Ok(Normalized::Value(payload))
        }
        None => {
            envelope.remove("success");
            envelope.remove("message");
            if envelope.contains_key("gridData") {
                grid(envelope)
            } else if envelope.is_empty() {
                Ok(Normalized::Value(Value::Null))
            } else {
                Ok(Normalized::Value(Value::Object(envelope)))
            }
        }
    }
}

fn is_failure_record(record: &Record) -> bool {
    record.get("success").map(|s| !boolean::decode(s)).unwrap_or(false)
}

fn grid(mut map: Record) -> ApiResult<Normalized> {
    let items = match map.remove("gridData") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(ApiError::Unknown(format!(
                "gridData must be an array, found {}",
                hillfog_core::error::json_kind(&other)
            )))
        }
    };

    let total = map
        .get("totalCount")
        .and_then(total_count)
        .unwrap_or(items.len() as u64);

    Ok(Normalized::Grid { items, total })
}

fn total_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Map one HTTP reply to a payload or an error.
///
/// Order: 401, then a `success: false` body, then the remaining status codes.
/// A 2xx reply with an empty body is `Value(null)`; one that is not JSON is
/// [`ApiError::Unknown`].
pub fn classify(status: u16, body: &str, path: &str) -> ApiResult<Normalized> {
    if status == 401 {
        tracing::error!("Unauthorized - session expired: {}", path);
        return Err(ApiError::Unauthorized);
    }

    let parsed = if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(body)
    };

    let parsed = match parsed {
        Ok(Value::Object(map)) if is_failure_record(&map) => {
            if !(200..300).contains(&status) {
                tracing::error!("HTTP {} with failure envelope: {}", status, path);
            }
            return Err(failure(map));
        }
        other => other,
    };

    match status {
        200..=299 => match parsed {
            Ok(value) => normalize(value),
            Err(e) => Err(ApiError::Unknown(format!("Invalid JSON response from {}: {}", path, e))),
        },
        403 => {
            tracing::error!("Forbidden - access denied: {}", path);
            Err(ApiError::Forbidden)
        }
        404 => {
            tracing::error!("Not found: {}", path);
            Err(ApiError::NotFound {
                path: path.to_string(),
            })
        }
        500..=599 => {
            tracing::error!("Server error {}: {}", status, path);
            Err(ApiError::ServerError { status })
        }
        other => {
            tracing::error!("Unexpected HTTP status {}: {}", other, path);
            Err(ApiError::Unknown(format!("Unexpected HTTP status {} from {}", other, path)))
        }
    }
}
