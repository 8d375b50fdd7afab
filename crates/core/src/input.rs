//! Loose caller input helpers.
//!
//! Identifiers arrive from the request layer as untyped JSON (form posts and
//! query strings often carry numbers as strings). These helpers turn them into
//! typed values or report which field was malformed.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Parse an identifier from a JSON value.
///
/// Accepts integers, integral floats, and strings holding either. Returns
/// `None` for anything else, including non-integral and non-finite numbers.
pub fn parse_id(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64().and_then(integral_f64)
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(f: f64) -> Option<DbId> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parse a required identifier, failing with a validation error naming `field`.
pub fn require_id(value: &Value, field: &str) -> Result<DbId, CoreError> {
    parse_id(value).ok_or_else(|| {
        CoreError::Validation(format!("{field} must be an integer, got {value}"))
    })
}

/// Require a non-blank string, returning it trimmed.
pub fn require_text(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}
