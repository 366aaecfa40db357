//! Lenient number coercion for backend payloads.
//!
//! Xano tables are hand-edited, so the same column can come back as `12`,
//! `"12"` or `" 12.5 "` depending on how the row was entered.

use serde_json::Value;

/// Coerce a JSON value into a finite `f64`, falling back to `0.0`.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_text(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Like [`coerce_number`] but distinguishes "absent or unparseable" from zero.
///
/// Used for the month column, where `0` and garbage must both be rejected but
/// for different reasons in the logs.
pub fn try_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_text(s),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn parse_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
