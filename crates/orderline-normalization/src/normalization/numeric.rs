//! Numeric coercion for upstream order fields.
//!
//! The upstream export writes numbers either as JSON numbers or as decimal
//! strings ("25.00"). This module turns both into `f64`.

use serde_json::Value;

/// Parse a string value to numeric (f64).
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
///
/// Returns None if the value cannot be parsed as a number.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Remove thousands separators and whitespace
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', ""); // Non-breaking space

    if cleaned.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    if cleaned.eq_ignore_ascii_case("inf") || cleaned.eq_ignore_ascii_case("infinity") {
        return Some(f64::INFINITY);
    }
    if cleaned.eq_ignore_ascii_case("-inf") || cleaned.eq_ignore_ascii_case("-infinity") {
        return Some(f64::NEG_INFINITY);
    }

    cleaned.parse().ok()
}

/// Coerce a JSON value to a number.
///
/// Numbers pass through, strings go through [`parse_numeric`], booleans map
/// to 1/0. Null, objects and sequences have no numeric reading.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric(text),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a line item's tax fraction.
///
/// Same as [`coerce_number`], except that null and blank strings read as
/// zero: the upstream export writes an empty `<tax/>` element that way, and
/// downstream treats it as untaxed.
pub fn coerce_tax(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::String(text) if text.trim().is_empty() => Some(0.0),
        other => coerce_number(other),
    }
}

/// Loose truthiness of a marker field.
///
/// False for null, `false`, zero, NaN and the empty string; true otherwise,
/// including any object or sequence.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
