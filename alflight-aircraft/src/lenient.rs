//! Lenient numeric input
//!
//! Imported records come from forms and older exports, where numbers are as
//! likely to be strings (`"2.1"`, `""`) as JSON numbers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a finite number from a JSON number or a numeric string.
///
/// Strings are trimmed and read up to the first character that cannot
/// continue a decimal literal (`"2.5 m"` is 2.5). Blank, non-numeric and
/// non-finite input gives `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_str(s),
        _ => None,
    }
}

/// Same as [`parse_number`] for a possibly missing value
pub fn parse_optional(value: Option<&Value>) -> Option<f64> {
    value.and_then(parse_number)
}

pub fn parse_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(v).filter(|v| v.is_finite());
    }
    let prefix = &s[..numeric_prefix_len(s)];
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'+' | b'-' if i == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[i - 1], b'e' | b'E') => {}
            b'0'..=b'9' => {
                seen_digit = true;
                end = i + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
    }
    end
}

/// `deserialize_with` helper for lenient `Option<f64>` fields
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_optional(raw.as_ref()))
}

/// `deserialize_with` helper where zero means "no value"
pub fn option_nonzero_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(option_f64(deserializer)?.filter(|v| *v != 0.0))
}
