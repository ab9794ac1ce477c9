//! Generic conversion dispatcher
//!
//! Callers give a value, its unit, the wanted unit and the category; the
//! dispatcher finds the rule in the category table.

use tracing::{trace, warn};
use crate::units::TABLES;
use crate::{ConversionError, ConversionOptions, UnitCategory};

/// Result of converting a blank (zero, NaN or missing) value.
///
/// Blank form fields are treated as zero after conversion, not as "no
/// conversion possible". Callers rely on this for empty inputs.
pub const BLANK_VALUE: f64 = 0.0;

/// Zero is blank only where it converts to zero anyway; an affine zero
/// (0 °C) is a real reading.
fn is_blank(value: f64, category: Option<UnitCategory>) -> bool {
    value.is_nan() || (value == 0.0 && !category.is_some_and(|c| c.is_affine()))
}

/// Convert `value` from `from` to `to` within the named category.
///
/// - identical units return `value` untouched (even NaN)
/// - a NaN value returns [`BLANK_VALUE`], as does zero outside temperature
/// - an unknown category returns `value` untouched
/// - temperature pairs other than C <-> F return `value` untouched
/// - a pair with no rule is an [`ConversionError::UnsupportedConversion`]
pub fn convert_value(value: f64, from: &str, to: &str, category: &str) -> Result<f64, ConversionError> {
    convert_value_with(value, from, to, category, &ConversionOptions::default())
}

/// [`convert_value`] with an explicit density or fuel type
pub fn convert_value_with(
    value: f64,
    from: &str,
    to: &str,
    category: &str,
    options: &ConversionOptions,
) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(value);
    }
    let parsed = UnitCategory::from_name(category);
    if is_blank(value, parsed) {
        return Ok(BLANK_VALUE);
    }
    match parsed {
        Some(category) => apply(value, from, to, category, options),
        None => {
            warn!(category, from, to, "unknown unit category, value passed through");
            Ok(value)
        }
    }
}

/// Convert a possibly missing value. `None` is a blank field.
pub fn convert_optional(
    value: Option<f64>,
    from: &str,
    to: &str,
    category: &str,
) -> Result<f64, ConversionError> {
    match value {
        Some(v) => convert_value(v, from, to, category),
        None => Ok(BLANK_VALUE),
    }
}

/// Typed entry point
pub fn convert(
    value: f64,
    from: &str,
    to: &str,
    category: UnitCategory,
    options: &ConversionOptions,
) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(value);
    }
    if is_blank(value, Some(category)) {
        return Ok(BLANK_VALUE);
    }
    apply(value, from, to, category, options)
}

fn apply(
    value: f64,
    from: &str,
    to: &str,
    category: UnitCategory,
    options: &ConversionOptions,
) -> Result<f64, ConversionError> {
    match TABLES.get(category, from, to) {
        Some(rule) => {
            let result = rule.apply(value, options.density());
            trace!(%category, from, to, value, result, "converted");
            Ok(result)
        }
        // No Kelvin or Rankine: other temperature pairs pass through
        None if category.is_affine() => Ok(value),
        None => Err(ConversionError::unsupported(category, from, to)),
    }
}
