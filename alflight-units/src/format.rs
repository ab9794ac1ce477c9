//! Display symbols and formatted values

use tracing::warn;
use crate::convert::convert_optional;
use crate::units::TABLES;

/// Shown instead of a value that cannot be displayed
pub const PLACEHOLDER: &str = "---";

pub const DEFAULT_DECIMALS: usize = 1;

/// Digits past the requested precision checked for an exact tie
const TIE_DIGITS: usize = 30;

/// Display symbol of a unit code, or the code itself when unknown
pub fn get_unit_symbol(unit: &str) -> &str {
    TABLES.symbol(unit).unwrap_or(unit)
}

/// Format as `"<value> <symbol>"` with fixed decimals.
///
/// Missing, NaN and infinite values give [`PLACEHOLDER`].
pub fn format_with_unit(value: Option<f64>, unit: &str, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} {}", to_fixed(v, decimals), get_unit_symbol(unit)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Fixed-point text with exact ties rounded away from zero (`0.25` -> `0.3`).
///
/// `{:.*}` rounds exact ties to even; stored exports expect half-up.
fn to_fixed(value: f64, decimals: usize) -> String {
    let magnitude = value.abs();
    let exact = format!("{:.*}", decimals + TIE_DIGITS, magnitude);
    let (kept, rest) = exact.split_at(exact.len() - TIE_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');

    let digits = if is_tie {
        round_up_last_digit(kept.trim_end_matches('.'))
    } else {
        format!("{:.*}", decimals, magnitude)
    };
    if value < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

fn round_up_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            d => {
                *c = (d as u8 + 1) as char;
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// Convert then format in the target unit.
///
/// Between different units a missing or NaN value is blank and formats as
/// zero, as the dispatcher converts it. A failed conversion gives the
/// placeholder rather than the raw value labelled with the target symbol.
pub fn convert_and_format(
    value: Option<f64>,
    category: &str,
    from: &str,
    to: &str,
    decimals: usize,
) -> String {
    if from == to {
        return format_with_unit(value, to, decimals);
    }
    match convert_optional(value, from, to, category) {
        Ok(converted) => format_with_unit(Some(converted), to, decimals),
        Err(err) => {
            warn!(%err, "cannot format converted value");
            PLACEHOLDER.to_string()
        }
    }
}
