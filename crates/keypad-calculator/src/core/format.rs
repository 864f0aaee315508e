//! Display formatting for results and operands
//!
//! Plain results are rounded to a fixed number of fractional digits to hide
//! binary floating-point noise (`0.1 + 0.2` shows `0.3`). Very large, very
//! small, or overlong results fall back to scientific notation in the form
//! `1.2345678900e+20`, which `str::parse::<f64>` reads back.

use crate::core::DisplayLimits;

/// Formats a finite result for the result line
#[must_use]
pub fn format_number(value: f64, limits: &DisplayLimits) -> String {
    let magnitude = value.abs();
    if magnitude > limits.scientific_upper
        || (value != 0.0 && magnitude < limits.scientific_lower)
    {
        return to_scientific(value, limits.scientific_precision);
    }

    let plain = format_plain(value, limits.rounding_precision);
    if plain.chars().count() > limits.max_display_length {
        to_scientific(value, limits.scientific_precision)
    } else {
        plain
    }
}

/// Rounds to `precision` fractional digits, then prints the shortest
/// decimal that reads back as the rounded value
///
/// `f64`'s `Display` is shortest round-trip and never switches to exponent
/// form, so `9999999.7` stays `9999999.7` instead of exposing the
/// `9999999.6999999993` underneath.
#[must_use]
pub fn format_plain(value: f64, precision: usize) -> String {
    let rounded = format!("{value:.precision$}")
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Renders `value` with a fixed-precision mantissa and a signed exponent
#[must_use]
pub fn to_scientific(value: f64, precision: usize) -> String {
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

/// Shortens an operand that no longer fits the input field
///
/// Operands within `max_input_length` are returned unchanged, as is any
/// text that does not parse (evaluation reports it later).
#[must_use]
pub fn compact_operand(text: &str, limits: &DisplayLimits) -> String {
    if text.chars().count() <= limits.max_input_length {
        return text.to_string();
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => to_scientific(value, limits.scientific_precision),
        _ => text.to_string(),
    }
}
