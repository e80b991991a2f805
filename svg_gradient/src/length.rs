// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification and parsing of CSS-like length values.
//!
//! Absolute lengths resolve to points. Pixels, and numbers without a unit, are converted with
//! [`PX_TO_PT`].

use crate::PX_TO_PT;
use crate::error::LengthError;

/// Absolute length units.
const METRIC_UNITS: [&str; 7] = ["px", "pt", "in", "cm", "mm", "pc", "q"];
/// Units relative to a font size or a reference length.
const RELATIVE_UNITS: [&str; 4] = ["em", "rem", "ex", "%"];

/// A parsed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitValue {
    /// An absolute length in points.
    Point(f64),
    /// A percentage, in percent (`50%` is `Percent(50.0)`).
    Percent(f64),
}

/// Return the byte position where the leading numeric literal of `value` ends and its unit
/// begins.
///
/// A numeric literal is an optional sign, digits with an optional fractional part, and an
/// optional exponent. Returns `0` if `value` does not start with a number.
pub fn numeral_end(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let integer_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut digits = pos - integer_start;

    if bytes.get(pos) == Some(&b'.') {
        let fraction_start = pos + 1;
        let mut end = fraction_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        digits += end - fraction_start;
        pos = end;
    }

    if digits == 0 {
        return 0;
    }

    // Only treat `e` as an exponent if digits follow, so that `1em` keeps its unit.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exponent_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > exponent_start {
            pos = end;
        }
    }

    pos
}

/// Split a trimmed value into its numeric literal and its unit token.
///
/// Returns `None` if the value does not start with a number.
fn split_unit(value: &str) -> Option<(&str, &str)> {
    let value = value.trim();
    match numeral_end(value) {
        0 => None,
        end => Some(value.split_at(end)),
    }
}

fn has_unit_in(value: &str, units: &[&str]) -> bool {
    let Some((_, unit)) = split_unit(value) else {
        return false;
    };
    units.iter().any(|u| unit.eq_ignore_ascii_case(u))
}

/// Whether the value is a number followed by `%`.
pub fn is_percentage(value: &str) -> bool {
    split_unit(value).is_some_and(|(_, unit)| unit == "%")
}

/// Whether the value is a plain number without a unit.
pub fn is_numeric(value: &str) -> bool {
    split_unit(value).is_some_and(|(_, unit)| unit.is_empty())
}

/// Whether the value is a number followed by an absolute length unit.
pub fn is_metric(value: &str) -> bool {
    has_unit_in(value, &METRIC_UNITS)
}

/// Whether the value is a number followed by a font-relative unit or `%`.
pub fn is_relative(value: &str) -> bool {
    has_unit_in(value, &RELATIVE_UNITS)
}

/// Parse a numeral, rejecting values that overflow to infinity.
pub(crate) fn parse_finite(number: &str) -> Option<f64> {
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a plain number. Values with a unit suffix are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    match split_unit(value)? {
        (number, "") => parse_finite(number),
        _ => None,
    }
}

/// Resolve a percentage against `base`. Returns `None` if the value is not a percentage.
pub fn parse_relative(value: &str, base: f64) -> Option<f64> {
    match split_unit(value)? {
        (number, "%") => parse_finite(number).map(|n| n / 100.0 * base),
        _ => None,
    }
}

/// Parse a length into points, resolving font-relative units against the given font sizes.
///
/// Percentages are returned as such, since their reference length depends on the caller.
pub fn parse_length_to_pt(
    value: &str,
    font_size: f64,
    root_font_size: f64,
) -> Result<UnitValue, LengthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LengthError::Empty);
    }

    let missing = || LengthError::MissingNumber(trimmed.to_string());
    let (number, unit) = split_unit(trimmed).ok_or_else(missing)?;
    let n = parse_finite(number).ok_or_else(missing)?;

    let points = match unit.to_ascii_lowercase().as_str() {
        "%" => return Ok(UnitValue::Percent(n)),
        "" | "px" => n * PX_TO_PT,
        "pt" => n,
        "pc" => n * 12.0,
        "in" => n * 72.0,
        "cm" => n * 72.0 / 2.54,
        "mm" => n * 72.0 / 25.4,
        "q" => n * 72.0 / 101.6,
        "em" => n * font_size,
        "rem" => n * root_font_size,
        "ex" => n * font_size / 2.0,
        _ => {
            return Err(LengthError::UnknownUnit {
                value: trimmed.to_string(),
                unit: unit.to_string(),
            });
        }
    };

    Ok(UnitValue::Point(points))
}
