//! Numeric domain checks shared by every codec
//!
//! Component values arrive as `f64` (JSON numbers, positional arguments,
//! regex captures) and are narrowed here, producing the `not_whole`,
//! `too_big` and `too_small` issues with the component's field name.

use crate::context::Arg;
use crate::issue::{ArgKind, Issue, SizeKind};

/// Reject NaN and the infinities
pub fn finite(field: Option<&'static str>, value: f64) -> Result<f64, Issue> {
    if value.is_finite() {
        Ok(value)
    } else {
        let expected = match field {
            Some(name) => format!("finite number for {}", name),
            None => "finite number".to_string(),
        };
        Err(Issue::invalid_string(expected, value.to_string()))
    }
}

/// Reject values with a fractional part
pub fn whole(field: Option<&'static str>, value: f64) -> Result<f64, Issue> {
    let value = finite(field, value)?;
    if value.fract() != 0.0 {
        return Err(Issue::not_whole(field, value));
    }
    Ok(value)
}

/// Whole number inside the inclusive range `[min, max]`
pub fn integer_in(field: Option<&'static str>, value: f64, min: i64, max: i64) -> Result<i64, Issue> {
    let value = whole(field, value)?;
    if value < min as f64 {
        return Err(Issue::too_small(SizeKind::Number, field, min, true, value));
    }
    if value > max as f64 {
        return Err(Issue::too_big(SizeKind::Number, field, max, true, value));
    }
    Ok(value as i64)
}

/// Finite number inside `[min, max]`, or `[min, max)` when `max_inclusive` is false
pub fn float_in(
    field: Option<&'static str>,
    value: f64,
    min: f64,
    max: f64,
    max_inclusive: bool,
) -> Result<f64, Issue> {
    let value = finite(field, value)?;
    if value < min {
        return Err(Issue::too_small(SizeKind::Number, field, min, true, value));
    }
    let over = if max_inclusive { value > max } else { value >= max };
    if over {
        return Err(Issue::too_big(SizeKind::Number, field, max, max_inclusive, value));
    }
    Ok(value)
}

/// Whole number in `[min, max]` narrowed to `u8`
pub fn component(field: &'static str, value: f64, min: u8, max: u8) -> Result<u8, Issue> {
    integer_in(Some(field), value, min as i64, max as i64).map(|v| v as u8)
}

/// Numeric positional argument
pub fn number_arg<T>(arg: &Arg<T>) -> Result<f64, Issue> {
    match arg {
        Arg::Int(v) => Ok(*v as f64),
        Arg::Float(v) => Ok(*v),
        other => Err(Issue::InvalidType {
            expected: vec![ArgKind::Number],
            received: other.kind(),
        }),
    }
}

/// Parse decimal text such as `-12` or `3.25e2` into a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !valid {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse integer text into `[min, max]`; fractional text reports `not_whole`
pub fn parse_integer(
    field: Option<&'static str>,
    text: &str,
    min: i64,
    max: i64,
) -> Result<i64, Issue> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i128>() {
        if value < min as i128 {
            return Err(Issue::too_small(SizeKind::Number, field, min, true, value));
        }
        if value > max as i128 {
            return Err(Issue::too_big(SizeKind::Number, field, max, true, value));
        }
        return Ok(value as i64);
    }
    match parse_number(trimmed) {
        Some(value) => integer_in(field, value, min, max),
        None => Err(Issue::invalid_string("integer", text)),
    }
}
