//! Floating point codecs: `real` and `double precision`
//!
//! Output uses the shortest digits that round-trip, switching to exponent
//! form (`1e+300`, `1.5e-05`) outside the plain-notation window the server
//! uses for each width. `NaN` equals itself, as it does in the server.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::traits::{value_object, PgCodec};

/// Non-finite spellings accepted by the server
fn special(text: &str) -> Option<f64> {
    match text.to_ascii_lowercase().as_str() {
        "nan" => Some(f64::NAN),
        "infinity" | "+infinity" | "inf" | "+inf" => Some(f64::INFINITY),
        "-infinity" | "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn parse_float(text: &str) -> Result<f64, Issue> {
    let trimmed = text.trim();
    if let Some(value) = special(trimmed) {
        return Ok(value);
    }
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    let value = match valid {
        true => trimmed.parse::<f64>().ok(),
        false => None,
    };
    match value {
        Some(v) if v.is_infinite() => Err(Issue::too_big(SizeKind::Number, None, f64::MAX, true, v)),
        Some(v) => Ok(v),
        None => Err(Issue::invalid_string("floating point number", text)),
    }
}

/// Rewrite Rust's `1e300` / `1.5e-5` as `1e+300` / `1.5e-05`
fn exponent_form(scientific: &str) -> String {
    match scientific.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => scientific.to_string(),
    }
}

fn render(value: f64, plain: String, scientific: String, upper: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude >= upper || magnitude < 1e-4) {
        exponent_form(&scientific)
    } else {
        plain
    }
}

fn serialize_float<S: Serializer>(value: f64, text: String, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(value)
    } else {
        serializer.serialize_str(&text)
    }
}

/// `double precision`
#[derive(Debug, Clone, Copy, Default)]
pub struct Float8 {
    value: f64,
}

/// `real`
#[derive(Debug, Clone, Copy, Default)]
pub struct Float4 {
    value: f32,
}

impl Float8 {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn to_number(&self) -> f64 {
        self.value
    }
}

impl Float4 {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn to_number(&self) -> f64 {
        self.value as f64
    }

    fn narrow(value: f64) -> Result<Self, Issue> {
        if value.is_finite() && value.abs() > f32::MAX as f64 {
            return Err(Issue::too_big(SizeKind::Number, None, f32::MAX as f64, true, value));
        }
        Ok(Self::new(value as f32))
    }
}

/// Total order with `NaN` above every number
fn total(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl PartialEq for Float8 {
    fn eq(&self, other: &Self) -> bool {
        total(self.value, other.value) == Ordering::Equal
    }
}

impl PartialOrd for Float8 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(total(self.value, other.value))
    }
}

impl PartialEq for Float4 {
    fn eq(&self, other: &Self) -> bool {
        total(self.value as f64, other.value as f64) == Ordering::Equal
    }
}

impl PartialOrd for Float4 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(total(self.value as f64, other.value as f64))
    }
}

impl fmt::Display for Float8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        f.write_str(&render(v, format!("{}", v), format!("{:e}", v), 1e15))
    }
}

impl fmt::Display for Float4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        f.write_str(&render(v as f64, format!("{}", v), format!("{:e}", v), 1e6))
    }
}

impl Serialize for Float8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_float(self.value, self.to_string(), serializer)
    }
}

impl Serialize for Float4 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_float(self.value as f64, self.to_string(), serializer)
    }
}

impl PgCodec for Float8 {
    const TYPE_NAME: &'static str = "Float8";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Ok(Float8::new(value))
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        parse_float(text).map(Float8::new)
    }
}

impl PgCodec for Float4 {
    const TYPE_NAME: &'static str = "Float4";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Float4::narrow(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Float4::narrow(parse_float(text)?)
    }
}

value_object!(Float4, Float8);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_rendering() {
        assert_eq!(Float8::expect_from(1.5).to_string(), "1.5");
        assert_eq!(Float8::expect_from(100).to_string(), "100");
        assert_eq!(Float8::expect_from(1e300).to_string(), "1e+300");
        assert_eq!(Float8::expect_from(1e14).to_string(), "100000000000000");
        assert_eq!(Float8::expect_from(1e15).to_string(), "1e+15");
        assert_eq!(Float8::expect_from(0.000015).to_string(), "1.5e-05");
        assert_eq!(Float8::expect_from(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Float4::expect_from(1000000).to_string(), "1e+06");
        assert_eq!(Float4::expect_from(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_special_values() {
        let nan = Float8::expect_from("NaN");
        assert_eq!(nan.to_string(), "NaN");
        assert!(nan.equals("nan"));
        assert_eq!(nan.to_json(), json!("NaN"));

        assert_eq!(Float8::expect_from("-Infinity").to_string(), "-Infinity");
        assert_eq!(Float4::expect_from("infinity").to_string(), "Infinity");
        assert!(Float8::expect_from("Infinity") > Float8::expect_from(1e308));
    }

    #[test]
    fn test_round_trip_and_errors() {
        for input in ["3.14159", "-2.5e-10", "6.02e+23", "0"] {
            let value = Float8::expect_from(input);
            assert_eq!(Float8::expect_from(value.to_string().as_str()), value, "{}", input);
        }
        assert_eq!(Float8::safe_from("abc").unwrap_err().code(), "invalid_string");
        assert_eq!(Float8::safe_from("1e400").unwrap_err().code(), "too_big");
        assert_eq!(Float4::safe_from(1e39).unwrap_err().code(), "too_big");
    }
}
