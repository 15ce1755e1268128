//! `money` codec, stored as a signed count of cents

use serde::{Serialize, Serializer};
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::traits::{value_object, PgCodec};
use crate::validation::finite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

fn out_of_range(cents: i128) -> Issue {
    if cents < 0 {
        Issue::too_small(SizeKind::Number, None, i64::MIN, true, cents)
    } else {
        Issue::too_big(SizeKind::Number, None, i64::MAX, true, cents)
    }
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Dollar amount, rounded half away from zero to whole cents
    pub fn from_dollars(dollars: f64) -> Result<Self, Issue> {
        let cents = (finite(None, dollars)? * 100.0).round();
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(out_of_range(cents as i128));
        }
        Ok(Self::from_cents(cents as i64))
    }

    /// `$1,234.56`, `-$1,234.56`, `($1,234.56)`, `1234.567`
    fn parse(text: &str) -> Result<Self, Issue> {
        let invalid = || Issue::invalid_string("money", text);
        let mut body = text.trim();
        let mut negative = false;

        if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
            negative = true;
            body = inner.trim();
        }
        if let Some(rest) = body.strip_prefix('-') {
            negative = !negative;
            body = rest.trim_start();
        }
        body = body.strip_prefix('$').unwrap_or(body);
        if let Some(rest) = body.strip_prefix('-') {
            negative = !negative;
            body = rest;
        }

        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        let int: String = int.chars().filter(|c| *c != ',').collect();
        if (int.is_empty() && frac.is_empty())
            || !int.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i128 = if int.is_empty() {
            0
        } else {
            int.parse().map_err(|_| out_of_range(if negative { i128::MIN } else { i128::MAX }))?
        };
        let mut digits = frac.bytes().map(|b| (b - b'0') as i128);
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let magnitude = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + round_up as i128))
            .ok_or_else(|| out_of_range(if negative { i128::MIN } else { i128::MAX }))?;
        let cents = if negative { -magnitude } else { magnitude };
        i64::try_from(cents)
            .map(Self::from_cents)
            .map_err(|_| out_of_range(cents))
    }

    pub fn to_number(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.cents.unsigned_abs();
        let dollars = (magnitude / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, c) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, grouped, magnitude % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl PgCodec for Money {
    const TYPE_NAME: &'static str = "Money";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Money::from_dollars(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Money::parse(text)
    }
}

value_object!(Money);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render() {
        assert_eq!(Money::from_cents(123_456).to_string(), "$1,234.56");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "$1,000,000.00");
        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-$92,233,720,368,547,758.08");
    }

    #[test]
    fn test_parse_forms() {
        let expected = Money::from_cents(-123_456);
        for input in ["-$1,234.56", "($1,234.56)", "$-1234.56", "-1234.56", "-1234.555"] {
            assert_eq!(Money::expect_from(input), expected, "{}", input);
        }
        assert_eq!(Money::expect_from("12").cents(), 1200);
        assert_eq!(Money::expect_from(".5").cents(), 50);
        assert_eq!(Money::expect_from(0.125).cents(), 13);
        assert_eq!(Money::expect_from(-0.125).cents(), -13);
    }

    #[test]
    fn test_errors() {
        assert_eq!(Money::safe_from("$1.2.3").unwrap_err().code(), "invalid_string");
        assert_eq!(Money::safe_from("$").unwrap_err().code(), "invalid_string");
        assert_eq!(
            Money::safe_from("$92233720368547758.08").unwrap_err().code(),
            "too_big"
        );
        assert_eq!(
            Money::safe_from("-92233720368547758.08").unwrap().cents(),
            i64::MIN
        );
    }

    #[test]
    fn test_round_trip() {
        let value = Money::expect_from("$1,234.56");
        assert_eq!(Money::expect_from(value.to_string().as_str()), value);
        assert_eq!(value.to_number(), 1234.56);
        assert_eq!(value.to_json(), serde_json::json!("$1,234.56"));
    }
}
