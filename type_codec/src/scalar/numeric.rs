//! `numeric` codec
//!
//! Values are kept as exact decimal digits with their scale, so `1.50`
//! renders as `1.50` while comparing equal to `1.5`. Exponent input is
//! expanded to plain notation the way the server does.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue};
use crate::traits::{value_object, PgCodec};

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<sign>[+-])?(?:(?P<int>\d+)(?:\.(?P<frac>\d*))?|\.(?P<only_frac>\d+))(?:e(?P<exp>[+-]?\d+))?$")
        .expect("numeric pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    NaN,
    Infinity,
    NegInfinity,
    Finite {
        negative: bool,
        /// Integer digits without leading zeros; empty for zero
        int: String,
        /// Fraction digits, trailing zeros kept as scale
        frac: String,
    },
}

#[derive(Debug, Clone, Eq)]
pub struct Numeric {
    repr: Repr,
}

impl Numeric {
    pub const NAN: Numeric = Numeric { repr: Repr::NaN };
    pub const INFINITY: Numeric = Numeric { repr: Repr::Infinity };
    pub const NEG_INFINITY: Numeric = Numeric {
        repr: Repr::NegInfinity,
    };

    fn parse(text: &str) -> Result<Self, Issue> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "nan" => return Ok(Self::NAN),
            "infinity" | "+infinity" | "inf" | "+inf" => return Ok(Self::INFINITY),
            "-infinity" | "-inf" => return Ok(Self::NEG_INFINITY),
            _ => {}
        }

        let caps = NUMERIC
            .captures(trimmed)
            .ok_or_else(|| Issue::invalid_string("numeric", text))?;
        let negative = caps.name("sign").is_some_and(|m| m.as_str() == "-");
        let int = caps.name("int").map(|m| m.as_str()).unwrap_or("");
        let frac = caps
            .name("frac")
            .or_else(|| caps.name("only_frac"))
            .map(|m| m.as_str())
            .unwrap_or("");
        let exp: i64 = match caps.name("exp") {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| Issue::invalid_string("numeric exponent", m.as_str()))?,
            None => 0,
        };
        if exp.abs() > 1000 {
            return Err(Issue::invalid_string("numeric exponent within 1000", text));
        }

        // Shift the decimal point by the exponent
        let digits = format!("{}{}", int, frac);
        let point = int.len() as i64 + exp;
        let (int, frac) = if point <= 0 {
            (String::new(), format!("{}{}", "0".repeat((-point) as usize), digits))
        } else if point as usize >= digits.len() {
            (format!("{}{}", digits, "0".repeat(point as usize - digits.len())), String::new())
        } else {
            let (a, b) = digits.split_at(point as usize);
            (a.to_string(), b.to_string())
        };
        Ok(Self::finite(negative, &int, &frac))
    }

    fn finite(negative: bool, int: &str, frac: &str) -> Self {
        let int = int.trim_start_matches('0').to_string();
        let is_zero = int.is_empty() && frac.chars().all(|c| c == '0');
        Self {
            repr: Repr::Finite {
                negative: negative && !is_zero,
                int,
                frac: frac.to_string(),
            },
        }
    }

    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self::NAN
        } else if value.is_infinite() {
            if value > 0.0 { Self::INFINITY } else { Self::NEG_INFINITY }
        } else {
            // Display of a finite f64 is always plain notation
            Self::parse(&format!("{}", value)).unwrap_or(Self::NAN)
        }
    }

    pub fn is_nan(&self) -> bool {
        self.repr == Repr::NaN
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite { .. })
    }

    /// Digits after the decimal point
    pub fn scale(&self) -> usize {
        match &self.repr {
            Repr::Finite { frac, .. } => frac.len(),
            _ => 0,
        }
    }

    pub fn to_number(&self) -> f64 {
        match &self.repr {
            Repr::NaN => f64::NAN,
            Repr::Infinity => f64::INFINITY,
            Repr::NegInfinity => f64::NEG_INFINITY,
            Repr::Finite { .. } => self.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    /// `None` for special values and for values outside `Decimal`'s 28 digits
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self.repr {
            Repr::Finite { .. } => Decimal::from_str(&self.to_string()).ok(),
            _ => None,
        }
    }

    fn rank(&self) -> i8 {
        match &self.repr {
            Repr::NegInfinity => -2,
            Repr::Finite { negative: true, .. } => -1,
            Repr::Finite { int, frac, .. } if int.is_empty() && frac.chars().all(|c| c == '0') => 0,
            Repr::Finite { .. } => 1,
            Repr::Infinity => 2,
            Repr::NaN => 3,
        }
    }
}

fn compare_magnitude(a_int: &str, a_frac: &str, b_int: &str, b_frac: &str) -> Ordering {
    a_int
        .len()
        .cmp(&b_int.len())
        .then_with(|| a_int.cmp(b_int))
        .then_with(|| {
            let width = a_frac.len().max(b_frac.len());
            let a = format!("{:0<width$}", a_frac, width = width);
            let b = format!("{:0<width$}", b_frac, width = width);
            a.cmp(&b)
        })
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_rank = self.rank().cmp(&other.rank());
        if by_rank != Ordering::Equal {
            return by_rank;
        }
        match (&self.repr, &other.repr) {
            (
                Repr::Finite { negative, int: a_int, frac: a_frac },
                Repr::Finite { int: b_int, frac: b_frac, .. },
            ) => {
                let magnitude = compare_magnitude(a_int, a_frac, b_int, b_frac);
                if *negative { magnitude.reverse() } else { magnitude }
            }
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::NaN => f.write_str("NaN"),
            Repr::Infinity => f.write_str("Infinity"),
            Repr::NegInfinity => f.write_str("-Infinity"),
            Repr::Finite { negative, int, frac } => {
                if *negative {
                    f.write_str("-")?;
                }
                f.write_str(if int.is_empty() { "0" } else { int })?;
                if !frac.is_empty() {
                    write!(f, ".{}", frac)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Self::parse(&value.to_string()).unwrap_or(Self::NAN)
    }
}

impl PgCodec for Numeric {
    const TYPE_NAME: &'static str = "Numeric";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

    fn from_int(_ctx: &mut ParseContext<'_, Self>, value: i64) -> Result<Self, Issue> {
        Numeric::parse(&value.to_string())
    }

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Ok(Numeric::from_f64(value))
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Numeric::parse(text)
    }
}

value_object!(Numeric);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_text() {
        assert_eq!(Numeric::expect_from("001.50").to_string(), "1.50");
        assert_eq!(Numeric::expect_from("+.5").to_string(), "0.5");
        assert_eq!(Numeric::expect_from("-0.00").to_string(), "0.00");
        assert_eq!(Numeric::expect_from("1.5e3").to_string(), "1500");
        assert_eq!(Numeric::expect_from("12.5e-3").to_string(), "0.0125");
        assert_eq!(Numeric::expect_from(42).to_string(), "42");
        assert_eq!(
            Numeric::expect_from("123456789012345678901234567890.123456789").to_string(),
            "123456789012345678901234567890.123456789"
        );
        assert_eq!(Numeric::safe_from("1.2.3").unwrap_err().code(), "invalid_string");
    }

    #[test]
    fn test_magnitude_equality_and_order() {
        assert!(Numeric::expect_from("1.5").equals("1.500"));
        assert!(Numeric::expect_from("0").equals("-0"));
        assert!(Numeric::expect_from("-2") < Numeric::expect_from("-1.5"));
        assert!(Numeric::expect_from("10") > Numeric::expect_from("9.99"));
        assert!(Numeric::expect_from("Infinity") > Numeric::expect_from("1e100"));
        assert!(Numeric::NAN > Numeric::INFINITY);
        assert!(Numeric::NAN.equals("NaN"));
    }

    #[test]
    fn test_conversions() {
        let value = Numeric::expect_from("1234.5678");
        assert_eq!(value.scale(), 4);
        assert_eq!(value.to_number(), 1234.5678);
        assert_eq!(value.to_decimal(), Some(Decimal::from_str("1234.5678").unwrap()));
        assert_eq!(Numeric::from(Decimal::new(-15, 1)).to_string(), "-1.5");
        assert_eq!(Numeric::NAN.to_decimal(), None);
        assert_eq!(value.to_json(), serde_json::json!("1234.5678"));
    }
}
