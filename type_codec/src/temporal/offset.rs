//! UTC offset shared by the timezone-aware temporal codecs

use chrono::{FixedOffset, Offset as _, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::grammar::timezones;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{component, number_arg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Plus,
    Minus,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Plus => 1,
            Direction::Minus => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Plus => "plus",
            Direction::Minus => "minus",
        }
    }
}

impl FromStr for Direction {
    type Err = Issue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plus" | "+" => Ok(Direction::Plus),
            "minus" | "-" => Ok(Direction::Minus),
            _ => Err(Issue::invalid_string("'plus' | 'minus'", s)),
        }
    }
}

/// `{hour, minute, direction}`; a zero offset is always `plus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Offset {
    hour: u8,
    minute: u8,
    direction: Direction,
}

impl Offset {
    pub const UTC: Offset = Offset {
        hour: 0,
        minute: 0,
        direction: Direction::Plus,
    };

    pub fn new(hour: f64, minute: f64, direction: Direction) -> Result<Self, Issue> {
        let hour = component("hour", hour, 0, 23)?;
        let minute = component("minute", minute, 0, 59)?;
        let direction = if hour == 0 && minute == 0 {
            Direction::Plus
        } else {
            direction
        };
        Ok(Self {
            hour,
            minute,
            direction,
        })
    }

    /// Offset from a signed count of minutes east of UTC
    pub fn from_minutes(minutes: i32) -> Result<Self, Issue> {
        let direction = if minutes < 0 {
            Direction::Minus
        } else {
            Direction::Plus
        };
        let magnitude = minutes.unsigned_abs();
        Self::new((magnitude / 60) as f64, (magnitude % 60) as f64, direction)
    }

    /// Parse a zone token: `+05:30`, `-08`, `+0530`, `Z`, `EST`
    pub fn parse_token(text: &str) -> Result<Self, Issue> {
        let token = text.trim();
        let (direction, digits) = if let Some(rest) = token.strip_prefix('+') {
            (Direction::Plus, rest)
        } else if let Some(rest) = token.strip_prefix('-') {
            (Direction::Minus, rest)
        } else {
            return match timezones::lookup(token) {
                Some(minutes) => Self::from_minutes(minutes),
                None => Err(Issue::invalid_timezone(token)),
            };
        };

        let (hour, minute) = match digits.split_once(':') {
            Some(pair) => pair,
            None if digits.len() > 2 => digits.split_at(digits.len() - 2),
            None => (digits, "0"),
        };
        let numeric = |part: &str| -> Result<f64, Issue> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Issue::invalid_string("UTC offset", text));
            }
            part.parse::<f64>()
                .map_err(|_| Issue::invalid_string("UTC offset", text))
        };
        Self::new(numeric(hour)?, numeric(minute)?, direction)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_utc(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }

    /// Signed minutes east of UTC
    pub fn total_minutes(&self) -> i32 {
        self.direction.sign() * (self.hour as i32 * 60 + self.minute as i32)
    }

    pub fn to_fixed_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.total_minutes() * 60).unwrap_or(Utc.fix())
    }

    pub fn from_fixed_offset(offset: FixedOffset) -> Result<Self, Issue> {
        Self::from_minutes(offset.local_minus_utc() / 60)
    }

    pub(crate) fn from_fields(object: &Map<String, Value>) -> Result<Self, Issue> {
        let hour = number_field(object, "hour")?;
        let minute = number_field(object, "minute")?;
        let direction = match object.get("direction") {
            Some(Value::String(s)) => s.parse::<Direction>()?,
            Some(other) => {
                return Err(Issue::InvalidKeyType {
                    key: "direction".to_string(),
                    expected: vec![ArgKind::String],
                    received: crate::context::json_kind(other),
                });
            }
            None => Direction::Plus,
        };
        Self::new(hour, minute, direction)
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> Result<f64, Issue> {
    match object.get(key) {
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(f64::NAN)),
        Some(other) => Err(Issue::InvalidKeyType {
            key: key.to_string(),
            expected: vec![ArgKind::Number],
            received: crate::context::json_kind(other),
        }),
        None => Ok(0.0),
    }
}

/// Offset positional arguments `(hour, minute, direction)` starting at `args[0]`
pub(crate) fn offset_from_args<T>(args: &[Arg<T>]) -> Result<Offset, Issue> {
    let hour = match args.first() {
        Some(arg) => number_arg(arg)?,
        None => 0.0,
    };
    let minute = match args.get(1) {
        Some(arg) => number_arg(arg)?,
        None => 0.0,
    };
    let direction = match args.get(2) {
        Some(Arg::Text(s)) => s.parse::<Direction>()?,
        Some(other) => {
            return Err(Issue::InvalidType {
                expected: vec![ArgKind::String],
                received: other.kind(),
            });
        }
        None => Direction::Plus,
    };
    Offset::new(hour, minute, direction)
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            Direction::Plus => '+',
            Direction::Minus => '-',
        };
        write!(f, "{}{:02}:{:02}", sign, self.hour, self.minute)
    }
}

impl PgCodec for Offset {
    const TYPE_NAME: &'static str = "Offset";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Date];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 3));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Offset::parse_token(text)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        expect_keys(ctx, object, &["hour", "minute", "direction"], &[])?;
        Offset::from_fields(object)
    }

    fn from_native(ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::Zoned(dt) => Offset::from_fixed_offset(*dt.offset()),
            _ => Err(ctx.invalid_type(ArgKind::Date)),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        offset_from_args(args)
    }
}

value_object!(Offset);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_tokens() {
        let offset = Offset::expect_from("+05:30");
        assert_eq!((offset.hour(), offset.minute()), (5, 30));
        assert_eq!(offset.direction(), Direction::Plus);

        assert_eq!(Offset::expect_from("-08").to_string(), "-08:00");
        assert_eq!(Offset::expect_from("+0530").to_string(), "+05:30");
    }

    #[test]
    fn test_parse_named_tokens() {
        assert_eq!(Offset::expect_from("EST").to_string(), "-05:00");
        assert_eq!(Offset::expect_from("Z"), Offset::UTC);

        let err = Offset::safe_from("Mars/Olympus").unwrap_err();
        assert_eq!(err.code(), "invalid_timezone");
    }

    #[test]
    fn test_out_of_range_components() {
        let err = Offset::safe_from("+24:00").unwrap_err();
        assert_eq!(err.code(), "too_big");

        let err = Offset::safe_from((5, 60, "plus")).unwrap_err();
        assert_eq!(err.code(), "too_big");
    }

    #[test]
    fn test_positional_and_object_inputs() {
        let offset = Offset::expect_from((8, 0, "minus"));
        assert_eq!(offset.total_minutes(), -480);

        let offset = Offset::expect_from(json!({ "hour": 2, "minute": 0, "direction": "plus" }));
        assert_eq!(offset.to_string(), "+02:00");
        assert_eq!(offset.to_json(), json!({ "hour": 2, "minute": 0, "direction": "plus" }));
    }

    #[test]
    fn test_zero_offset_is_plus() {
        assert_eq!(Offset::expect_from("-00:00"), Offset::UTC);
    }
}
