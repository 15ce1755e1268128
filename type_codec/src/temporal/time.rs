//! `time` codec

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::grammar::{TimeParts, DATE_TIME};
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{component, finite, float_in, number_arg};

use super::calendar::{MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};
use super::style::{self, Style};

/// Time of day; `second` is fractional and kept to microsecond precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: f64,
}

impl Time {
    pub const MIDNIGHT: Time = Time {
        hour: 0,
        minute: 0,
        second: 0.0,
    };

    pub const STYLES: &'static [Style] = &[Style::Iso, Style::IsoTime, Style::Posix];

    pub fn new(hour: f64, minute: f64, second: f64) -> Result<Self, Issue> {
        let hour = component("hour", hour, 0, 23)?;
        let minute = component("minute", minute, 0, 59)?;
        let second = float_in(Some("second"), second, 0.0, 60.0, false)?;
        Ok(Self {
            hour,
            minute,
            second: style::round_second(second),
        })
    }

    pub(crate) fn from_parts(parts: &TimeParts) -> Result<Self, Issue> {
        Self::new(parts.hour as f64, parts.minute as f64, parts.second)
    }

    /// Time of a microsecond count within one day
    pub fn from_day_micros(micros: i64) -> Result<Self, Issue> {
        let micros = micros.rem_euclid(MICROS_PER_DAY);
        Self::new(
            (micros / MICROS_PER_HOUR) as f64,
            (micros % MICROS_PER_HOUR / MICROS_PER_MINUTE) as f64,
            (micros % MICROS_PER_MINUTE) as f64 / MICROS_PER_SECOND as f64,
        )
    }

    /// UTC time of day of an epoch millisecond count
    pub fn from_epoch_millis(millis: f64) -> Result<Self, Issue> {
        let micros = (finite(None, millis)? * 1000.0).round() as i64;
        Self::from_day_micros(micros)
    }

    pub(crate) fn from_naive(time: NaiveTime) -> Result<Self, Issue> {
        let second = time.second() as f64 + time.nanosecond() as f64 / 1e9;
        Self::new(time.hour() as f64, time.minute() as f64, second)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> f64 {
        self.second
    }

    /// Microseconds since midnight
    pub fn day_micros(&self) -> i64 {
        self.hour as i64 * MICROS_PER_HOUR
            + self.minute as i64 * MICROS_PER_MINUTE
            + (self.second * 1e6).round() as i64
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let micros = (self.second * 1e6).round() as u32;
        NaiveTime::from_hms_micro_opt(
            self.hour as u32,
            self.minute as u32,
            micros / 1_000_000,
            micros % 1_000_000,
        )
    }

    /// Milliseconds since midnight
    pub fn to_number(&self) -> f64 {
        self.day_micros() as f64 / 1000.0
    }

    pub(crate) fn clock(&self) -> String {
        style::clock_24(self.hour, self.minute, self.second)
    }

    pub(crate) fn clock_12(&self) -> String {
        style::clock_12(self.hour, self.minute, self.second)
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        match style {
            Style::Iso | Style::IsoTime => Ok(self.clock()),
            Style::Posix => Ok(self.clock_12()),
            other => Err(style::unsupported(Self::TYPE_NAME, other, Self::STYLES)),
        }
    }

    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clock())
    }
}

/// `(hour, minute[, second])` starting at `args[0]`
pub(crate) fn time_from_args<T>(args: &[Arg<T>]) -> Result<Time, Issue> {
    let hour = match args.first() {
        Some(arg) => number_arg(arg)?,
        None => 0.0,
    };
    let minute = match args.get(1) {
        Some(arg) => number_arg(arg)?,
        None => 0.0,
    };
    let second = match args.get(2) {
        Some(arg) => number_arg(arg)?,
        None => 0.0,
    };
    Time::new(hour, minute, second)
}

/// `hour`, `minute`, `second` keys of an already key-checked object
pub(crate) fn time_from_object(object: &Map<String, Value>) -> Result<Time, Issue> {
    let number = |key: &str| -> Result<f64, Issue> {
        match object.get(key) {
            Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(f64::NAN)),
            None | Some(Value::Null) => Ok(0.0),
            Some(other) => Err(Issue::InvalidKeyType {
                key: key.to_string(),
                expected: vec![ArgKind::Number],
                received: crate::context::json_kind(other),
            }),
        }
    };
    Time::new(number("hour")?, number("minute")?, number("second")?)
}

impl PgCodec for Time {
    const TYPE_NAME: &'static str = "Time";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Object,
        ArgKind::Date,
        ArgKind::Instance,
    ];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 3));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Time::from_epoch_millis(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        match DATE_TIME.parse(text)?.time {
            Some(parts) => Time::from_parts(&parts),
            None => Err(Issue::invalid_string("time", text)),
        }
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        expect_keys(ctx, object, &["hour", "minute", "second"], &[])?;
        time_from_object(object)
    }

    fn from_native(_ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::Time(t) => Time::from_naive(*t),
            NativeTime::DateTime(dt) => Time::from_naive(dt.time()),
            NativeTime::Zoned(dt) => Time::from_naive(dt.time()),
            NativeTime::Date(_) => Ok(Time::MIDNIGHT),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        time_from_args(args)
    }
}

value_object!(Time);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_styles() {
        let expected = Time::expect_from((10, 23, 54.678));
        for input in [
            "10:23:54.678",
            "T10:23:54.678",
            "10:23:54.678 AM",
            "10:23:54.678+02:00",
            "2004-10-19 10:23:54.678",
        ] {
            assert_eq!(Time::expect_from(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_render_styles() {
        let time = Time::expect_from("22:05:06.5");
        assert_eq!(time.to_string(), "22:05:06.5");
        assert_eq!(time.to_string_style("POSIX").unwrap(), "10:05:06.5 PM");
        assert_eq!(time.to_string_style("ISO-Time").unwrap(), "22:05:06.5");
        assert!(time.to_string_style("SQL").is_err());
    }

    #[test]
    fn test_component_bounds() {
        assert_eq!(Time::safe_from((24, 0, 0)).unwrap_err().code(), "too_big");
        assert_eq!(Time::safe_from((0, -1, 0)).unwrap_err().code(), "too_small");
        assert_eq!(Time::safe_from((0, 0, 60)).unwrap_err().code(), "too_big");
        assert_eq!(Time::safe_from("25:00").unwrap_err().code(), "too_big");
    }

    #[test]
    fn test_epoch_millis() {
        let time = Time::expect_from(1_098_181_434_678i64);
        assert_eq!(time.to_string(), "10:23:54.678");
        assert_eq!(time.to_number(), 37_434_678.0);
    }

    #[test]
    fn test_object_round_trip() {
        let time = Time::expect_from("10:23:54.678");
        let json = time.to_json();
        assert_eq!(json, json!({ "hour": 10, "minute": 23, "second": 54.678 }));
        assert_eq!(Time::expect_from(json), time);
    }

    #[test]
    fn test_naive_conversion() {
        let native = NaiveTime::from_hms_milli_opt(10, 23, 54, 678).unwrap();
        assert_eq!(Time::expect_from(native), Time::expect_from("10:23:54.678"));
        assert_eq!(Time::expect_from("10:23:54.678").to_naive_time(), Some(native));
    }
}
