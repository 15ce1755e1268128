//! `timetz` codec
//!
//! Equality compares the clock fields and the offset as a tuple, so
//! `10:00+02:00` and `08:00+00:00` are different values.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::grammar::DATE_TIME;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::calendar::{MICROS_PER_DAY, MICROS_PER_MINUTE};
use super::offset::offset_from_args;
use super::style::{self, Style};
use super::time::{time_from_args, time_from_object};
use super::{zone_or_utc, Offset, Time};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeTZ {
    #[serde(flatten)]
    time: Time,
    offset: Offset,
}

impl TimeTZ {
    pub fn new(time: Time, offset: Offset) -> Self {
        Self { time, offset }
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn hour(&self) -> u8 {
        self.time.hour()
    }

    pub fn minute(&self) -> u8 {
        self.time.minute()
    }

    pub fn second(&self) -> f64 {
        self.time.second()
    }

    /// UTC time of day in microseconds, wrapped into one day
    pub fn utc_day_micros(&self) -> i64 {
        (self.time.day_micros() - self.offset.total_minutes() as i64 * MICROS_PER_MINUTE)
            .rem_euclid(MICROS_PER_DAY)
    }

    /// Same instant of the day at UTC
    pub fn to_utc(&self) -> Result<Self, Issue> {
        Ok(Self::new(Time::from_day_micros(self.utc_day_micros())?, Offset::UTC))
    }

    /// UTC milliseconds since midnight
    pub fn to_number(&self) -> f64 {
        self.utc_day_micros() as f64 / 1000.0
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        match style {
            Style::Iso | Style::IsoTime => Ok(format!("{}{}", self.time.clock(), self.offset)),
            Style::Posix => Ok(format!("{} {}", self.time.clock_12(), self.offset)),
            other => Err(style::unsupported(Self::TYPE_NAME, other, Time::STYLES)),
        }
    }

    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl fmt::Display for TimeTZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time.clock(), self.offset)
    }
}

impl PgCodec for TimeTZ {
    const TYPE_NAME: &'static str = "TimeTZ";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Object,
        ArgKind::Date,
        ArgKind::Instance,
    ];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 6));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Ok(TimeTZ::new(Time::from_epoch_millis(value)?, Offset::UTC))
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let parts = DATE_TIME.parse(text)?;
        let Some(time) = parts.time else {
            return Err(Issue::invalid_string("time with time zone", text));
        };
        Ok(TimeTZ::new(Time::from_parts(&time)?, zone_or_utc(parts.zone.as_deref())?))
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["hour", "minute", "second", "offset"], &[])?;
        let time = time_from_object(object)?;
        let offset_object = fields.object("offset")?;
        expect_keys(ctx, offset_object, &["hour", "minute", "direction"], &[])?;
        Ok(TimeTZ::new(time, Offset::from_fields(offset_object)?))
    }

    fn from_native(_ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::Zoned(dt) => Ok(TimeTZ::new(
                Time::from_naive(dt.time())?,
                Offset::from_fixed_offset(*dt.offset())?,
            )),
            NativeTime::Time(t) => Ok(TimeTZ::new(Time::from_naive(*t)?, Offset::UTC)),
            NativeTime::DateTime(dt) => Ok(TimeTZ::new(Time::from_naive(dt.time())?, Offset::UTC)),
            NativeTime::Date(_) => Ok(TimeTZ::new(Time::MIDNIGHT, Offset::UTC)),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        let time = time_from_args(&args[..args.len().min(3)])?;
        let offset = match args.get(3..) {
            Some(rest) if !rest.is_empty() => offset_from_args(rest)?,
            _ => Offset::UTC,
        };
        Ok(TimeTZ::new(time, offset))
    }
}

value_object!(TimeTZ);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_and_render() {
        let value = TimeTZ::expect_from("10:23:54.678+02:00");
        assert_eq!(value.to_string(), "10:23:54.678+02:00");
        assert_eq!(value.to_string_style("POSIX").unwrap(), "10:23:54.678 AM +02:00");

        let posix = TimeTZ::expect_from("10:23:54.678 AM +02:00");
        assert_eq!(posix, value);
    }

    #[test]
    fn test_named_zone_and_default() {
        let value = TimeTZ::expect_from("10:23:54 EST");
        assert_eq!(value.offset().to_string(), "-05:00");

        let value = TimeTZ::expect_from("10:23:54");
        assert_eq!(value.offset(), Offset::UTC);
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = TimeTZ::expect_from("10:00:00+02:00");
        assert!(!a.equals("08:00:00+00:00"));
        assert_eq!(a.to_utc().unwrap(), TimeTZ::expect_from("08:00:00Z"));
    }

    #[test]
    fn test_positional_arguments() {
        let value = TimeTZ::expect_from((10, 23, 54, 5, 30, "minus"));
        assert_eq!(value.to_string(), "10:23:54-05:30");
    }

    #[test]
    fn test_object_round_trip() {
        let value = TimeTZ::expect_from("10:23:54.678-08:00");
        let json = value.to_json();
        assert_eq!(
            json,
            json!({
                "hour": 10,
                "minute": 23,
                "second": 54.678,
                "offset": { "hour": 8, "minute": 0, "direction": "minus" }
            })
        );
        assert_eq!(TimeTZ::expect_from(json), value);
    }
}
