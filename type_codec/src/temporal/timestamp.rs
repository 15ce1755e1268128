//! `timestamp` codec (without time zone)

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::grammar::DATE_TIME;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{finite, number_arg};

use super::calendar::MICROS_PER_DAY;
use super::style::{self, Style};
use super::time::{time_from_args, time_from_object};
use super::{render_date_time, Date, Time, DATE_TIME_STYLES};

/// Local date and time. A zone in the input text is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timestamp {
    #[serde(flatten)]
    date: Date,
    #[serde(flatten)]
    time: Time,
}

impl Timestamp {
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Timestamp of a microsecond count since 1970-01-01 00:00
    pub fn from_micros(micros: i64) -> Result<Self, Issue> {
        let date = Date::from_days(micros.div_euclid(MICROS_PER_DAY))?;
        let time = Time::from_day_micros(micros.rem_euclid(MICROS_PER_DAY))?;
        Ok(Self { date, time })
    }

    pub fn from_epoch_millis(millis: f64) -> Result<Self, Issue> {
        Self::from_micros((finite(None, millis)? * 1000.0).round() as i64)
    }

    pub(crate) fn from_naive(value: NaiveDateTime) -> Result<Self, Issue> {
        Ok(Self {
            date: Date::from_naive(value.date())?,
            time: Time::from_naive(value.time())?,
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u8 {
        self.date.month()
    }

    pub fn day(&self) -> u8 {
        self.date.day()
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

    /// Microseconds since 1970-01-01 00:00, reading the fields as UTC
    pub fn to_micros(&self) -> i64 {
        self.date.days_since_epoch() * MICROS_PER_DAY + self.time.day_micros()
    }

    /// Epoch milliseconds, reading the fields as UTC
    pub fn to_timestamp(&self) -> i64 {
        self.to_micros().div_euclid(1000)
    }

    pub fn to_number(&self) -> f64 {
        self.to_micros() as f64 / 1000.0
    }

    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date.to_naive_date()?, self.time.to_naive_time()?))
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        render_date_time(&self.date, &self.time, None, style)
            .ok_or_else(|| style::unsupported(Self::TYPE_NAME, style, DATE_TIME_STYLES))
    }

    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date.iso(), self.time.clock())
    }
}

impl PgCodec for Timestamp {
    const TYPE_NAME: &'static str = "Timestamp";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Object,
        ArgKind::Date,
        ArgKind::Instance,
    ];
    const POSITIONAL: Option<(usize, usize)> = Some((3, 6));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Timestamp::from_epoch_millis(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let parts = DATE_TIME.parse(text)?;
        let Some(date) = parts.date else {
            return Err(Issue::invalid_string("timestamp", text));
        };
        let time = match parts.time {
            Some(time) => Time::from_parts(&time)?,
            None => Time::MIDNIGHT,
        };
        Ok(Timestamp::new(Date::from_parts(&date)?, time))
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(
            ctx,
            object,
            &["year", "month", "day", "hour", "minute", "second"],
            &[],
        )?;
        let date = Date::new(fields.number("year")?, fields.number("month")?, fields.number("day")?)?;
        Ok(Timestamp::new(date, time_from_object(object)?))
    }

    fn from_native(_ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::DateTime(dt) => Timestamp::from_naive(*dt),
            NativeTime::Zoned(dt) => Timestamp::from_naive(dt.naive_local()),
            NativeTime::Date(d) => Ok(Timestamp::new(Date::from_naive(*d)?, Time::MIDNIGHT)),
            NativeTime::Time(_) => Err(Issue::invalid_string("date-bearing value", "time of day")),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        let date = Date::new(number_arg(&args[0])?, number_arg(&args[1])?, number_arg(&args[2])?)?;
        Ok(Timestamp::new(date, time_from_args(&args[3..])?))
    }
}

value_object!(Timestamp);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_styles() {
        let expected = Timestamp::expect_from((2004, 10, 19, 10, 23, 54.678));
        for input in [
            "2004-10-19 10:23:54.678",
            "2004-10-19T10:23:54.678",
            "Tue Oct 19 10:23:54.678 2004",
            "Tuesday, October 19, 2004 10:23:54.678 AM",
            "Tue, Oct 19, 2004 10:23:54.678 AM",
            "10/19/2004 10:23:54.678",
            "19.10.2004 10:23:54.678",
            "2004-10-19 10:23:54.678+02:00",
        ] {
            assert_eq!(Timestamp::expect_from(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_render_styles() {
        let ts = Timestamp::expect_from("2004-10-19 10:23:54.678");
        assert_eq!(ts.to_string(), "2004-10-19T10:23:54.678");
        assert_eq!(ts.to_string_style("ISO-Date").unwrap(), "2004-10-19");
        assert_eq!(ts.to_string_style("ISO-Time").unwrap(), "10:23:54.678");
        assert_eq!(ts.to_string_style("POSIX").unwrap(), "Tue Oct 19 10:23:54.678 2004");
        assert_eq!(
            ts.to_string_style("PostgreSQL").unwrap(),
            "Tuesday, October 19, 2004 10:23:54.678 AM"
        );
        assert_eq!(
            ts.to_string_style("PostgreSQL-Short").unwrap(),
            "Tue, Oct 19, 2004 10:23:54.678 AM"
        );
        assert_eq!(ts.to_string_style("SQL").unwrap(), "10/19/2004 10:23:54.678");
        assert!(ts.to_string_style("ISO-Duration").is_err());
    }

    #[test]
    fn test_every_style_round_trips() {
        let ts = Timestamp::expect_from("2004-10-19 22:23:54.678");
        for style in [Style::Iso, Style::Posix, Style::PostgreSql, Style::PostgreSqlShort, Style::Sql, Style::German] {
            let text = ts.to_string_with(style).unwrap();
            assert_eq!(Timestamp::expect_from(text.as_str()), ts, "{}", text);
        }
    }

    #[test]
    fn test_date_only_text_is_midnight() {
        let ts = Timestamp::expect_from("2004-10-19");
        assert_eq!(ts.to_string(), "2004-10-19T00:00:00");
    }

    #[test]
    fn test_epoch_millis() {
        let ts = Timestamp::expect_from(1_098_181_434_678i64);
        assert_eq!(ts.to_string(), "2004-10-19T10:23:54.678");
        assert_eq!(ts.to_timestamp(), 1_098_181_434_678);
    }

    #[test]
    fn test_object_json_is_flat() {
        let ts = Timestamp::expect_from("2004-10-19 10:23:54");
        let json = ts.to_json();
        assert_eq!(
            json,
            json!({ "year": 2004, "month": 10, "day": 19, "hour": 10, "minute": 23, "second": 54.0 })
        );
        assert_eq!(Timestamp::expect_from(json), ts);
    }

    #[test]
    fn test_out_of_range_fields() {
        assert_eq!(Timestamp::safe_from((2004, 10, 19, 24, 0, 0)).unwrap_err().code(), "too_big");
        assert_eq!(Timestamp::safe_from("2004-13-19 10:00").unwrap_err().code(), "too_big");
    }
}
