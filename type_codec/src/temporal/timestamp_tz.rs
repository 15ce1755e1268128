//! `timestamptz` codec
//!
//! Keeps the offset it was given for rendering; equality and ordering go
//! through the UTC instant, so `04:05:06-01:00` equals `05:05:06Z`.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::grammar::DATE_TIME;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{finite, number_arg};

use super::calendar::MICROS_PER_MINUTE;
use super::offset::offset_from_args;
use super::style::{self, Style};
use super::time::{time_from_args, time_from_object};
use super::{render_date_time, zone_or_utc, Date, Offset, Time, Timestamp, DATE_TIME_STYLES};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimestampTZ {
    #[serde(flatten)]
    date: Date,
    #[serde(flatten)]
    time: Time,
    offset: Offset,
}

impl TimestampTZ {
    pub fn new(date: Date, time: Time, offset: Offset) -> Self {
        Self { date, time, offset }
    }

    /// Instant of an epoch microsecond count, rendered at `offset`
    pub fn from_utc_micros(micros: i64, offset: Offset) -> Result<Self, Issue> {
        let local = micros + offset.total_minutes() as i64 * MICROS_PER_MINUTE;
        let ts = Timestamp::from_micros(local)?;
        Ok(Self::new(ts.date(), ts.time(), offset))
    }

    pub fn from_epoch_millis(millis: f64) -> Result<Self, Issue> {
        Self::from_utc_micros((finite(None, millis)? * 1000.0).round() as i64, Offset::UTC)
    }

    pub(crate) fn from_chrono(value: &DateTime<FixedOffset>) -> Result<Self, Issue> {
        let local = Timestamp::from_naive(value.naive_local())?;
        Ok(Self::new(local.date(), local.time(), Offset::from_fixed_offset(*value.offset())?))
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn offset(&self) -> Offset {
        self.offset
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

    /// Local fields without the offset
    pub fn local(&self) -> Timestamp {
        Timestamp::new(self.date, self.time)
    }

    /// Microseconds since the Unix epoch
    pub fn utc_micros(&self) -> i64 {
        self.local().to_micros() - self.offset.total_minutes() as i64 * MICROS_PER_MINUTE
    }

    /// Same instant rendered at another offset
    pub fn at_offset(&self, offset: Offset) -> Result<Self, Issue> {
        Self::from_utc_micros(self.utc_micros(), offset)
    }

    /// Epoch milliseconds
    pub fn to_timestamp(&self) -> i64 {
        self.utc_micros().div_euclid(1000)
    }

    pub fn to_number(&self) -> f64 {
        self.utc_micros() as f64 / 1000.0
    }

    pub fn to_date_time(&self) -> Option<DateTime<FixedOffset>> {
        let naive = self.local().to_naive_date_time()?;
        self.offset
            .to_fixed_offset()
            .from_local_datetime(&naive)
            .single()
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        render_date_time(&self.date, &self.time, Some(&self.offset), style)
            .ok_or_else(|| style::unsupported(Self::TYPE_NAME, style, DATE_TIME_STYLES))
    }

    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl PartialEq for TimestampTZ {
    fn eq(&self, other: &Self) -> bool {
        self.utc_micros() == other.utc_micros()
    }
}

impl Eq for TimestampTZ {}

impl PartialOrd for TimestampTZ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimestampTZ {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_micros().cmp(&other.utc_micros())
    }
}

impl fmt::Display for TimestampTZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}{}", self.date.iso(), self.time.clock(), self.offset)
    }
}

impl PgCodec for TimestampTZ {
    const TYPE_NAME: &'static str = "TimestampTZ";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Object,
        ArgKind::Date,
        ArgKind::Instance,
    ];
    const POSITIONAL: Option<(usize, usize)> = Some((3, 9));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        TimestampTZ::from_epoch_millis(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let parts = DATE_TIME.parse(text)?;
        let Some(date) = parts.date else {
            return Err(Issue::invalid_string("timestamp with time zone", text));
        };
        let time = match parts.time {
            Some(time) => Time::from_parts(&time)?,
            None => Time::MIDNIGHT,
        };
        let offset = zone_or_utc(parts.zone.as_deref())?;
        Ok(TimestampTZ::new(Date::from_parts(&date)?, time, offset))
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(
            ctx,
            object,
            &["year", "month", "day", "hour", "minute", "second", "offset"],
            &[],
        )?;
        let date = Date::new(fields.number("year")?, fields.number("month")?, fields.number("day")?)?;
        let time = time_from_object(object)?;
        let offset_object = fields.object("offset")?;
        expect_keys(ctx, offset_object, &["hour", "minute", "direction"], &[])?;
        Ok(TimestampTZ::new(date, time, Offset::from_fields(offset_object)?))
    }

    fn from_native(_ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::Zoned(dt) => TimestampTZ::from_chrono(dt),
            NativeTime::DateTime(dt) => {
                let local = Timestamp::from_naive(*dt)?;
                Ok(TimestampTZ::new(local.date(), local.time(), Offset::UTC))
            }
            NativeTime::Date(d) => Ok(TimestampTZ::new(Date::from_naive(*d)?, Time::MIDNIGHT, Offset::UTC)),
            NativeTime::Time(_) => Err(Issue::invalid_string("date-bearing value", "time of day")),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        let date = Date::new(number_arg(&args[0])?, number_arg(&args[1])?, number_arg(&args[2])?)?;
        let clock = &args[3..args.len().min(6)];
        let time = time_from_args(clock)?;
        let offset = match args.get(6..) {
            Some(rest) if !rest.is_empty() => offset_from_args(rest)?,
            _ => Offset::UTC,
        };
        Ok(TimestampTZ::new(date, time, offset))
    }
}

value_object!(TimestampTZ);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Args;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_equal_instants_at_different_offsets() {
        let a = TimestampTZ::expect_from("2004-10-19 04:05:06.789-01:00");
        assert!(a.equals("2004-10-19T05:05:06.789Z"));
        assert_eq!(a.to_string(), "2004-10-19T04:05:06.789-01:00");
    }

    #[test]
    fn test_named_zone_offsets() {
        let est = TimestampTZ::expect_from("2004-10-19 10:23:54.678 EST");
        assert!(est.equals("2004-10-19 15:23:54.678Z"));
        assert_eq!(est.offset().to_string(), "-05:00");

        let err = TimestampTZ::safe_from("2004-10-19 10:23:54 QQQ").unwrap_err();
        assert_eq!(err.code(), "invalid_timezone");
    }

    #[test]
    fn test_missing_zone_defaults_to_utc() {
        let ts = TimestampTZ::expect_from("2004-10-19 10:23:54");
        assert_eq!(ts.offset(), Offset::UTC);
        assert_eq!(ts.to_string(), "2004-10-19T10:23:54+00:00");
    }

    #[test]
    fn test_render_styles() {
        let ts = TimestampTZ::expect_from("2004-10-19 10:23:54.678+02:00");
        assert_eq!(
            ts.to_string_style("POSIX").unwrap(),
            "Tue Oct 19 10:23:54.678 2004 +02:00"
        );
        assert_eq!(
            ts.to_string_style("PostgreSQL").unwrap(),
            "Tuesday, October 19, 2004 10:23:54.678 AM +02:00"
        );
        assert_eq!(
            ts.to_string_style("PostgreSQL-Short").unwrap(),
            "Tue, Oct 19, 2004 10:23:54.678 AM +02:00"
        );
        assert_eq!(ts.to_string_style("SQL").unwrap(), "10/19/2004 10:23:54.678 +02:00");
        assert_eq!(ts.to_string_style("ISO").unwrap(), "2004-10-19T10:23:54.678+02:00");
    }

    #[test]
    fn test_every_style_round_trips() {
        let ts = TimestampTZ::expect_from("2004-10-19 22:23:54.678-08:00");
        for style in [Style::Iso, Style::Posix, Style::PostgreSql, Style::PostgreSqlShort, Style::Sql, Style::German] {
            let text = ts.to_string_with(style).unwrap();
            let parsed = TimestampTZ::expect_from(text.as_str());
            assert_eq!(parsed, ts, "{}", text);
            assert_eq!(parsed.offset(), ts.offset(), "{}", text);
        }
    }

    #[test]
    fn test_positional_nine_arguments() {
        let ts = TimestampTZ::expect_from((2004, 10, 19, 10, 23, 54.678, 2, 0, "plus"));
        assert_eq!(ts.to_string(), "2004-10-19T10:23:54.678+02:00");

        let args: Args<TimestampTZ> = Args(vec![
            2004.into(),
            10.into(),
            19.into(),
            10.into(),
            23.into(),
            54.into(),
            2.into(),
            0.into(),
            "plus".into(),
            1.into(),
        ]);
        let err = TimestampTZ::safe_from(args).unwrap_err();
        assert_eq!(err.code(), "too_big");
    }

    #[test]
    fn test_object_round_trip() {
        let ts = TimestampTZ::expect_from("2004-10-19 10:23:54+05:30");
        let json = ts.to_json();
        assert_eq!(json["offset"], json!({ "hour": 5, "minute": 30, "direction": "plus" }));
        assert_eq!(json["hour"], json!(10));
        assert_eq!(TimestampTZ::expect_from(json), ts);
    }

    #[test]
    fn test_chrono_conversion() {
        let utc = Utc.with_ymd_and_hms(2004, 10, 19, 8, 23, 54).unwrap();
        let ts = TimestampTZ::expect_from(utc);
        assert!(ts.equals("2004-10-19 10:23:54+02:00"));
        assert_eq!(ts.to_date_time().unwrap().timestamp(), utc.timestamp());
        assert_eq!(ts.to_timestamp(), utc.timestamp_millis());
    }

    #[test]
    fn test_epoch_millis() {
        let ts = TimestampTZ::expect_from(1_098_181_434_678i64);
        assert_eq!(ts.to_string(), "2004-10-19T10:23:54.678+00:00");
    }

    #[test]
    fn test_at_offset_keeps_the_instant() {
        let ts = TimestampTZ::expect_from("2004-10-19 23:30:00Z");
        let shifted = ts.at_offset(Offset::expect_from("+02:00")).unwrap();
        assert_eq!(shifted.to_string(), "2004-10-20T01:30:00+02:00");
        assert_eq!(shifted, ts);
    }
}
