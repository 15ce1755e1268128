//! `date` codec

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::grammar::{DateParts, DATE_TIME};
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{component, integer_in, number_arg};

use super::calendar::{self, MICROS_PER_DAY};
use super::style::{self, Style};

/// Highest year PostgreSQL timestamps can hold
pub const MAX_YEAR: i64 = 294_276;

/// Calendar date. The day is checked against 1..=31 only, not the month length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    pub const STYLES: &'static [Style] = &[
        Style::Iso,
        Style::IsoDate,
        Style::Posix,
        Style::PostgreSql,
        Style::PostgreSqlShort,
        Style::Sql,
        Style::German,
    ];

    pub fn new(year: f64, month: f64, day: f64) -> Result<Self, Issue> {
        let year = integer_in(Some("year"), year, 1, MAX_YEAR)? as i32;
        let month = component("month", month, 1, 12)?;
        let day = component("day", day, 1, 31)?;
        Ok(Self { year, month, day })
    }

    pub(crate) fn from_parts(parts: &DateParts) -> Result<Self, Issue> {
        Self::new(parts.year as f64, parts.month as f64, parts.day as f64)
    }

    /// Date of a day count since 1970-01-01
    pub fn from_days(days: i64) -> Result<Self, Issue> {
        let (year, month, day) = calendar::civil_from_days(days);
        Self::new(year as f64, month as f64, day as f64)
    }

    /// UTC date of an epoch millisecond count
    pub fn from_epoch_millis(millis: f64) -> Result<Self, Issue> {
        let micros = crate::validation::finite(None, millis)? * 1000.0;
        Self::from_days((micros.round() as i64).div_euclid(MICROS_PER_DAY))
    }

    pub(crate) fn from_naive(date: NaiveDate) -> Result<Self, Issue> {
        Self::new(date.year() as f64, date.month() as f64, date.day() as f64)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01, rolling excess days into the next month
    pub fn days_since_epoch(&self) -> i64 {
        calendar::days_from_civil(self.year as i64, self.month as i64, self.day as i64)
    }

    pub fn weekday_name(&self) -> &'static str {
        calendar::DAY_NAMES[calendar::weekday(self.days_since_epoch())]
    }

    /// `None` when the day does not exist in its month
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }

    /// Epoch milliseconds at UTC midnight
    pub fn to_timestamp(&self) -> i64 {
        self.days_since_epoch() * 86_400_000
    }

    pub fn to_number(&self) -> f64 {
        self.to_timestamp() as f64
    }

    pub(crate) fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub(crate) fn render(&self, style: Style) -> Option<String> {
        let weekday = self.weekday_name();
        let month = calendar::month_name(self.month);
        Some(match style {
            Style::Iso | Style::IsoDate => self.iso(),
            Style::Posix => format!(
                "{} {} {:02} {:04}",
                calendar::short_name(weekday),
                calendar::short_name(month),
                self.day,
                self.year
            ),
            Style::PostgreSql => format!("{}, {} {:02}, {:04}", weekday, month, self.day, self.year),
            Style::PostgreSqlShort => format!(
                "{}, {} {:02}, {:04}",
                calendar::short_name(weekday),
                calendar::short_name(month),
                self.day,
                self.year
            ),
            Style::Sql => format!("{:02}/{:02}/{:04}", self.month, self.day, self.year),
            Style::German => format!("{:02}.{:02}.{:04}", self.day, self.month, self.year),
            _ => return None,
        })
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        self.render(style)
            .ok_or_else(|| style::unsupported(Self::TYPE_NAME, style, Self::STYLES))
    }

    /// Render in a named style such as `"PostgreSQL"`
    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso())
    }
}

impl PgCodec for Date {
    const TYPE_NAME: &'static str = "Date";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Object,
        ArgKind::Date,
        ArgKind::Instance,
    ];
    const POSITIONAL: Option<(usize, usize)> = Some((3, 3));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Date::from_epoch_millis(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        match DATE_TIME.parse(text)?.date {
            Some(parts) => Date::from_parts(&parts),
            None => Err(Issue::invalid_string("date", text)),
        }
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["year", "month", "day"], &[])?;
        Date::new(fields.number("year")?, fields.number("month")?, fields.number("day")?)
    }

    fn from_native(_ctx: &mut ParseContext<'_, Self>, native: &NativeTime) -> Result<Self, Issue> {
        match native {
            NativeTime::Date(d) => Date::from_naive(*d),
            NativeTime::DateTime(dt) => Date::from_naive(dt.date()),
            NativeTime::Zoned(dt) => Date::from_naive(dt.date_naive()),
            NativeTime::Time(_) => Err(Issue::invalid_string("date-bearing value", "time of day")),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        Date::new(number_arg(&args[0])?, number_arg(&args[1])?, number_arg(&args[2])?)
    }
}

value_object!(Date);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_styles() {
        let expected = Date::expect_from((2004, 10, 19));
        for input in [
            "2004-10-19",
            "Tue Oct 19 2004",
            "Tuesday, October 19, 2004",
            "Tue, Oct 19, 2004",
            "10/19/2004",
            "19.10.2004",
            "2004-10-19 10:23:54+02",
        ] {
            assert_eq!(Date::expect_from(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_render_styles() {
        let date = Date::expect_from("2004-10-19");
        assert_eq!(date.to_string(), "2004-10-19");
        assert_eq!(date.to_string_style("POSIX").unwrap(), "Tue Oct 19 2004");
        assert_eq!(date.to_string_style("PostgreSQL").unwrap(), "Tuesday, October 19, 2004");
        assert_eq!(date.to_string_style("PostgreSQL-Short").unwrap(), "Tue, Oct 19, 2004");
        assert_eq!(date.to_string_style("SQL").unwrap(), "10/19/2004");
        assert_eq!(date.to_string_style("German").unwrap(), "19.10.2004");
    }

    #[test]
    fn test_unsupported_style_is_an_error() {
        let date = Date::expect_from("2004-10-19");
        let err = date.to_string_style("ISO-Time").unwrap_err();
        assert_eq!(err.code(), "invalid_string");

        let err = date.to_string_style("nope").unwrap_err();
        assert_eq!(err.code(), "invalid_string");
    }

    #[test]
    fn test_component_bounds() {
        let err = Date::safe_from((2004, 13, 1)).unwrap_err();
        assert_eq!(err.code(), "too_big");
        assert_eq!(err.message(), "month must be less than or equal to 12, received 13");

        let err = Date::safe_from((2004, 1, 0)).unwrap_err();
        assert_eq!(err.code(), "too_small");

        let err = Date::safe_from((2004, 1.5, 1)).unwrap_err();
        assert_eq!(err.code(), "not_whole");
    }

    #[test]
    fn test_day_is_not_checked_against_month_length() {
        let date = Date::expect_from("2004-02-31");
        assert_eq!(date.day(), 31);
        assert_eq!(date.to_naive_date(), None);
        assert_eq!(date.to_timestamp(), Date::expect_from("2004-03-02").to_timestamp());
    }

    #[test]
    fn test_epoch_millis_and_native() {
        let date = Date::expect_from(1_098_181_434_678i64);
        assert_eq!(date.to_string(), "2004-10-19");

        let native = NaiveDate::from_ymd_opt(2004, 10, 19).unwrap();
        assert_eq!(Date::expect_from(native), Date::expect_from("2004-10-19"));
        assert_eq!(Date::expect_from("2004-10-19").to_naive_date(), Some(native));
    }

    #[test]
    fn test_object_input_and_json() {
        let date = Date::expect_from(json!({ "year": 2004, "month": 10, "day": 19 }));
        assert_eq!(date.to_json(), json!({ "year": 2004, "month": 10, "day": 19 }));

        let err = Date::safe_from(json!({ "year": 2004, "month": 10 })).unwrap_err();
        assert_eq!(err.code(), "missing_keys");
    }

    #[test]
    fn test_setters_are_atomic() {
        let mut date = Date::expect_from("2004-10-19");
        assert!(date.set("month", 13).is_err());
        assert_eq!(date.to_string(), "2004-10-19");

        date.set("month", 11).unwrap();
        assert_eq!(date.to_string(), "2004-11-19");

        assert!(date.set_value("garbage").is_err());
        date.set_value("2005-01-02").unwrap();
        assert_eq!(date.postgres(), "2005-01-02");
    }

    #[test]
    fn test_arity() {
        let err = Date::safe_from((2004, 10)).unwrap_err();
        assert_eq!(err.code(), "too_small");
        let err = Date::safe_from((2004, 10, 19, 1)).unwrap_err();
        assert_eq!(err.code(), "too_big");
    }
}
