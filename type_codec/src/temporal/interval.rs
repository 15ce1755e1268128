//! `interval` codec
//!
//! Stored the way the server stores it: a month count, a day count and a
//! microsecond count. Years are derived from months and the clock fields from
//! microseconds, so every accessor shares the sign of its component.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::errors::CodecError;
use crate::grammar::{IntervalParts, INTERVAL};
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};
use crate::validation::{finite, number_arg, whole};

use super::calendar::{MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};
use super::style::{self, Style};

const FIELDS: [&str; 6] = ["years", "months", "days", "hours", "minutes", "seconds"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval {
    months: i32,
    days: i32,
    micros: i64,
}

#[derive(Serialize)]
struct IntervalFields {
    years: i32,
    months: i32,
    days: i32,
    hours: i64,
    minutes: i64,
    seconds: f64,
}

/// Trim float noise such as `13.200000000000001` before splitting units
fn tidy(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

fn narrow_i32(field: &'static str, value: f64) -> Result<i32, Issue> {
    if value > i32::MAX as f64 {
        return Err(Issue::too_big(SizeKind::Number, Some(field), i32::MAX as i64, true, value));
    }
    if value < i32::MIN as f64 {
        return Err(Issue::too_small(SizeKind::Number, Some(field), i32::MIN as i64, true, value));
    }
    Ok(value as i32)
}

impl Interval {
    pub const ZERO: Interval = Interval {
        months: 0,
        days: 0,
        micros: 0,
    };

    pub const STYLES: &'static [Style] = &[
        Style::Iso,
        Style::IsoDuration,
        Style::IsoDurationShort,
        Style::IsoDurationBasic,
        Style::IsoDurationExtended,
        Style::PostgreSql,
        Style::PostgreSqlShort,
        Style::Sql,
    ];

    /// Whole years through minutes; seconds may be fractional
    pub fn new(years: f64, months: f64, days: f64, hours: f64, minutes: f64, seconds: f64) -> Result<Self, Issue> {
        let parts = IntervalParts {
            years: whole(Some("years"), years)?,
            months: whole(Some("months"), months)?,
            weeks: 0.0,
            days: whole(Some("days"), days)?,
            hours: whole(Some("hours"), hours)?,
            minutes: whole(Some("minutes"), minutes)?,
            seconds: finite(Some("seconds"), seconds)?,
        };
        Self::from_parts(&parts)
    }

    /// Cascade fractional units downwards: a month is 30 days, a day 24 hours
    pub(crate) fn from_parts(parts: &IntervalParts) -> Result<Self, Issue> {
        let total_months = tidy(parts.years * 12.0 + parts.months);
        let whole_months = total_months.trunc();
        let total_days = tidy(parts.weeks * 7.0 + parts.days + (total_months - whole_months) * 30.0);
        let whole_days = total_days.trunc();
        let micros = ((total_days - whole_days) * MICROS_PER_DAY as f64
            + (parts.hours * 3600.0 + parts.minutes * 60.0 + parts.seconds) * 1e6)
            .round();

        let micros = finite(Some("seconds"), micros)?;
        if micros.abs() >= i64::MAX as f64 {
            return Err(Issue::too_big(SizeKind::Number, Some("seconds"), i64::MAX / MICROS_PER_SECOND, true, micros / 1e6));
        }

        Ok(Self {
            months: narrow_i32("months", whole_months)?,
            days: narrow_i32("days", whole_days)?,
            micros: micros as i64,
        })
    }

    pub fn from_millis(millis: f64) -> Result<Self, Issue> {
        let millis = finite(None, millis)?;
        Self::from_parts(&IntervalParts {
            seconds: millis / 1000.0,
            ..IntervalParts::default()
        })
    }

    pub fn years(&self) -> i32 {
        self.months / 12
    }

    /// Months left over after whole years
    pub fn months(&self) -> i32 {
        self.months % 12
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    pub fn hours(&self) -> i64 {
        self.micros / MICROS_PER_HOUR
    }

    pub fn minutes(&self) -> i64 {
        (self.micros % MICROS_PER_HOUR) / MICROS_PER_MINUTE
    }

    pub fn seconds(&self) -> f64 {
        (self.micros % MICROS_PER_MINUTE) as f64 / 1e6
    }

    pub fn total_months(&self) -> i32 {
        self.months
    }

    pub fn total_micros(&self) -> i64 {
        self.micros
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Milliseconds using 365.25-day years and 30-day months
    pub fn to_number(&self) -> f64 {
        let years = self.years() as f64 * 365.25 * 86_400.0;
        let months = self.months() as f64 * 30.0 * 86_400.0;
        let days = self.days as f64 * 86_400.0;
        (years + months + days) * 1000.0 + self.micros as f64 / 1000.0
    }

    fn fields(&self) -> IntervalFields {
        IntervalFields {
            years: self.years(),
            months: self.months(),
            days: self.days,
            hours: self.hours(),
            minutes: self.minutes(),
            seconds: self.seconds(),
        }
    }

    fn clock(&self, pad_hours: bool) -> String {
        let hours = self.hours().abs();
        let hours = if pad_hours {
            format!("{:02}", hours)
        } else {
            hours.to_string()
        };
        format!("{}:{:02}:{}", hours, self.minutes().abs(), style::seconds(self.seconds(), true))
    }

    fn signed_seconds(&self) -> String {
        let sign = if self.micros % MICROS_PER_MINUTE < 0 { "-" } else { "" };
        format!("{}{}", sign, style::seconds(self.seconds(), false))
    }

    /// `1 year 2 mons 3 days 04:05:06.789`
    fn render_postgres(&self) -> String {
        let mut out = Vec::new();
        let mut after_negative = false;
        for (value, unit) in [
            (self.years() as i64, "year"),
            (self.months() as i64, "mon"),
            (self.days as i64, "day"),
        ] {
            if value == 0 {
                continue;
            }
            let sign = if after_negative && value > 0 { "+" } else { "" };
            let plural = if value == 1 { "" } else { "s" };
            out.push(format!("{}{} {}{}", sign, value, unit, plural));
            after_negative = value < 0;
        }
        if out.is_empty() || self.micros != 0 {
            let sign = if self.micros < 0 {
                "-"
            } else if after_negative {
                "+"
            } else {
                ""
            };
            out.push(format!("{}{}", sign, self.clock(true)));
        }
        out.join(" ")
    }

    /// `@ 1 year 2 mons 3 days 4 hours 5 mins 6.789 secs [ago]`
    fn render_verbose(&self) -> String {
        let mut out = String::from("@");
        let mut is_zero = true;
        let mut is_before = false;
        for (value, unit) in [
            (self.years() as i64, "year"),
            (self.months() as i64, "mon"),
            (self.days as i64, "day"),
            (self.hours(), "hour"),
            (self.minutes(), "min"),
        ] {
            if value == 0 {
                continue;
            }
            let mut value = value;
            if is_zero {
                is_before = value < 0;
                value = value.abs();
            } else if is_before {
                value = -value;
            }
            let plural = if value == 1 { "" } else { "s" };
            out.push_str(&format!(" {} {}{}", value, unit, plural));
            is_zero = false;
        }

        let second_micros = self.micros % MICROS_PER_MINUTE;
        if second_micros != 0 {
            let negative = second_micros < 0;
            if is_zero {
                is_before = negative;
            }
            let sign = if !is_zero && negative != is_before { "-" } else { "" };
            let seconds = self.seconds().abs();
            let plural = if seconds == 1.0 { "" } else { "s" };
            out.push_str(&format!(" {}{} sec{}", sign, style::seconds(seconds, false), plural));
            is_zero = false;
        }

        if is_zero {
            out.push_str(" 0");
        }
        if is_before {
            out.push_str(" ago");
        }
        out
    }

    /// `P1Y2M3DT4H5M6.789S`, every designator present
    fn render_designator(&self) -> String {
        format!(
            "P{}Y{}M{}DT{}H{}M{}S",
            self.years(),
            self.months(),
            self.days,
            self.hours(),
            self.minutes(),
            self.signed_seconds()
        )
    }

    /// Designator form without the zero fields
    fn render_designator_short(&self) -> String {
        if self.is_zero() {
            return "PT0S".to_string();
        }
        let mut out = String::from("P");
        for (value, unit) in [(self.years() as i64, 'Y'), (self.months() as i64, 'M'), (self.days as i64, 'D')] {
            if value != 0 {
                out.push_str(&format!("{}{}", value, unit));
            }
        }
        if self.micros != 0 {
            out.push('T');
            if self.hours() != 0 {
                out.push_str(&format!("{}H", self.hours()));
            }
            if self.minutes() != 0 {
                out.push_str(&format!("{}M", self.minutes()));
            }
            if self.micros % MICROS_PER_MINUTE != 0 {
                out.push_str(&format!("{}S", self.signed_seconds()));
            }
        }
        out
    }

    /// Fixed-width forms carry one sign for the whole value
    fn render_fixed(&self, extended: bool) -> Result<String, Issue> {
        let signs = [
            self.years() as i64,
            self.months() as i64,
            self.days as i64,
            self.micros,
        ];
        let negative = signs.iter().any(|v| *v < 0);
        if negative && signs.iter().any(|v| *v > 0) {
            return Err(Issue::invalid_string("interval with uniformly signed fields", self.to_string()));
        }
        if self.years().abs() > 9999 || self.days.abs() > 99 || self.hours().abs() > 99 {
            return Err(Issue::invalid_string(
                "interval fitting fixed-width ISO 8601 fields",
                self.to_string(),
            ));
        }

        let sign = if negative { "-" } else { "" };
        let (years, months, days) = (self.years().abs(), self.months().abs(), self.days.abs());
        let (hours, minutes) = (self.hours().abs(), self.minutes().abs());
        let seconds = style::seconds(self.seconds(), true);
        Ok(if extended {
            format!("{sign}P{years:04}-{months:02}-{days:02}T{hours:02}:{minutes:02}:{seconds}")
        } else {
            format!("{sign}P{years:04}{months:02}{days:02}T{hours:02}{minutes:02}{seconds}")
        })
    }

    /// SQL standard form; mixed signs fall back to explicit per-part signs
    fn render_sql(&self) -> String {
        let values = [self.months as i64, self.days as i64, self.micros];
        let has_negative = values.iter().any(|v| *v < 0);
        let has_positive = values.iter().any(|v| *v > 0);
        let has_year_month = self.months != 0;
        let has_day_time = self.days != 0 || self.micros != 0;

        if !has_negative && !has_positive {
            return "0".to_string();
        }

        let sign_of = |negative: bool| if negative { '-' } else { '+' };
        if (has_negative && has_positive) || (has_year_month && has_day_time) {
            return format!(
                "{}{}-{} {}{} {}{}",
                sign_of(self.months < 0),
                self.years().abs(),
                self.months().abs(),
                sign_of(self.days < 0),
                self.days.abs(),
                sign_of(self.micros < 0),
                self.clock(false)
            );
        }

        let sign = if has_negative { "-" } else { "" };
        if has_year_month {
            format!("{}{}-{}", sign, self.years().abs(), self.months().abs())
        } else if self.days != 0 {
            format!("{}{} {}", sign, self.days.abs(), self.clock(false))
        } else {
            format!("{}{}", sign, self.clock(false))
        }
    }

    pub fn to_string_with(&self, style: Style) -> Result<String, CodecError> {
        let rendered = match style {
            Style::Iso | Style::IsoDuration => Ok(self.render_designator()),
            Style::IsoDurationShort => Ok(self.render_designator_short()),
            Style::IsoDurationBasic => self.render_fixed(false),
            Style::IsoDurationExtended => self.render_fixed(true),
            Style::PostgreSql => Ok(self.render_verbose()),
            Style::PostgreSqlShort => Ok(self.render_postgres()),
            Style::Sql => Ok(self.render_sql()),
            other => return Err(style::unsupported(Self::TYPE_NAME, other, Self::STYLES)),
        };
        rendered.map_err(|issue| CodecError::new(Self::TYPE_NAME, issue))
    }

    pub fn to_string_style(&self, name: &str) -> Result<String, CodecError> {
        self.to_string_with(style::resolve(Self::TYPE_NAME, name)?)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_postgres())
    }
}

impl Serialize for Interval {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields().serialize(serializer)
    }
}

impl PgCodec for Interval {
    const TYPE_NAME: &'static str = "Interval";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Object, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((6, 7));

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Interval::from_millis(value)
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Interval::from_parts(&INTERVAL.parse(text)?)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &[], &["years", "months", "days", "hours", "minutes", "seconds", "milliseconds"])?;
        let mut values = [0.0; 6];
        for (slot, key) in values.iter_mut().zip(FIELDS) {
            *slot = fields.optional_number(key)?.unwrap_or(0.0);
        }
        let millis = fields.optional_number("milliseconds")?.unwrap_or(0.0);
        let [years, months, days, hours, minutes, seconds] = values;
        Interval::new(years, months, days, hours, minutes, seconds + finite(Some("milliseconds"), millis)? / 1000.0)
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        let mut values = [0.0; 7];
        for (slot, arg) in values.iter_mut().zip(args) {
            *slot = number_arg(arg)?;
        }
        let [years, months, days, hours, minutes, seconds, millis] = values;
        Interval::new(years, months, days, hours, minutes, seconds + millis / 1000.0)
    }
}

value_object!(Interval);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_rendering() {
        let value = Interval::expect_from((1, 2, 3, 4, 5, 6.789));
        assert_eq!(value.to_string(), "1 year 2 mons 3 days 04:05:06.789");
        assert_eq!(Interval::ZERO.to_string(), "00:00:00");
        assert_eq!(Interval::expect_from((0, 0, -1, 2, 3, 0)).to_string(), "-1 days +02:03:00");
        assert_eq!(Interval::expect_from((0, 0, 0, -4, -5, 0)).to_string(), "-04:05:00");
    }

    #[test]
    fn test_every_style_round_trips() {
        let value = Interval::expect_from((1, 2, 3, 4, 5, 6.789));
        for style in Interval::STYLES {
            let text = value.to_string_with(*style).unwrap();
            assert_eq!(Interval::expect_from(text.as_str()), value, "{} via {}", text, style);
        }

        let negative = Interval::expect_from((-1, -2, -3, -4, -5, -6.5));
        for style in Interval::STYLES {
            let text = negative.to_string_with(*style).unwrap();
            assert_eq!(Interval::expect_from(text.as_str()), negative, "{} via {}", text, style);
        }
    }

    #[test]
    fn test_styles() {
        let value = Interval::expect_from((1, 2, 3, 4, 5, 6.789));
        assert_eq!(
            value.to_string_style("PostgreSQL").unwrap(),
            "@ 1 year 2 mons 3 days 4 hours 5 mins 6.789 secs"
        );
        assert_eq!(value.to_string_style("ISO").unwrap(), "P1Y2M3DT4H5M6.789S");
        assert_eq!(value.to_string_style("ISO-Duration-Basic").unwrap(), "P00010203T040506.789");
        assert_eq!(value.to_string_style("ISO-Duration-Extended").unwrap(), "P0001-02-03T04:05:06.789");
        assert_eq!(value.to_string_style("SQL").unwrap(), "+1-2 +3 +4:05:06.789");

        let day = Interval::expect_from("@ 1 day ago");
        assert_eq!(day.days(), -1);
        assert_eq!(day.to_string_style("PostgreSQL").unwrap(), "@ 1 day ago");
        assert_eq!(day.to_string_style("SQL").unwrap(), "-1 0:00:00");
        assert_eq!(day.to_string_style("ISO-Duration-Short").unwrap(), "P-1D");

        assert_eq!(Interval::ZERO.to_string_style("PostgreSQL").unwrap(), "@ 0");
        assert_eq!(Interval::ZERO.to_string_style("SQL").unwrap(), "0");
        assert_eq!(Interval::ZERO.to_string_style("ISO-Duration-Short").unwrap(), "PT0S");
        assert_eq!(Interval::ZERO.to_string_style("ISO").unwrap(), "P0Y0M0DT0H0M0S");
    }

    #[test]
    fn test_fixed_width_rejects_mixed_signs() {
        let mixed = Interval::expect_from("-1 days +02:03:00");
        assert_eq!(
            mixed.to_string_style("ISO-Duration-Basic").unwrap_err().code(),
            "invalid_string"
        );
        assert_eq!(mixed.to_string_style("SQL").unwrap(), "+0-0 -1 +2:03:00");
        assert!(mixed.to_string_style("POSIX").is_err());
    }

    #[test]
    fn test_normalization() {
        let value = Interval::expect_from("14 months 90 minutes");
        assert_eq!((value.years(), value.months()), (1, 2));
        assert_eq!((value.hours(), value.minutes()), (1, 30));

        let value = Interval::expect_from("1.5 years");
        assert_eq!((value.years(), value.months(), value.days()), (1, 6, 0));

        let value = Interval::expect_from("1.5 months");
        assert_eq!((value.months(), value.days()), (1, 15));

        let value = Interval::expect_from("P2W");
        assert_eq!(value.days(), 14);
    }

    #[test]
    fn test_equality_is_field_wise() {
        let value = Interval::expect_from("1 day");
        assert!(value.equals("P1D"));
        assert!(value.equals("@ 1 day"));
        assert!(!value.equals("24:00:00"));
    }

    #[test]
    fn test_number_and_positional_input() {
        let value = Interval::expect_from(90_061_000);
        assert_eq!(value.to_string(), "25:01:01");
        assert_eq!(value.to_number(), 90_061_000.0);

        let value = Interval::expect_from((0, 0, 0, 0, 0, 1, 500));
        assert_eq!(value.seconds(), 1.5);

        let err = Interval::safe_from((0, 1.5, 0, 0, 0, 0)).unwrap_err();
        assert_eq!(err.code(), "not_whole");

        let err = Interval::safe_from((0, 0, 0, 0, 0)).unwrap_err();
        assert_eq!(err.code(), "too_small");
    }

    #[test]
    fn test_object_input_and_json() {
        let value = Interval::expect_from(json!({ "days": 3, "hours": 4 }));
        assert_eq!(value.to_string(), "3 days 04:00:00");
        assert_eq!(
            value.to_json(),
            json!({ "years": 0, "months": 0, "days": 3, "hours": 4, "minutes": 0, "seconds": 0.0 })
        );
        assert_eq!(Interval::expect_from(value.to_json()), value);

        let err = Interval::safe_from(json!({ "weeks": 1 })).unwrap_err();
        assert_eq!(err.code(), "unrecognized_keys");
    }

    #[test]
    fn test_setter_revalidates() {
        let mut value = Interval::expect_from("1 day");
        value.set("hours", 5).unwrap();
        assert_eq!(value.to_string(), "1 day 05:00:00");
        assert!(value.set("hours", 1.5).is_err());
        assert_eq!(value.to_string(), "1 day 05:00:00");
    }
}
