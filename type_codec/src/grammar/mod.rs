//! Grammar library
//!
//! A grammar is an ordered list of rules, each a compiled pattern paired with a
//! builder that turns its named captures into parts. Rules are tried in list
//! order and the first match wins.
//!
//! Exclusivity contract: no well-formed input may match more than one rule of
//! the same grammar. Rule order is therefore a tie-break that never fires; the
//! `test_rules_are_mutually_exclusive` tests hold every grammar to it.

pub mod patterns;
pub mod timezones;

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::debug_log;
use crate::issue::{Issue, SizeKind};

type Builder<T> = fn(&Captures<'_>) -> Result<T, Issue>;

/// One pattern and the builder applied to its captures
pub struct Rule<T> {
    name: &'static str,
    regex: Regex,
    build: Builder<T>,
}

/// Ordered rule list; see the module docs for the exclusivity contract
pub struct Grammar<T> {
    expected: &'static str,
    rules: Vec<Rule<T>>,
}

impl<T> Grammar<T> {
    fn new(expected: &'static str) -> Self {
        Self {
            expected,
            rules: Vec::new(),
        }
    }

    fn rule(mut self, name: &'static str, pattern: String, build: Builder<T>) -> Self {
        let regex = Regex::new(&pattern).expect("grammar pattern compiles");
        self.rules.push(Rule { name, regex, build });
        self
    }

    /// Match `input` against the rules in priority order
    pub fn parse(&self, input: &str) -> Result<T, Issue> {
        let text = input.trim();
        for rule in &self.rules {
            if let Some(caps) = rule.regex.captures(text) {
                debug_log!("{} grammar matched rule '{}'", self.expected, rule.name);
                return (rule.build)(&caps);
            }
        }
        Err(Issue::invalid_string(self.expected, input))
    }

    /// Names of every rule whose pattern matches `input`
    pub fn matching_rules(&self, input: &str) -> Vec<&'static str> {
        let text = input.trim();
        self.rules
            .iter()
            .filter(|rule| rule.regex.is_match(text))
            .map(|rule| rule.name)
            .collect()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }
}

/// Calendar fields captured from text, not yet range-checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateParts {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

/// Clock fields captured from text with any meridiem already applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeParts {
    pub hour: i64,
    pub minute: i64,
    pub second: f64,
}

/// Output of the date/time grammar
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeParts {
    pub date: Option<DateParts>,
    pub time: Option<TimeParts>,
    /// Raw zone token: a numeric offset such as `+02:00` or a name such as `EST`
    pub zone: Option<String>,
}

/// Output of the interval grammar; fields may be fractional or negative
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntervalParts {
    pub years: f64,
    pub months: f64,
    pub weeks: f64,
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl IntervalParts {
    fn negate(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }
}

/// Date/time grammar shared by every temporal codec
pub static DATE_TIME: LazyLock<Grammar<DateTimeParts>> = LazyLock::new(|| {
    Grammar::new("date/time")
        .rule("postgres", patterns::postgres(), build_date_time)
        .rule("verbose", patterns::verbose(), build_date_time)
        .rule("iso_date_time", patterns::iso_date_time(), build_date_time)
        .rule("iso_date", patterns::iso_date(), build_date_time)
        .rule("iso_time", patterns::iso_time(), build_date_time)
        .rule("posix_time", patterns::posix_time(), build_date_time)
        .rule("sql_date_time", patterns::sql_date_time(), build_date_time)
        .rule("german_date_time", patterns::german_date_time(), build_date_time)
});

/// Interval grammar: unit syntax and the four duration grammars
pub static INTERVAL: LazyLock<Grammar<IntervalParts>> = LazyLock::new(|| {
    Grammar::new("interval")
        .rule("postgres", patterns::interval_postgres(), build_interval_units)
        .rule("sql", patterns::interval_sql(), build_interval_sql)
        .rule("iso_designator", patterns::interval_designator(), build_interval_designator)
        .rule("iso_basic", patterns::interval_basic(), build_interval_fixed)
        .rule("iso_extended", patterns::interval_extended(), build_interval_fixed)
});

static INTERVAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&patterns::interval_token()).expect("interval token pattern compiles"));

/// Month number for an English month name or abbreviation
pub fn month_from_name(name: &str) -> Option<i64> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    MONTHS.iter().position(|m| *m == prefix).map(|i| i as i64 + 1)
}

fn int(caps: &Captures<'_>, name: &str) -> Result<Option<i64>, Issue> {
    match caps.name(name) {
        Some(m) => m
            .as_str()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Issue::invalid_string("integer", m.as_str())),
        None => Ok(None),
    }
}

fn float(caps: &Captures<'_>, name: &str) -> Result<Option<f64>, Issue> {
    match caps.name(name) {
        Some(m) => m
            .as_str()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Issue::invalid_string("number", m.as_str())),
        None => Ok(None),
    }
}

fn build_date_time(caps: &Captures<'_>) -> Result<DateTimeParts, Issue> {
    let month = match caps.name("month_name") {
        Some(m) => month_from_name(m.as_str()),
        None => int(caps, "month")?,
    };
    let date = match (int(caps, "year")?, month, int(caps, "day")?) {
        (Some(year), Some(month), Some(day)) => Some(DateParts { year, month, day }),
        _ => None,
    };

    let time = match (int(caps, "hour")?, int(caps, "minute")?) {
        (Some(hour), Some(minute)) => {
            let second = float(caps, "second")?.unwrap_or(0.0);
            let hour = match caps.name("meridiem") {
                Some(m) => apply_meridiem(hour, m.as_str())?,
                None => hour,
            };
            Some(TimeParts { hour, minute, second })
        }
        _ => None,
    };

    let zone = caps
        .name("tz_offset")
        .or_else(|| caps.name("tz_name"))
        .map(|m| m.as_str().to_string());

    Ok(DateTimeParts { date, time, zone })
}

/// Convert a 12-hour clock reading to 24-hour
fn apply_meridiem(hour: i64, meridiem: &str) -> Result<i64, Issue> {
    if hour > 12 {
        return Err(Issue::too_big(SizeKind::Number, Some("hour"), 12i64, true, hour));
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    Ok(match (pm, hour) {
        (false, 12) => 0,
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, h) => h,
    })
}

/// `[+-]H:M[:S]` as signed hours, minutes, seconds
fn clock(text: &str) -> Result<(f64, f64, f64), Issue> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.trim_start_matches('+')),
    };
    let mut fields = body.split(':').map(|f| {
        f.parse::<f64>()
            .map_err(|_| Issue::invalid_string("interval time", text))
    });
    let hours = fields.next().transpose()?.unwrap_or(0.0);
    let minutes = fields.next().transpose()?.unwrap_or(0.0);
    let seconds = fields.next().transpose()?.unwrap_or(0.0);
    Ok((sign * hours, sign * minutes, sign * seconds))
}

fn build_interval_units(caps: &Captures<'_>) -> Result<IntervalParts, Issue> {
    let text = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let units_end = caps.name("time").map(|m| m.start()).unwrap_or(text.len());
    let mut parts = IntervalParts::default();

    for token in INTERVAL_TOKEN.captures_iter(&text[..units_end]) {
        let value = float(&token, "value")?.unwrap_or(0.0);
        let unit = token
            .name("unit")
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        match unit.as_str() {
            "millennium" | "millenniums" | "millennia" => parts.years += value * 1000.0,
            "century" | "centuries" => parts.years += value * 100.0,
            "decade" | "decades" => parts.years += value * 10.0,
            "year" | "years" | "yr" | "yrs" | "y" => parts.years += value,
            "month" | "months" | "mon" | "mons" => parts.months += value,
            "week" | "weeks" | "w" => parts.weeks += value,
            "day" | "days" | "d" => parts.days += value,
            "hour" | "hours" | "hr" | "hrs" | "h" => parts.hours += value,
            "minute" | "minutes" | "min" | "mins" | "m" => parts.minutes += value,
            "second" | "seconds" | "sec" | "secs" | "s" => parts.seconds += value,
            "millisecond" | "milliseconds" | "msec" | "msecs" | "ms" => parts.seconds += value / 1e3,
            _ => parts.seconds += value / 1e6,
        }
    }

    if let Some(time) = caps.name("time") {
        let (hours, minutes, seconds) = clock(time.as_str())?;
        parts.hours += hours;
        parts.minutes += minutes;
        parts.seconds += seconds;
    }

    if caps.name("ago").is_some() {
        parts = parts.negate();
    }
    Ok(parts)
}

fn build_interval_sql(caps: &Captures<'_>) -> Result<IntervalParts, Issue> {
    let has_year_month = caps.name("years").is_some();
    let has_time = caps.name("hours").is_some();
    let days = float(caps, "days")?;

    if !has_year_month && !has_time {
        // A bare number is a count of seconds
        return match days {
            Some(seconds) => Ok(IntervalParts {
                seconds,
                ..IntervalParts::default()
            }),
            None => Err(Issue::invalid_string("interval", caps.get(0).map(|m| m.as_str()).unwrap_or_default())),
        };
    }

    // A leading minus carries over to later fields that have no sign of their own
    let ym_sign = caps.name("ym_sign").map(|m| m.as_str());
    let days_sign = caps
        .name("days")
        .and_then(|m| m.as_str().get(..1))
        .filter(|c| *c == "+" || *c == "-");
    let t_sign = caps.name("t_sign").map(|m| m.as_str());
    let inherited = match ym_sign.or(days_sign).or(t_sign) {
        Some("-") => -1.0,
        _ => 1.0,
    };
    let sign_of = |explicit: Option<&str>| match explicit {
        Some("-") => -1.0,
        Some(_) => 1.0,
        None => inherited,
    };
    let ym = sign_of(ym_sign);
    let t = sign_of(t_sign);
    let days = match (days, days_sign) {
        (Some(value), Some(_)) => value,
        (Some(value), None) => inherited * value,
        (None, _) => 0.0,
    };

    Ok(IntervalParts {
        years: ym * float(caps, "years")?.unwrap_or(0.0),
        months: ym * float(caps, "months")?.unwrap_or(0.0),
        weeks: 0.0,
        days,
        hours: t * float(caps, "hours")?.unwrap_or(0.0),
        minutes: t * float(caps, "minutes")?.unwrap_or(0.0),
        seconds: t * float(caps, "seconds")?.unwrap_or(0.0),
    })
}

fn build_interval_designator(caps: &Captures<'_>) -> Result<IntervalParts, Issue> {
    const FIELDS: [&str; 7] = ["years", "months", "weeks", "days", "hours", "minutes", "seconds"];
    if FIELDS.iter().all(|f| caps.name(f).is_none()) {
        return Err(Issue::invalid_string(
            "ISO 8601 duration with at least one field",
            caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
        ));
    }
    Ok(IntervalParts {
        years: float(caps, "years")?.unwrap_or(0.0),
        months: float(caps, "months")?.unwrap_or(0.0),
        weeks: float(caps, "weeks")?.unwrap_or(0.0),
        days: float(caps, "days")?.unwrap_or(0.0),
        hours: float(caps, "hours")?.unwrap_or(0.0),
        minutes: float(caps, "minutes")?.unwrap_or(0.0),
        seconds: float(caps, "seconds")?.unwrap_or(0.0),
    })
}

fn build_interval_fixed(caps: &Captures<'_>) -> Result<IntervalParts, Issue> {
    let parts = IntervalParts {
        years: float(caps, "years")?.unwrap_or(0.0),
        months: float(caps, "months")?.unwrap_or(0.0),
        weeks: 0.0,
        days: float(caps, "days")?.unwrap_or(0.0),
        hours: float(caps, "hours")?.unwrap_or(0.0),
        minutes: float(caps, "minutes")?.unwrap_or(0.0),
        seconds: float(caps, "seconds")?.unwrap_or(0.0),
    };
    Ok(if caps.name("neg").is_some() { parts.negate() } else { parts })
}

#[cfg(test)]
mod tests;
