//! Named output styles and the shared field renderers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::CodecError;
use crate::issue::Issue;

use super::calendar::MICROS_PER_SECOND;

/// Output style accepted by `to_string_style`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Style {
    #[serde(rename = "ISO")]
    Iso,
    #[serde(rename = "ISO-Date")]
    IsoDate,
    #[serde(rename = "ISO-Time")]
    IsoTime,
    #[serde(rename = "ISO-Duration")]
    IsoDuration,
    #[serde(rename = "ISO-Duration-Short")]
    IsoDurationShort,
    #[serde(rename = "ISO-Duration-Basic")]
    IsoDurationBasic,
    #[serde(rename = "ISO-Duration-Extended")]
    IsoDurationExtended,
    #[serde(rename = "POSIX")]
    Posix,
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "PostgreSQL-Short")]
    PostgreSqlShort,
    #[serde(rename = "SQL")]
    Sql,
    #[serde(rename = "German")]
    German,
}

impl Style {
    pub const ALL: [Style; 12] = [
        Style::Iso,
        Style::IsoDate,
        Style::IsoTime,
        Style::IsoDuration,
        Style::IsoDurationShort,
        Style::IsoDurationBasic,
        Style::IsoDurationExtended,
        Style::Posix,
        Style::PostgreSql,
        Style::PostgreSqlShort,
        Style::Sql,
        Style::German,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Style::Iso => "ISO",
            Style::IsoDate => "ISO-Date",
            Style::IsoTime => "ISO-Time",
            Style::IsoDuration => "ISO-Duration",
            Style::IsoDurationShort => "ISO-Duration-Short",
            Style::IsoDurationBasic => "ISO-Duration-Basic",
            Style::IsoDurationExtended => "ISO-Duration-Extended",
            Style::Posix => "POSIX",
            Style::PostgreSql => "PostgreSQL",
            Style::PostgreSqlShort => "PostgreSQL-Short",
            Style::Sql => "SQL",
            Style::German => "German",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = Issue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Issue::invalid_string("style name", s))
    }
}

/// Error for a style the type cannot render
pub fn unsupported(codec: &'static str, style: Style, supported: &[Style]) -> CodecError {
    let names: Vec<&str> = supported.iter().map(|s| s.name()).collect();
    CodecError::new(
        codec,
        Issue::invalid_string(format!("one of {}", names.join(", ")), style.name()),
    )
}

/// Resolve a style name for `codec`
pub fn resolve(codec: &'static str, name: &str) -> Result<Style, CodecError> {
    name.parse::<Style>().map_err(|issue| CodecError::new(codec, issue))
}

/// Round a second count to whole microseconds, staying below 60
pub fn round_second(second: f64) -> f64 {
    let micros = (second * 1e6).round().min(59_999_999.0);
    micros / 1e6
}

/// `ss[.ffffff]`, trailing zeros trimmed; `pad` keeps two integer digits
pub fn seconds(second: f64, pad: bool) -> String {
    let micros = (second.abs() * 1e6).round() as i64;
    let whole = micros / MICROS_PER_SECOND;
    let frac = micros % MICROS_PER_SECOND;
    let mut out = if pad {
        format!("{:02}", whole)
    } else {
        whole.to_string()
    };
    if frac > 0 {
        let digits = format!("{:06}", frac);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// `hh:mm:ss[.fff]`
pub fn clock_24(hour: u8, minute: u8, second: f64) -> String {
    format!("{:02}:{:02}:{}", hour, minute, seconds(second, true))
}

/// `hh:mm:ss[.fff] AM`
pub fn clock_12(hour: u8, minute: u8, second: f64) -> String {
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", clock_24(hour, minute, second), meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_round_trip() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>().unwrap(), style);
        }
        assert_eq!("iso-date".parse::<Style>().unwrap(), Style::IsoDate);
    }

    #[test]
    fn test_unknown_style() {
        let issue = "Klingon".parse::<Style>().unwrap_err();
        assert_eq!(issue.code(), "invalid_string");
    }

    #[test]
    fn test_seconds_rendering() {
        assert_eq!(seconds(54.678, true), "54.678");
        assert_eq!(seconds(5.0, true), "05");
        assert_eq!(seconds(6.789, false), "6.789");
        assert_eq!(seconds(0.000001, true), "00.000001");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(clock_12(0, 5, 0.0), "12:05:00 AM");
        assert_eq!(clock_12(12, 0, 0.0), "12:00:00 PM");
        assert_eq!(clock_12(22, 23, 54.678), "10:23:54.678 PM");
    }
}
