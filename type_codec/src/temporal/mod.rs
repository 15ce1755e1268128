//! Offset and temporal codecs
//!
//! `Date`, `Time`, `TimeTZ`, `Timestamp`, `TimestampTZ` and `Interval`, all
//! parsed through the shared grammar library. The zone-aware types carry an
//! [`Offset`]; text without a zone token gets `+00:00`.

pub mod calendar;
pub mod date;
pub mod interval;
pub mod offset;
pub mod style;
pub mod time;
pub mod time_tz;
pub mod timestamp;
pub mod timestamp_tz;

pub use date::Date;
pub use interval::Interval;
pub use offset::{Direction, Offset};
pub use style::Style;
pub use time::Time;
pub use time_tz::TimeTZ;
pub use timestamp::Timestamp;
pub use timestamp_tz::TimestampTZ;

use crate::issue::Issue;

/// Zone token of a grammar match, or UTC when the text carries none
pub(crate) fn zone_or_utc(zone: Option<&str>) -> Result<Offset, Issue> {
    match zone {
        Some(token) => Offset::parse_token(token),
        None => Ok(Offset::UTC),
    }
}

/// Date/time rendering shared by `Timestamp` and `TimestampTZ`
pub(crate) fn render_date_time(date: &Date, time: &Time, zone: Option<&Offset>, style: Style) -> Option<String> {
    let attached = zone.map(|z| z.to_string()).unwrap_or_default();
    let spaced = zone.map(|z| format!(" {}", z)).unwrap_or_default();
    Some(match style {
        Style::Iso => format!("{}T{}{}", date.iso(), time.clock(), attached),
        Style::IsoDate => date.iso(),
        Style::IsoTime => format!("{}{}", time.clock(), attached),
        Style::Posix => {
            let weekday = calendar::short_name(date.weekday_name());
            let month = calendar::short_name(calendar::month_name(date.month()));
            format!(
                "{} {} {:02} {} {:04}{}",
                weekday,
                month,
                date.day(),
                time.clock(),
                date.year(),
                spaced
            )
        }
        Style::PostgreSql | Style::PostgreSqlShort => {
            format!("{} {}{}", date.render(style)?, time.clock_12(), spaced)
        }
        Style::Sql | Style::German => {
            format!("{} {}{}", date.render(style)?, time.clock(), spaced)
        }
        _ => return None,
    })
}

pub(crate) const DATE_TIME_STYLES: &[Style] = &[
    Style::Iso,
    Style::IsoDate,
    Style::IsoTime,
    Style::Posix,
    Style::PostgreSql,
    Style::PostgreSqlShort,
    Style::Sql,
    Style::German,
];
