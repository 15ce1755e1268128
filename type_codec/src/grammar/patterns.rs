//! Regular expression sources for the date/time and interval grammars
//!
//! Fragments are assembled once into full patterns by [`super::DATE_TIME`]
//! and [`super::INTERVAL`]. Every pattern is anchored and case-insensitive.

/// Month names and their abbreviations
pub const MONTH_NAMES: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Day names and their abbreviations
pub const DAY_NAMES: &str = r"mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?";

/// `hh:mm[:ss[.fff]]`
pub const TIME: &str = r"(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2}(?:\.\d+)?))?";

const OFFSET: &str = r"[+-]\d{1,2}(?::?\d{2})?";

/// Zone after a year or a meridiem: names must be separated by whitespace
pub fn zone_spaced() -> String {
    format!(r"(?:\s*(?P<tz_offset>{OFFSET})|\s+(?P<tz_name>[a-z]{{1,5}}))?")
}

/// Zone directly after the seconds field, as in `10:23:54Z`
pub fn zone_attached() -> String {
    format!(r"(?:\s*(?P<tz_offset>{OFFSET})|\s*(?P<tz_name>[a-z]{{1,5}}))?")
}

/// Zone after a bare time. Two-letter names are excluded so `AM`/`PM` stay
/// with the POSIX time rule.
pub fn zone_time_only() -> String {
    format!(r"(?:\s*(?P<tz_offset>{OFFSET})|\s*(?P<tz_name>z|ut|[a-z]{{3,5}}))?")
}

/// `Tue Oct 19 10:23:54.678 2004 EST`, `Oct 19 2004`
pub fn postgres() -> String {
    format!(
        r"(?i)^(?:(?P<day_name>{DAY_NAMES})\.?\s+)?(?P<month_name>{MONTH_NAMES})\.?\s+(?P<day>\d{{1,2}})(?:\s+{TIME}(?:\s*(?P<meridiem>am|pm))?)?\s+(?P<year>\d{{4,6}}){}$",
        zone_spaced()
    )
}

/// `Tuesday, October 19, 2004 10:23:54.678 AM +02:00`
pub fn verbose() -> String {
    format!(
        r"(?i)^(?:(?P<day_name>{DAY_NAMES})\.?,\s*)?(?P<month_name>{MONTH_NAMES})\.?\s+(?P<day>\d{{1,2}}),\s*(?P<year>\d{{4,6}})(?:\s+{TIME}(?:\s*(?P<meridiem>am|pm))?)?{}$",
        zone_spaced()
    )
}

/// `2004-10-19 10:23:54.678+02:00`, `2004-10-19T10:23:54Z`
pub fn iso_date_time() -> String {
    format!(
        r"(?i)^(?P<year>\d{{4,6}})-(?P<month>\d{{1,2}})-(?P<day>\d{{1,2}})(?:t|\s+){TIME}{}$",
        zone_attached()
    )
}

/// `2004-10-19`
pub fn iso_date() -> String {
    r"(?i)^(?P<year>\d{4,6})-(?P<month>\d{1,2})-(?P<day>\d{1,2})$".to_string()
}

/// `10:23:54.678`, `T10:23:54+02:00`
pub fn iso_time() -> String {
    format!(r"(?i)^t?{TIME}{}$", zone_time_only())
}

/// `10:23:54.678 AM +02:00`
pub fn posix_time() -> String {
    format!(r"(?i)^{TIME}\s*(?P<meridiem>am|pm){}$", zone_spaced())
}

/// `10/19/2004 10:23:54.678 EST`, `10-19-2004`
pub fn sql_date_time() -> String {
    format!(
        r"(?i)^(?P<month>\d{{1,2}})[/-](?P<day>\d{{1,2}})[/-](?P<year>\d{{4,6}})(?:\s+{TIME})?{}$",
        zone_spaced()
    )
}

/// `19.10.2004 10:23:54.678 EST`
pub fn german_date_time() -> String {
    format!(
        r"(?i)^(?P<day>\d{{1,2}})\.(?P<month>\d{{1,2}})\.(?P<year>\d{{4,6}})(?:\s+{TIME})?{}$",
        zone_spaced()
    )
}

/// Interval unit names, longest spelling first within each unit
pub const INTERVAL_UNITS: &str = r"millenniums?|millennia|centuries|century|decades?|years?|yrs?|y|months?|mons?|weeks?|w|days?|d|hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s|milliseconds?|msecs?|ms|microseconds?|usecs?|us";

/// `1 year 2 mons 3 days 04:05:06.789`, `@ 1 day 2 hours ago`, `@ 0`
pub fn interval_postgres() -> String {
    format!(
        r"(?i)^(?:@\s*0|@?\s*(?:[+-]?\d+(?:\.\d+)?\s*(?:{INTERVAL_UNITS})\b\s*)+(?P<time>[+-]?\d+:\d{{1,2}}(?::\d{{1,2}}(?:\.\d+)?)?)?\s*(?P<ago>ago)?)$"
    )
}

/// One `<number> <unit>` token of the postgres interval syntax
pub fn interval_token() -> String {
    format!(r"(?i)(?P<value>[+-]?\d+(?:\.\d+)?)\s*(?P<unit>{INTERVAL_UNITS})\b")
}

/// `1-2 3 4:05:06.789`, `+1-2 -3 +4:05:06`, `4:05:06`
pub fn interval_sql() -> String {
    r"^(?:(?P<ym_sign>[+-])?(?P<years>\d+)-(?P<months>\d+))?(?:\s*(?P<days>[+-]?\d+)(?:\s+|$))?(?:\s*(?P<t_sign>[+-])?(?P<hours>\d+):(?P<minutes>\d{1,2})(?::(?P<seconds>\d{1,2}(?:\.\d+)?))?)?$".to_string()
}

/// `P1Y2M3DT4H5M6.789S`
pub fn interval_designator() -> String {
    r"(?i)^P(?:(?P<years>-?\d+(?:\.\d+)?)Y)?(?:(?P<months>-?\d+(?:\.\d+)?)M)?(?:(?P<weeks>-?\d+(?:\.\d+)?)W)?(?:(?P<days>-?\d+(?:\.\d+)?)D)?(?:T(?:(?P<hours>-?\d+(?:\.\d+)?)H)?(?:(?P<minutes>-?\d+(?:\.\d+)?)M)?(?:(?P<seconds>-?\d+(?:\.\d+)?)S)?)?$".to_string()
}

/// `P00010203T040506.789`
pub fn interval_basic() -> String {
    r"(?i)^(?P<neg>-)?P(?P<years>\d{4})(?P<months>\d{2})(?P<days>\d{2})T(?P<hours>\d{2})(?P<minutes>\d{2})(?P<seconds>\d{2}(?:\.\d+)?)$".to_string()
}

/// `P0001-02-03T04:05:06.789`
pub fn interval_extended() -> String {
    r"(?i)^(?P<neg>-)?P(?P<years>\d{4})-(?P<months>\d{2})-(?P<days>\d{2})T(?P<hours>\d{2}):(?P<minutes>\d{2}):(?P<seconds>\d{2}(?:\.\d+)?)$".to_string()
}
