use super::*;
use pretty_assertions::assert_eq;

const DATE_TIME_INPUTS: &[&str] = &[
    "Tue Oct 19 10:23:54.678 2004 EST",
    "Tue Oct 19 10:23:54.678 2004 +02:00",
    "Oct 19 2004",
    "Tue Oct 19 2004",
    "Tuesday, October 19, 2004 10:23:54.678 AM +02:00",
    "Tue, Oct 19, 2004 10:23:54.678 PM",
    "October 19, 2004",
    "2004-10-19 10:23:54.678+02:00",
    "2004-10-19T10:23:54Z",
    "2004-10-19 10:23:54 EST",
    "2004-10-19",
    "10:23:54.678",
    "T10:23:54+02:00",
    "10:23:54 UTC",
    "10:23:54.678 AM +02:00",
    "10:23 PM",
    "10/19/2004 10:23:54.678 EST",
    "10-19-2004",
    "19.10.2004 10:23:54.678 EST",
];

const INTERVAL_INPUTS: &[&str] = &[
    "1 year 2 mons 3 days 04:05:06.789",
    "-1 days +02:03:00",
    "@ 1 year 2 mons 3 days 4 hours 5 mins 6.789 secs",
    "@ 1 day ago",
    "@ 0",
    "1-2 3 4:05:06.789",
    "+1-2 -3 +4:05:06",
    "4:05:06",
    "0",
    "P1Y2M3DT4H5M6.789S",
    "PT0S",
    "P2W",
    "P00010203T040506",
    "-P00010203T040506.5",
    "P0001-02-03T04:05:06",
];

#[test]
fn test_date_time_rules_are_mutually_exclusive() {
    for input in DATE_TIME_INPUTS {
        let matched = DATE_TIME.matching_rules(input);
        assert_eq!(matched.len(), 1, "{} matched {:?}", input, matched);
    }
}

#[test]
fn test_interval_rules_are_mutually_exclusive() {
    for input in INTERVAL_INPUTS {
        let matched = INTERVAL.matching_rules(input);
        assert_eq!(matched.len(), 1, "{} matched {:?}", input, matched);
    }
}

#[test]
fn test_postgres_rule_fields() {
    let parts = DATE_TIME.parse("Tue Oct 19 10:23:54.678 2004 EST").unwrap();
    assert_eq!(
        parts.date,
        Some(DateParts {
            year: 2004,
            month: 10,
            day: 19
        })
    );
    assert_eq!(
        parts.time,
        Some(TimeParts {
            hour: 10,
            minute: 23,
            second: 54.678
        })
    );
    assert_eq!(parts.zone.as_deref(), Some("EST"));
}

#[test]
fn test_meridiem_conversion() {
    let parts = DATE_TIME.parse("12:05 AM").unwrap();
    assert_eq!(parts.time.unwrap().hour, 0);

    let parts = DATE_TIME.parse("Tuesday, October 19, 2004 01:00 PM").unwrap();
    assert_eq!(parts.time.unwrap().hour, 13);

    let err = DATE_TIME.parse("13:00 PM").unwrap_err();
    assert_eq!(err.code(), "too_big");
}

#[test]
fn test_zone_tokens() {
    let parts = DATE_TIME.parse("2004-10-19T10:23:54Z").unwrap();
    assert_eq!(parts.zone.as_deref(), Some("Z"));

    let parts = DATE_TIME.parse("2004-10-19 04:05:06.789-01:00").unwrap();
    assert_eq!(parts.zone.as_deref(), Some("-01:00"));

    let parts = DATE_TIME.parse("2004-10-19").unwrap();
    assert_eq!(parts.zone, None);
    assert_eq!(parts.time, None);
}

#[test]
fn test_unmatched_input_is_invalid_string() {
    let err = DATE_TIME.parse("not a date").unwrap_err();
    assert_eq!(err.code(), "invalid_string");
}

#[test]
fn test_interval_unit_syntax() {
    let parts = INTERVAL.parse("1 year 2 mons 3 days 04:05:06.789").unwrap();
    assert_eq!(parts.years, 1.0);
    assert_eq!(parts.months, 2.0);
    assert_eq!(parts.days, 3.0);
    assert_eq!(parts.hours, 4.0);
    assert_eq!(parts.minutes, 5.0);
    assert_eq!(parts.seconds, 6.789);

    let parts = INTERVAL.parse("@ 1 day 2 hours ago").unwrap();
    assert_eq!(parts.days, -1.0);
    assert_eq!(parts.hours, -2.0);

    let parts = INTERVAL.parse("-1 days +02:03:00").unwrap();
    assert_eq!(parts.days, -1.0);
    assert_eq!(parts.hours, 2.0);
    assert_eq!(parts.minutes, 3.0);
}

#[test]
fn test_interval_sql_syntax() {
    let parts = INTERVAL.parse("+1-2 -3 +4:05:06").unwrap();
    assert_eq!((parts.years, parts.months, parts.days), (1.0, 2.0, -3.0));
    assert_eq!((parts.hours, parts.minutes, parts.seconds), (4.0, 5.0, 6.0));

    let parts = INTERVAL.parse("-1-2").unwrap();
    assert_eq!((parts.years, parts.months), (-1.0, -2.0));

    let parts = INTERVAL.parse("-3 4:05:06").unwrap();
    assert_eq!((parts.days, parts.hours, parts.minutes), (-3.0, -4.0, -5.0));

    let parts = INTERVAL.parse("3").unwrap();
    assert_eq!(parts.seconds, 3.0);
    assert_eq!(parts.days, 0.0);
}

#[test]
fn test_interval_iso_variants() {
    let parts = INTERVAL.parse("P1Y2M3DT4H5M6.789S").unwrap();
    assert_eq!(parts.years, 1.0);
    assert_eq!(parts.seconds, 6.789);

    let parts = INTERVAL.parse("-P00010203T040506").unwrap();
    assert_eq!(parts.years, -1.0);
    assert_eq!(parts.seconds, -6.0);

    let parts = INTERVAL.parse("P0001-02-03T04:05:06").unwrap();
    assert_eq!(parts.days, 3.0);

    assert_eq!(INTERVAL.parse("P").unwrap_err().code(), "invalid_string");
    assert_eq!(INTERVAL.parse("").unwrap_err().code(), "invalid_string");
}

#[test]
fn test_month_names() {
    assert_eq!(month_from_name("October"), Some(10));
    assert_eq!(month_from_name("sept"), Some(9));
    assert_eq!(month_from_name("xyz"), None);
}
