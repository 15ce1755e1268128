//! Integration tests for driver value decoding and encoding
//!
//! Exercises the `PgTyped` coordinator end to end: type name resolution,
//! aliases, row decoding and rendering under each configured server style.

use chrono::NaiveDate;
use pgtyped::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn server(date_style: DateStyle, interval_style: IntervalStyle) -> PgTyped {
    PgTyped::new(CodecConfig::new(date_style, interval_style, 63))
}

#[test]
fn test_decode_every_family() {
    let pg = PgTyped::default();

    let cases = [
        ("boolean", "yes", "t"),
        ("smallint", "-32768", "-32768"),
        ("double precision", "1e300", "1e+300"),
        ("numeric(10,2)", "12.50", "12.50"),
        ("money", "$1,234.56", "$1,234.56"),
        ("character(4)", "ab", "ab  "),
        ("date", "2004-10-19", "2004-10-19"),
        ("timestamp with time zone", "2004-10-19 10:23:54+02", "2004-10-19T10:23:54+02:00"),
        ("int4range", "[1,5]", "[1,6)"),
        ("int4multirange", "{[1,3),[2,5)}", "{[1,5)}"),
        ("box", "(0,0),(2,3)", "(2,3),(0,0)"),
        ("path", "[(1,2),(3,4)]", "[(1,2),(3,4)]"),
    ];
    for (type_name, text, expected) in cases {
        let value = pg.decode(type_name, Some(text)).unwrap();
        assert_eq!(value.value().as_deref(), Some(expected), "{} '{}'", type_name, text);
    }
}

#[test]
fn test_encode_follows_server_styles() {
    let value = PgValue::from(Timestamp::expect_from(NaiveDate::from_ymd_opt(2004, 10, 19)
        .and_then(|d| d.and_hms_opt(10, 23, 54))
        .unwrap()));

    assert_eq!(
        server(DateStyle::Iso, IntervalStyle::Postgres).encode(&value).as_deref(),
        Some("2004-10-19T10:23:54")
    );
    assert_eq!(
        server(DateStyle::German, IntervalStyle::Postgres).encode(&value).as_deref(),
        Some("19.10.2004 10:23:54")
    );

    let interval = PgValue::from(Interval::expect_from("1 year 2 mons 3 days 04:05:06"));
    assert_eq!(
        server(DateStyle::Iso, IntervalStyle::Postgres).encode(&interval).as_deref(),
        Some("1 year 2 mons 3 days 04:05:06")
    );
    assert_eq!(
        server(DateStyle::Iso, IntervalStyle::IsoDuration).encode(&interval).as_deref(),
        Some("P1Y2M3DT4H5M6S")
    );
}

#[test]
fn test_encoded_text_decodes_to_the_same_value() {
    let styles = [
        (DateStyle::Iso, IntervalStyle::Postgres),
        (DateStyle::Postgres, IntervalStyle::PostgresVerbose),
        (DateStyle::Sql, IntervalStyle::SqlStandard),
        (DateStyle::Iso, IntervalStyle::IsoDuration),
    ];
    let originals = [
        ("date", "2004-10-19"),
        ("timestamp", "2004-10-19 10:23:54"),
        ("interval", "3 days 04:05:06"),
    ];

    for (date_style, interval_style) in styles {
        let pg = server(date_style, interval_style);
        for (type_name, text) in originals {
            let value = pg.decode(type_name, Some(text)).unwrap();
            let encoded = pg.encode(&value).unwrap();
            assert_eq!(
                pg.decode(type_name, Some(&encoded)).unwrap(),
                value,
                "{} via {} / {}",
                encoded,
                date_style,
                interval_style
            );
        }
    }
}

#[test]
fn test_aliases_and_records() {
    let mut pg = PgTyped::default();
    pg.register_type("email", PgType::Text).unwrap();
    pg.register_type("during", PgType::TstzRange).unwrap();

    let id = uuid::Uuid::new_v4().to_string();
    let record = pg
        .decode_record(
            &[Some(id.as_str()), Some("ada@example.com"), Some(r#"["2010-01-01 14:30:00+00","2010-01-01 15:30:00+00")"#), None],
            &[("id", "uuid"), ("email", "email"), ("booked", "during"), ("note", "text")],
        )
        .unwrap();

    assert_eq!(record["id"].value(), Some(id));
    assert_eq!(record["email"].as_ref::<Text>().map(Text::as_str), Some("ada@example.com"));
    let booked = record["booked"].as_ref::<TsTzRange>().unwrap();
    assert!(booked.contains(&TimestampTZ::expect_from("2010-01-01 15:00:00Z")));
    assert!(record["note"].is_null());

    let err = pg.decode_record(&[Some("1")], &[("id", "hstore")]).unwrap_err();
    assert!(matches!(err, PgTypedError::Mapping(MappingError::UnknownType(_))));
}

#[test]
fn test_failures_carry_codec_issues() {
    let pg = PgTyped::default();

    match pg.decode("circle", Some("<(0,0),-3>")).unwrap_err() {
        PgTypedError::Mapping(MappingError::Codec(err)) => {
            assert_eq!(err.codec, "Circle");
            assert_eq!(err.message(), "radius must be greater than or equal to 0, received -3");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = pg.decode("name", Some(&"x".repeat(64))).unwrap_err();
    assert!(err.to_string().contains("Name"), "{}", err);
}

#[test]
fn test_values_serialize_to_accepted_json() {
    let pg = PgTyped::default();
    let value = pg.decode("lseg", Some("[(0,0),(3,4)]")).unwrap();
    let json = serde_json::to_value(&value).unwrap();

    assert_eq!(json, json!({ "a": { "x": 0.0, "y": 0.0 }, "b": { "x": 3.0, "y": 4.0 } }));
    assert_eq!(PgValue::from(LineSegment::expect_from(json)), value);
}
