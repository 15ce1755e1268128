//! Serialization utilities
//!
//! This module renders values as driver text in the server's configured
//! output style, and decodes whole rows of driver text.

use config::{CodecConfig, DateStyle, IntervalStyle};
use std::collections::HashMap;
use type_codec::{CodecError, PgCodec, Style};

use crate::errors::MappingError;
use crate::types::PgType;
use crate::value::PgValue;
use crate::{debug_log, trace_log};

/// Decoded row keyed by column name
pub type Record = HashMap<String, PgValue>;

/// Render style for date and timestamp values; `None` keeps the default ISO form
pub fn date_style(style: DateStyle) -> Option<Style> {
    match style {
        DateStyle::Iso => None,
        DateStyle::Postgres => Some(Style::PostgreSql),
        DateStyle::Sql => Some(Style::Sql),
        DateStyle::German => Some(Style::German),
    }
}

pub fn interval_style(style: IntervalStyle) -> Style {
    match style {
        IntervalStyle::Postgres => Style::PostgreSqlShort,
        IntervalStyle::PostgresVerbose => Style::PostgreSql,
        IntervalStyle::SqlStandard => Style::Sql,
        IntervalStyle::IsoDuration => Style::IsoDurationShort,
    }
}

fn styled<T: PgCodec>(value: &T, style: Option<Style>, render: impl Fn(&T, Style) -> Result<String, CodecError>) -> String {
    match style.map(|style| render(value, style)) {
        Some(Ok(text)) => text,
        Some(Err(_err)) => {
            trace_log!("{} has no {:?} form, sending default text: {}", T::TYPE_NAME, style, _err);
            value.value()
        }
        None => value.value(),
    }
}

impl PgValue {
    /// Driver text in the configured server style; `None` for SQL NULL
    pub fn to_driver(&self, config: &CodecConfig) -> Option<String> {
        let dates = date_style(config.date_style);
        let text = match self {
            PgValue::Null => return None,
            PgValue::Date(v) => styled(v, dates, |v, s| v.to_string_with(s)),
            PgValue::Timestamp(v) => styled(v, dates, |v, s| v.to_string_with(s)),
            PgValue::TimestampTZ(v) => styled(v, dates, |v, s| v.to_string_with(s)),
            PgValue::Interval(v) => styled(v, Some(interval_style(config.interval_style)), |v, s| {
                v.to_string_with(s)
            }),
            other => return other.value(),
        };
        Some(text)
    }
}

/// Decode one row of driver text against its column schema
pub fn decode_record(row: &[Option<&str>], schema: &[(&str, PgType)]) -> Result<Record, MappingError> {
    decode_record_with(row, schema, &CodecConfig::default())
}

pub fn decode_record_with(
    row: &[Option<&str>],
    schema: &[(&str, PgType)],
    config: &CodecConfig,
) -> Result<Record, MappingError> {
    if row.len() != schema.len() {
        return Err(MappingError::mismatch(
            format!("{} columns", schema.len()),
            format!("{} columns", row.len()),
        ));
    }
    debug_log!("Decoding record of {} columns", row.len());

    let mut record = HashMap::with_capacity(row.len());
    for (text, (column, ty)) in row.iter().zip(schema) {
        let value = PgValue::from_driver_with(*ty, None, *text, config)?;
        record.insert(column.to_string(), value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use type_codec::prelude::*;

    fn config(date_style: DateStyle, interval_style: IntervalStyle) -> CodecConfig {
        CodecConfig::new(date_style, interval_style, 63)
    }

    #[test]
    fn test_date_styles() {
        let date = PgValue::from(Date::expect_from("2004-10-19"));
        let stamp = PgValue::from(Timestamp::expect_from("2004-10-19 10:23:54"));

        let iso = config(DateStyle::Iso, IntervalStyle::Postgres);
        assert_eq!(date.to_driver(&iso).as_deref(), Some("2004-10-19"));
        assert_eq!(stamp.to_driver(&iso).as_deref(), Some("2004-10-19T10:23:54"));

        let sql = config(DateStyle::Sql, IntervalStyle::Postgres);
        assert_eq!(date.to_driver(&sql).as_deref(), Some("10/19/2004"));
        assert_eq!(stamp.to_driver(&sql).as_deref(), Some("10/19/2004 10:23:54"));

        let german = config(DateStyle::German, IntervalStyle::Postgres);
        assert_eq!(date.to_driver(&german).as_deref(), Some("19.10.2004"));
    }

    #[test]
    fn test_time_ignores_date_style() {
        let time = PgValue::from(Time::expect_from("04:05:06"));
        let german = config(DateStyle::German, IntervalStyle::Postgres);
        assert_eq!(time.to_driver(&german).as_deref(), Some("04:05:06"));
    }

    #[test]
    fn test_interval_styles() {
        let interval = PgValue::from(Interval::expect_from("P1Y2M3DT4H5M6.789S"));
        let render = |style| interval.to_driver(&config(DateStyle::Iso, style)).unwrap();

        assert_eq!(render(IntervalStyle::Postgres), "1 year 2 mons 3 days 04:05:06.789");
        assert_eq!(render(IntervalStyle::IsoDuration), "P1Y2M3DT4H5M6.789S");
        assert!(render(IntervalStyle::PostgresVerbose).starts_with("@ 1 year 2 mons 3 days"));
    }

    #[test]
    fn test_null_and_plain_values() {
        let config = CodecConfig::default();
        assert_eq!(PgValue::Null.to_driver(&config), None);
        assert_eq!(
            PgValue::from(Int4Range::expect_from("[1,5]")).to_driver(&config).as_deref(),
            Some("[1,6)")
        );
    }

    #[test]
    fn test_decode_record() {
        let schema = [("id", PgType::Int8), ("name", PgType::Text), ("deleted_at", PgType::TimestampTz)];
        let record = decode_record(&[Some("7"), Some("widget"), None], &schema).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record["id"].value().as_deref(), Some("7"));
        assert!(record["name"].is::<Text>());
        assert!(record["deleted_at"].is_null());

        let err = decode_record(&[Some("7")], &schema).unwrap_err();
        assert_eq!(err, MappingError::mismatch("3 columns", "1 columns"));

        let err = decode_record(&[Some("x"), None, None], &schema).unwrap_err();
        assert!(matches!(err, MappingError::Codec(_)));
    }
}
