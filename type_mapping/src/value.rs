//! Runtime values
//!
//! [`PgValue`] is the tagged union over every codec in `type-codec`, used
//! where the column type is only known at runtime (driver rows, registries).

use config::CodecConfig;
use serde::Serialize;
use serde_json::Value;
use type_codec::prelude::*;

use crate::errors::MappingError;
use crate::types::PgType;
use crate::debug_log;

/// A codec type that has a [`PgValue`] variant
pub trait PgVariant: PgCodec {
    const PG_TYPE: PgType;

    fn from_value(value: &PgValue) -> Option<&Self>;
}

macro_rules! pg_values {
    ($($variant:ident($ty:ty) => $pg:ident),* $(,)?) => {
        /// PostgreSQL value of any supported type
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum PgValue {
            Null,
            $($variant($ty),)*
        }

        impl PgValue {
            /// Type of the held value; `None` for SQL NULL
            pub fn kind(&self) -> Option<PgType> {
                match self {
                    PgValue::Null => None,
                    $(PgValue::$variant(_) => Some(PgType::$pg),)*
                }
            }

            /// Text in the codec's default style; `None` for SQL NULL
            pub fn value(&self) -> Option<String> {
                match self {
                    PgValue::Null => None,
                    $(PgValue::$variant(v) => Some(v.value()),)*
                }
            }

            pub fn to_json(&self) -> Value {
                match self {
                    PgValue::Null => Value::Null,
                    $(PgValue::$variant(v) => v.to_json(),)*
                }
            }
        }

        $(
            impl PgVariant for $ty {
                const PG_TYPE: PgType = PgType::$pg;

                fn from_value(value: &PgValue) -> Option<&Self> {
                    match value {
                        PgValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for PgValue {
                fn from(value: $ty) -> Self {
                    PgValue::$variant(value)
                }
            }
        )*
    };
}

pg_values! {
    Boolean(Boolean) => Bool,
    Int2(Int2) => Int2,
    Int4(Int4) => Int4,
    Int8(Int8) => Int8,
    Oid(Oid) => Oid,
    Float4(Float4) => Float4,
    Float8(Float8) => Float8,
    Numeric(Numeric) => Numeric,
    Money(Money) => Money,
    Bit(Bit) => Bit,
    BitVarying(BitVarying) => VarBit,
    Character(Character) => BpChar,
    CharacterVarying(CharacterVarying) => VarChar,
    Name(Name) => Name,
    Text(Text) => Text,
    Uuid(Uuid) => Uuid,
    Date(Date) => Date,
    Time(Time) => Time,
    TimeTZ(TimeTZ) => TimeTz,
    Timestamp(Timestamp) => Timestamp,
    TimestampTZ(TimestampTZ) => TimestampTz,
    Interval(Interval) => Interval,
    Int4Range(Int4Range) => Int4Range,
    Int8Range(Int8Range) => Int8Range,
    NumRange(NumRange) => NumRange,
    DateRange(DateRange) => DateRange,
    TsRange(TsRange) => TsRange,
    TsTzRange(TsTzRange) => TstzRange,
    Int4MultiRange(Int4MultiRange) => Int4MultiRange,
    Int8MultiRange(Int8MultiRange) => Int8MultiRange,
    NumMultiRange(NumMultiRange) => NumMultiRange,
    DateMultiRange(DateMultiRange) => DateMultiRange,
    TsMultiRange(TsMultiRange) => TsMultiRange,
    TsTzMultiRange(TsTzMultiRange) => TstzMultiRange,
    Point(Point) => Point,
    Line(Line) => Line,
    LineSegment(LineSegment) => Lseg,
    Box(PgBox) => Box,
    Path(Path) => Path,
    Polygon(Polygon) => Polygon,
    Circle(Circle) => Circle,
}

impl PgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PgValue::Null)
    }

    pub fn is<T: PgVariant>(&self) -> bool {
        T::from_value(self).is_some()
    }

    pub fn as_ref<T: PgVariant>(&self) -> Option<&T> {
        T::from_value(self)
    }

    /// Like [`PgValue::as_ref`], naming both types on failure
    pub fn try_get<T: PgVariant>(&self) -> Result<&T, MappingError> {
        T::from_value(self).ok_or_else(|| {
            let received = self.kind().map(|ty| ty.name()).unwrap_or("null");
            MappingError::mismatch(T::PG_TYPE.name(), received)
        })
    }

    /// Decode driver text with the default configuration; `None` is SQL NULL
    pub fn from_driver(ty: PgType, text: Option<&str>) -> Result<PgValue, MappingError> {
        Self::from_driver_with(ty, None, text, &CodecConfig::default())
    }

    /// Decode driver text under a type modifier (`n` of `varchar(n)`, `bit(n)`)
    /// and the configured `name` length limit
    pub fn from_driver_with(
        ty: PgType,
        modifier: Option<usize>,
        text: Option<&str>,
        config: &CodecConfig,
    ) -> Result<PgValue, MappingError> {
        let Some(text) = text else {
            return Ok(PgValue::Null);
        };
        debug_log!("Decoding {} from driver text '{}'", ty, text);

        let value: PgValue = match ty {
            PgType::Bool => Boolean::safe_from(text)?.into(),
            PgType::Int2 => Int2::safe_from(text)?.into(),
            PgType::Int4 => Int4::safe_from(text)?.into(),
            PgType::Int8 => Int8::safe_from(text)?.into(),
            PgType::Oid => Oid::safe_from(text)?.into(),
            PgType::Float4 => Float4::safe_from(text)?.into(),
            PgType::Float8 => Float8::safe_from(text)?.into(),
            PgType::Numeric => Numeric::safe_from(text)?.into(),
            PgType::Money => Money::safe_from(text)?.into(),
            // A server sends bit(n) and char(n) at full width
            PgType::Bit => {
                let n = modifier.unwrap_or_else(|| text.trim().chars().count().max(1));
                Bit::set_n(n).safe_from(text)?.into()
            }
            PgType::VarBit => match modifier {
                Some(n) => BitVarying::set_n(n).safe_from(text)?.into(),
                None => BitVarying::safe_from(text)?.into(),
            },
            PgType::BpChar => {
                let n = modifier.unwrap_or_else(|| text.chars().count().max(1));
                Character::set_n(n).safe_from(text)?.into()
            }
            PgType::VarChar => match modifier {
                Some(n) => CharacterVarying::set_n(n).safe_from(text)?.into(),
                None => CharacterVarying::safe_from(text)?.into(),
            },
            PgType::Name => Name::with_max_length(text, config.name_max_length)?.into(),
            PgType::Text => Text::safe_from(text)?.into(),
            PgType::Uuid => Uuid::safe_from(text)?.into(),
            PgType::Date => Date::safe_from(text)?.into(),
            PgType::Time => Time::safe_from(text)?.into(),
            PgType::TimeTz => TimeTZ::safe_from(text)?.into(),
            PgType::Timestamp => Timestamp::safe_from(text)?.into(),
            PgType::TimestampTz => TimestampTZ::safe_from(text)?.into(),
            PgType::Interval => Interval::safe_from(text)?.into(),
            PgType::Int4Range => Int4Range::safe_from(text)?.into(),
            PgType::Int8Range => Int8Range::safe_from(text)?.into(),
            PgType::NumRange => NumRange::safe_from(text)?.into(),
            PgType::DateRange => DateRange::safe_from(text)?.into(),
            PgType::TsRange => TsRange::safe_from(text)?.into(),
            PgType::TstzRange => TsTzRange::safe_from(text)?.into(),
            PgType::Int4MultiRange => Int4MultiRange::safe_from(text)?.into(),
            PgType::Int8MultiRange => Int8MultiRange::safe_from(text)?.into(),
            PgType::NumMultiRange => NumMultiRange::safe_from(text)?.into(),
            PgType::DateMultiRange => DateMultiRange::safe_from(text)?.into(),
            PgType::TsMultiRange => TsMultiRange::safe_from(text)?.into(),
            PgType::TstzMultiRange => TsTzMultiRange::safe_from(text)?.into(),
            PgType::Point => Point::safe_from(text)?.into(),
            PgType::Line => Line::safe_from(text)?.into(),
            PgType::Lseg => LineSegment::safe_from(text)?.into(),
            PgType::Box => PgBox::safe_from(text)?.into(),
            PgType::Path => Path::safe_from(text)?.into(),
            PgType::Polygon => Polygon::safe_from(text)?.into(),
            PgType::Circle => Circle::safe_from(text)?.into(),
        };
        Ok(value)
    }
}
