//! PostgreSQL type catalogue
//!
//! Every type with a codec in `type-codec`, with its catalogue OID and
//! canonical name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PostgreSQL type OIDs
///
/// Reference: https://github.com/postgres/postgres/blob/master/src/include/catalog/pg_type.dat
pub mod oid {
    // Boolean
    pub const BOOL: u32 = 16;

    // Characters
    pub const NAME: u32 = 19;
    pub const TEXT: u32 = 25;
    pub const BPCHAR: u32 = 1042;
    pub const VARCHAR: u32 = 1043;

    // Integers
    pub const INT8: u32 = 20;
    pub const INT2: u32 = 21;
    pub const INT4: u32 = 23;
    pub const OID: u32 = 26;

    // Float, numeric and money
    pub const FLOAT4: u32 = 700;
    pub const FLOAT8: u32 = 701;
    pub const MONEY: u32 = 790;
    pub const NUMERIC: u32 = 1700;

    // Bit strings
    pub const BIT: u32 = 1560;
    pub const VARBIT: u32 = 1562;

    // UUID
    pub const UUID: u32 = 2950;

    // Date/Time
    pub const DATE: u32 = 1082;
    pub const TIME: u32 = 1083;
    pub const TIMESTAMP: u32 = 1114;
    pub const TIMESTAMPTZ: u32 = 1184;
    pub const INTERVAL: u32 = 1186;
    pub const TIMETZ: u32 = 1266;

    // Geometric
    pub const POINT: u32 = 600;
    pub const LSEG: u32 = 601;
    pub const PATH: u32 = 602;
    pub const BOX: u32 = 603;
    pub const POLYGON: u32 = 604;
    pub const LINE: u32 = 628;
    pub const CIRCLE: u32 = 718;

    // Ranges
    pub const INT4RANGE: u32 = 3904;
    pub const NUMRANGE: u32 = 3906;
    pub const TSRANGE: u32 = 3908;
    pub const TSTZRANGE: u32 = 3910;
    pub const DATERANGE: u32 = 3912;
    pub const INT8RANGE: u32 = 3926;

    // Multiranges
    pub const INT4MULTIRANGE: u32 = 4451;
    pub const NUMMULTIRANGE: u32 = 4532;
    pub const TSMULTIRANGE: u32 = 4533;
    pub const TSTZMULTIRANGE: u32 = 4534;
    pub const DATEMULTIRANGE: u32 = 4535;
    pub const INT8MULTIRANGE: u32 = 4536;
}

/// A PostgreSQL type with a text codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PgType {
    Bool,
    Int2,
    Int4,
    Int8,
    Oid,
    Float4,
    Float8,
    Numeric,
    Money,
    Bit,
    VarBit,
    BpChar,
    VarChar,
    Name,
    Text,
    Uuid,
    Date,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    Interval,
    Int4Range,
    Int8Range,
    NumRange,
    DateRange,
    TsRange,
    TstzRange,
    Int4MultiRange,
    Int8MultiRange,
    NumMultiRange,
    DateMultiRange,
    TsMultiRange,
    TstzMultiRange,
    Point,
    Line,
    Lseg,
    Box,
    Path,
    Polygon,
    Circle,
}

impl PgType {
    pub const ALL: [PgType; 41] = [
        PgType::Bool,
        PgType::Int2,
        PgType::Int4,
        PgType::Int8,
        PgType::Oid,
        PgType::Float4,
        PgType::Float8,
        PgType::Numeric,
        PgType::Money,
        PgType::Bit,
        PgType::VarBit,
        PgType::BpChar,
        PgType::VarChar,
        PgType::Name,
        PgType::Text,
        PgType::Uuid,
        PgType::Date,
        PgType::Time,
        PgType::TimeTz,
        PgType::Timestamp,
        PgType::TimestampTz,
        PgType::Interval,
        PgType::Int4Range,
        PgType::Int8Range,
        PgType::NumRange,
        PgType::DateRange,
        PgType::TsRange,
        PgType::TstzRange,
        PgType::Int4MultiRange,
        PgType::Int8MultiRange,
        PgType::NumMultiRange,
        PgType::DateMultiRange,
        PgType::TsMultiRange,
        PgType::TstzMultiRange,
        PgType::Point,
        PgType::Line,
        PgType::Lseg,
        PgType::Box,
        PgType::Path,
        PgType::Polygon,
        PgType::Circle,
    ];

    /// Canonical catalogue name, as `format_type` prints it in `pg_type`
    pub fn name(&self) -> &'static str {
        match self {
            PgType::Bool => "bool",
            PgType::Int2 => "int2",
            PgType::Int4 => "int4",
            PgType::Int8 => "int8",
            PgType::Oid => "oid",
            PgType::Float4 => "float4",
            PgType::Float8 => "float8",
            PgType::Numeric => "numeric",
            PgType::Money => "money",
            PgType::Bit => "bit",
            PgType::VarBit => "varbit",
            PgType::BpChar => "bpchar",
            PgType::VarChar => "varchar",
            PgType::Name => "name",
            PgType::Text => "text",
            PgType::Uuid => "uuid",
            PgType::Date => "date",
            PgType::Time => "time",
            PgType::TimeTz => "timetz",
            PgType::Timestamp => "timestamp",
            PgType::TimestampTz => "timestamptz",
            PgType::Interval => "interval",
            PgType::Int4Range => "int4range",
            PgType::Int8Range => "int8range",
            PgType::NumRange => "numrange",
            PgType::DateRange => "daterange",
            PgType::TsRange => "tsrange",
            PgType::TstzRange => "tstzrange",
            PgType::Int4MultiRange => "int4multirange",
            PgType::Int8MultiRange => "int8multirange",
            PgType::NumMultiRange => "nummultirange",
            PgType::DateMultiRange => "datemultirange",
            PgType::TsMultiRange => "tsmultirange",
            PgType::TstzMultiRange => "tstzmultirange",
            PgType::Point => "point",
            PgType::Line => "line",
            PgType::Lseg => "lseg",
            PgType::Box => "box",
            PgType::Path => "path",
            PgType::Polygon => "polygon",
            PgType::Circle => "circle",
        }
    }

    pub fn oid(&self) -> u32 {
        match self {
            PgType::Bool => oid::BOOL,
            PgType::Int2 => oid::INT2,
            PgType::Int4 => oid::INT4,
            PgType::Int8 => oid::INT8,
            PgType::Oid => oid::OID,
            PgType::Float4 => oid::FLOAT4,
            PgType::Float8 => oid::FLOAT8,
            PgType::Numeric => oid::NUMERIC,
            PgType::Money => oid::MONEY,
            PgType::Bit => oid::BIT,
            PgType::VarBit => oid::VARBIT,
            PgType::BpChar => oid::BPCHAR,
            PgType::VarChar => oid::VARCHAR,
            PgType::Name => oid::NAME,
            PgType::Text => oid::TEXT,
            PgType::Uuid => oid::UUID,
            PgType::Date => oid::DATE,
            PgType::Time => oid::TIME,
            PgType::TimeTz => oid::TIMETZ,
            PgType::Timestamp => oid::TIMESTAMP,
            PgType::TimestampTz => oid::TIMESTAMPTZ,
            PgType::Interval => oid::INTERVAL,
            PgType::Int4Range => oid::INT4RANGE,
            PgType::Int8Range => oid::INT8RANGE,
            PgType::NumRange => oid::NUMRANGE,
            PgType::DateRange => oid::DATERANGE,
            PgType::TsRange => oid::TSRANGE,
            PgType::TstzRange => oid::TSTZRANGE,
            PgType::Int4MultiRange => oid::INT4MULTIRANGE,
            PgType::Int8MultiRange => oid::INT8MULTIRANGE,
            PgType::NumMultiRange => oid::NUMMULTIRANGE,
            PgType::DateMultiRange => oid::DATEMULTIRANGE,
            PgType::TsMultiRange => oid::TSMULTIRANGE,
            PgType::TstzMultiRange => oid::TSTZMULTIRANGE,
            PgType::Point => oid::POINT,
            PgType::Line => oid::LINE,
            PgType::Lseg => oid::LSEG,
            PgType::Box => oid::BOX,
            PgType::Path => oid::PATH,
            PgType::Polygon => oid::POLYGON,
            PgType::Circle => oid::CIRCLE,
        }
    }

    pub fn from_oid(oid: u32) -> Option<PgType> {
        PgType::ALL.into_iter().find(|ty| ty.oid() == oid)
    }

    pub fn is_range(&self) -> bool {
        matches!(
            self,
            PgType::Int4Range
                | PgType::Int8Range
                | PgType::NumRange
                | PgType::DateRange
                | PgType::TsRange
                | PgType::TstzRange
        )
    }

    pub fn is_multirange(&self) -> bool {
        matches!(
            self,
            PgType::Int4MultiRange
                | PgType::Int8MultiRange
                | PgType::NumMultiRange
                | PgType::DateMultiRange
                | PgType::TsMultiRange
                | PgType::TstzMultiRange
        )
    }

    /// Types whose driver text depends on the `DateStyle` / `IntervalStyle` settings
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            PgType::Date
                | PgType::Time
                | PgType::TimeTz
                | PgType::Timestamp
                | PgType::TimestampTz
                | PgType::Interval
        )
    }
}

impl fmt::Display for PgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
