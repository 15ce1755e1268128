//! SQL type name resolution
//!
//! This module maps the names a server or a DDL statement uses for a type
//! onto [`PgType`], and provides storage size hints.

use crate::types::PgType;

/// Lowercase, collapse whitespace and drop a `(n)` / `(p,s)` modifier
pub fn normalize_type_name(name: &str) -> String {
    let base = match name.find('(') {
        Some(open) => {
            let close = name[open..].find(')').map(|i| open + i + 1).unwrap_or(name.len());
            format!("{} {}", &name[..open], &name[close..])
        }
        None => name.to_string(),
    };
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// The single numeric modifier of a name such as `varchar(10)` or `bit(4)`
pub fn type_modifier(name: &str) -> Option<usize> {
    let open = name.find('(')?;
    let close = open + name[open..].find(')')?;
    name[open + 1..close].trim().parse().ok()
}

impl PgType {
    /// Resolve a canonical name, an SQL spelling or a common alias
    pub fn from_name(name: &str) -> Option<PgType> {
        let normalized = normalize_type_name(name);
        let ty = match normalized.as_str() {
            "bool" | "boolean" => PgType::Bool,
            "int2" | "smallint" => PgType::Int2,
            "int4" | "int" | "integer" => PgType::Int4,
            "int8" | "bigint" => PgType::Int8,
            "oid" => PgType::Oid,
            "float4" | "real" => PgType::Float4,
            "float8" | "double precision" | "float" => PgType::Float8,
            "numeric" | "decimal" => PgType::Numeric,
            "money" => PgType::Money,
            "bit" => PgType::Bit,
            "varbit" | "bit varying" => PgType::VarBit,
            "bpchar" | "char" | "character" => PgType::BpChar,
            "varchar" | "character varying" | "char varying" => PgType::VarChar,
            "name" => PgType::Name,
            "text" => PgType::Text,
            "uuid" => PgType::Uuid,
            "date" => PgType::Date,
            "time" | "time without time zone" => PgType::Time,
            "timetz" | "time with time zone" => PgType::TimeTz,
            "timestamp" | "timestamp without time zone" => PgType::Timestamp,
            "timestamptz" | "timestamp with time zone" => PgType::TimestampTz,
            "interval" => PgType::Interval,
            "int4range" => PgType::Int4Range,
            "int8range" => PgType::Int8Range,
            "numrange" => PgType::NumRange,
            "daterange" => PgType::DateRange,
            "tsrange" => PgType::TsRange,
            "tstzrange" => PgType::TstzRange,
            "int4multirange" => PgType::Int4MultiRange,
            "int8multirange" => PgType::Int8MultiRange,
            "nummultirange" => PgType::NumMultiRange,
            "datemultirange" => PgType::DateMultiRange,
            "tsmultirange" => PgType::TsMultiRange,
            "tstzmultirange" => PgType::TstzMultiRange,
            "point" => PgType::Point,
            "line" => PgType::Line,
            "lseg" => PgType::Lseg,
            "box" => PgType::Box,
            "path" => PgType::Path,
            "polygon" => PgType::Polygon,
            "circle" => PgType::Circle,
            _ => return None,
        };
        Some(ty)
    }

    /// Get size hint for the on-disk representation (for optimization)
    pub fn size_hint(&self) -> Option<usize> {
        match self {
            PgType::Bool => Some(1),
            PgType::Int2 => Some(2),
            PgType::Int4 | PgType::Oid | PgType::Float4 | PgType::Date => Some(4),
            PgType::Int8
            | PgType::Float8
            | PgType::Money
            | PgType::Time
            | PgType::Timestamp
            | PgType::TimestampTz => Some(8),
            PgType::TimeTz => Some(12),
            PgType::Uuid | PgType::Interval | PgType::Point => Some(16),
            PgType::Line | PgType::Circle => Some(24),
            PgType::Lseg | PgType::Box => Some(32),
            PgType::Name => Some(64),
            _ => None, // Variable size types
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(PgType::from_name("int4"), Some(PgType::Int4));
        assert_eq!(PgType::from_name("INTEGER"), Some(PgType::Int4));
        assert_eq!(PgType::from_name("character  varying(10)"), Some(PgType::VarChar));
        assert_eq!(PgType::from_name("timestamptz"), Some(PgType::TimestampTz));
        assert_eq!(
            PgType::from_name("Timestamp With Time Zone"),
            Some(PgType::TimestampTz)
        );
        assert_eq!(PgType::from_name("numeric(10, 2)"), Some(PgType::Numeric));
        assert_eq!(PgType::from_name("bit(4)"), Some(PgType::Bit));
        assert_eq!(PgType::from_name("jsonb"), None);
    }

    #[test]
    fn test_every_canonical_name_resolves() {
        for ty in PgType::ALL {
            assert_eq!(PgType::from_name(ty.name()), Some(ty));
        }
    }

    #[test]
    fn test_type_modifier() {
        assert_eq!(type_modifier("varchar(10)"), Some(10));
        assert_eq!(type_modifier("bit( 4 )"), Some(4));
        assert_eq!(type_modifier("numeric(10,2)"), None);
        assert_eq!(type_modifier("text"), None);
    }

    #[test]
    fn test_size_hints() {
        assert_eq!(PgType::Bool.size_hint(), Some(1));
        assert_eq!(PgType::TimestampTz.size_hint(), Some(8));
        assert_eq!(PgType::Box.size_hint(), Some(32));
        assert_eq!(PgType::Text.size_hint(), None);
        assert_eq!(PgType::NumRange.size_hint(), None);
    }
}
