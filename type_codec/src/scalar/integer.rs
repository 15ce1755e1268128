//! Fixed-width integer codecs: `int2`, `int4`, `int8` and `oid`

use serde::Serialize;
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::traits::{value_object, PgCodec};
use crate::validation::{parse_integer, whole};

macro_rules! integer_codec {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name {
            value: $prim,
        }

        impl $name {
            pub const MIN: $prim = <$prim>::MIN;
            pub const MAX: $prim = <$prim>::MAX;

            pub fn new(value: $prim) -> Self {
                Self { value }
            }

            pub fn get(&self) -> $prim {
                self.value
            }

            pub fn to_number(&self) -> f64 {
                self.value as f64
            }

            fn checked(value: i64) -> Result<Self, Issue> {
                <$prim>::try_from(value).map(Self::new).map_err(|_| {
                    if value < Self::MIN as i64 {
                        Issue::too_small(SizeKind::Number, None, Self::MIN as i64, true, value)
                    } else {
                        Issue::too_big(SizeKind::Number, None, Self::MAX as i64, true, value)
                    }
                })
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl PgCodec for $name {
            const TYPE_NAME: &'static str = $type_name;
            const ACCEPTS: &'static [ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

            fn from_int(_ctx: &mut ParseContext<'_, Self>, value: i64) -> Result<Self, Issue> {
                Self::checked(value)
            }

            fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
                let value = whole(None, value)?;
                if value < Self::MIN as f64 {
                    return Err(Issue::too_small(SizeKind::Number, None, Self::MIN as i64, true, value));
                }
                if value > Self::MAX as f64 {
                    return Err(Issue::too_big(SizeKind::Number, None, Self::MAX as i64, true, value));
                }
                Self::checked(value as i64)
            }

            fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
                Self::checked(parse_integer(None, text, Self::MIN as i64, Self::MAX as i64)?)
            }
        }

        value_object!($name);
    };
}

integer_codec!(
    /// `smallint`
    Int2,
    i16,
    "Int2"
);
integer_codec!(
    /// `integer`
    Int4,
    i32,
    "Int4"
);
integer_codec!(
    /// `bigint`
    Int8,
    i64,
    "Int8"
);
integer_codec!(
    /// Object identifier, an unsigned 32-bit integer
    Oid,
    u32,
    "Oid"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Limit;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_width_bounds() {
        assert_eq!(Int2::expect_from(32767).get(), 32767);
        let err = Int2::safe_from(32768).unwrap_err();
        assert_eq!(
            err.issue,
            Issue::too_big(SizeKind::Number, None, 32767i64, true, 32768i64)
        );
        assert_eq!(Int2::safe_from("-32769").unwrap_err().code(), "too_small");

        assert_eq!(Int4::expect_from("-2147483648").get(), i32::MIN);
        assert_eq!(Oid::safe_from(-1).unwrap_err().code(), "too_small");
        assert_eq!(Oid::expect_from("4294967295").get(), u32::MAX);
    }

    #[test]
    fn test_int8_keeps_precision() {
        let value = Int8::expect_from("9223372036854775807");
        assert_eq!(value.get(), i64::MAX);
        assert_eq!(value.to_string(), "9223372036854775807");

        match Int8::safe_from("9223372036854775808").unwrap_err().issue {
            Issue::TooBig { received, .. } => {
                assert_eq!(received, Limit::Integer(9_223_372_036_854_775_808))
            }
            other => panic!("unexpected issue {:?}", other),
        }
    }

    #[test]
    fn test_fractions_are_not_whole() {
        assert_eq!(Int4::safe_from(1.5).unwrap_err().code(), "not_whole");
        assert_eq!(Int4::safe_from("1.5").unwrap_err().code(), "not_whole");
        assert_eq!(Int4::expect_from(2.0).get(), 2);
        assert_eq!(Int4::safe_from("12abc").unwrap_err().code(), "invalid_string");
    }

    #[test]
    fn test_equality_and_shapes() {
        assert!(Int4::expect_from(42).equals("42"));
        assert!(Int4::expect_from(42).equals(" 42 "));
        assert_eq!(Int4::safe_from(true).unwrap_err().code(), "invalid_type");
        assert_eq!(Int4::expect_from(7).to_json(), serde_json::json!(7));
    }
}
