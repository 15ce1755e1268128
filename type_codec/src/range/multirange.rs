//! Ordered set of disjoint ranges

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::context::{Arg, Args, ParseContext};
use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::PgCodec;
use crate::debug_log;

use super::element::RangeElement;
use super::literal::split_top_level;
use super::range::Range;

/// Non-empty, non-overlapping, non-adjacent ranges sorted by lower bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRange<T: RangeElement> {
    ranges: Vec<Range<T>>,
}

impl<T: RangeElement> MultiRange<T> {
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Canonicalise any collection of ranges
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range<T>>) -> Self {
        let mut ranges: Vec<Range<T>> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
        ranges.sort_by(|a, b| a.cmp_start(b));

        let mut merged: Vec<Range<T>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if last.reaches(&range) => *last = last.span(&range),
                _ => merged.push(range),
            }
        }
        debug_log!("{} merged into {} ranges", T::MULTIRANGE_NAME, merged.len());
        Self { ranges: merged }
    }

    pub fn ranges(&self) -> &[Range<T>] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    fn parse_text(text: &str) -> Result<Self, Issue> {
        let trimmed = text.trim();
        let Some(body) = trimmed.strip_prefix('{').and_then(|t| t.strip_suffix('}')) else {
            return Err(Issue::invalid_string(format!("{} literal", T::MULTIRANGE_NAME), text));
        };
        if body.trim().is_empty() {
            return Ok(Self::empty());
        }
        let ranges = split_top_level(body, ',')
            .into_iter()
            .map(Range::parse_text)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_ranges(ranges))
    }

    fn parse_items(items: &[Value]) -> Result<Self, Issue> {
        let ranges = items
            .iter()
            .map(|item| match item {
                Value::String(s) => Range::parse_text(s),
                other => Range::safe_from(other).map_err(|err| err.issue),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_ranges(ranges))
    }
}

impl<T: RangeElement> Default for MultiRange<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: RangeElement> fmt::Display for MultiRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", range)?;
        }
        f.write_str("}")
    }
}

impl<T: RangeElement> PgCodec for MultiRange<T> {
    const TYPE_NAME: &'static str = T::MULTIRANGE_NAME;
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        MultiRange::parse_text(text)
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        MultiRange::parse_items(items)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["ranges"], &[])?;
        MultiRange::parse_items(fields.array("ranges")?)
    }
}

impl<T: RangeElement> From<Vec<Range<T>>> for MultiRange<T> {
    fn from(ranges: Vec<Range<T>>) -> Self {
        Self::from_ranges(ranges)
    }
}

impl<T: RangeElement> From<MultiRange<T>> for Arg<MultiRange<T>> {
    fn from(value: MultiRange<T>) -> Self {
        Arg::Instance(value)
    }
}

impl<T: RangeElement> From<MultiRange<T>> for Args<MultiRange<T>> {
    fn from(value: MultiRange<T>) -> Self {
        Args::one(Arg::Instance(value))
    }
}

impl<T: RangeElement> From<&MultiRange<T>> for Args<MultiRange<T>> {
    fn from(value: &MultiRange<T>) -> Self {
        Args::one(Arg::Instance(value.clone()))
    }
}

impl<T: RangeElement> FromStr for MultiRange<T> {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::safe_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{DateMultiRange, Int4MultiRange, Int4Range, NumMultiRange};
    use crate::scalar::Int4;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_disjoint_ranges_round_trip() {
        let value = Int4MultiRange::expect_from("{[1,3),[11,13),[21,23)}");
        assert_eq!(value.to_string(), "{[1,3),[11,13),[21,23)}");
        assert_eq!(value.len(), 3);
    }

    #[test]
    fn test_overlapping_and_adjacent_ranges_merge() {
        assert_eq!(Int4MultiRange::expect_from("{[1,3),[2,5)}").to_string(), "{[1,5)}");
        assert_eq!(Int4MultiRange::expect_from("{[1,3),[3,5)}").to_string(), "{[1,5)}");
        assert_eq!(Int4MultiRange::expect_from("{[1,2],[3,4]}").to_string(), "{[1,5)}");
        assert_eq!(NumMultiRange::expect_from("{[1,2],(2,3)}").to_string(), "{[1,3)}");
        assert_eq!(NumMultiRange::expect_from("{[1,2),(2,3)}").to_string(), "{[1,2),(2,3)}");
        assert_eq!(Int4MultiRange::expect_from("{[1,10),[2,3)}").to_string(), "{[1,10)}");
        assert_eq!(Int4MultiRange::expect_from("{(,3),[2,)}").to_string(), "{(,)}");
    }

    #[test]
    fn test_merge_is_order_and_duplicate_invariant() {
        let a = Int4MultiRange::expect_from("{[21,23),[1,3),[11,13),[2,5),[1,3)}");
        let b = Int4MultiRange::expect_from("{[1,5),[11,13),[21,23)}");
        assert_eq!(a, b);
        assert_eq!(Int4MultiRange::from_ranges(a.ranges().to_vec()), a);
        assert!(a.equals("{[11,13),[1,5),[21,23)}"));
    }

    #[test]
    fn test_empty_forms() {
        assert!(Int4MultiRange::expect_from("{}").is_empty());
        assert!(Int4MultiRange::expect_from("{ empty, empty }").is_empty());
        assert_eq!(Int4MultiRange::empty().to_string(), "{}");
    }

    #[test]
    fn test_invalid_literals() {
        assert_eq!(Int4MultiRange::safe_from("[1,3)").unwrap_err().code(), "invalid_string");
        assert_eq!(Int4MultiRange::safe_from("{[1,3),}").unwrap_err().code(), "invalid_string");
        assert_eq!(Int4MultiRange::safe_from("{[3,1)}").unwrap_err().code(), "invalid_string");
        assert_eq!(Int4MultiRange::safe_from(5).unwrap_err().code(), "invalid_type");
    }

    #[test]
    fn test_json_and_array_input() {
        let value = Int4MultiRange::expect_from(json!(["[5,7)", { "lower": 1, "upper": 3 }]));
        assert_eq!(value.to_string(), "{[1,3),[5,7)}");
        assert_eq!(
            value.to_json(),
            json!({ "ranges": [
                { "lower": 1, "upper": 3, "lowerInclusive": true, "upperInclusive": false },
                { "lower": 5, "upper": 7, "lowerInclusive": true, "upperInclusive": false },
            ] })
        );
        assert_eq!(Int4MultiRange::expect_from(value.to_json()), value);
    }

    #[test]
    fn test_from_ranges_and_contains() {
        let value = Int4MultiRange::from(vec![
            Int4Range::expect_from("[10,20)"),
            Int4Range::empty(),
            Int4Range::expect_from("[1,5)"),
        ]);
        assert_eq!(value.to_string(), "{[1,5),[10,20)}");
        assert!(value.contains(&Int4::new(12)));
        assert!(!value.contains(&Int4::new(7)));
    }

    #[test]
    fn test_date_multirange() {
        let value = DateMultiRange::expect_from("{[2004-10-19,2004-10-20],[2004-10-21,2004-10-25)}");
        assert_eq!(value.to_string(), "{[2004-10-19,2004-10-25)}");
    }
}
