//! Generic range value

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

use crate::context::{Arg, Args, ParseContext};
use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::PgCodec;

use super::element::RangeElement;
use super::literal::{quote, split_top_level, unquote};

/// A contiguous span of `T`, or the distinguished empty range
#[derive(Debug, Clone, PartialEq)]
pub struct Range<T> {
    bounds: Option<(Bound<T>, Bound<T>)>,
}

/// Order two lower bounds; an infinite lower bound sorts first
pub(crate) fn cmp_lower<T: RangeElement>(a: &Bound<T>, b: &Bound<T>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => x.compare(y),
        (Bound::Included(x), Bound::Excluded(y)) => x.compare(y).then(Ordering::Less),
        (Bound::Excluded(x), Bound::Included(y)) => x.compare(y).then(Ordering::Greater),
    }
}

/// Order two upper bounds; an infinite upper bound sorts last
pub(crate) fn cmp_upper<T: RangeElement>(a: &Bound<T>, b: &Bound<T>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Greater,
        (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => x.compare(y),
        (Bound::Included(x), Bound::Excluded(y)) => x.compare(y).then(Ordering::Greater),
        (Bound::Excluded(x), Bound::Included(y)) => x.compare(y).then(Ordering::Less),
    }
}

fn bound_value<T>(bound: &Bound<T>) -> Option<&T> {
    match bound {
        Bound::Included(v) | Bound::Excluded(v) => Some(v),
        Bound::Unbounded => None,
    }
}

fn no_successor<T: RangeElement>(value: &T) -> Issue {
    Issue::invalid_string(
        format!("{} bound below the element maximum", T::RANGE_NAME),
        value.to_string(),
    )
}

/// Bound flags from a `"[)"`-style two-character string
fn parse_flags(text: &str) -> Result<(bool, bool), Issue> {
    let mut chars = text.trim().chars();
    let lower = match chars.next() {
        Some('[') => true,
        Some('(') => false,
        _ => return Err(Issue::invalid_string("range bounds such as \"[)\"", text)),
    };
    let upper = match (chars.next(), chars.next()) {
        (Some(']'), None) => true,
        (Some(')'), None) => false,
        _ => return Err(Issue::invalid_string("range bounds such as \"[)\"", text)),
    };
    Ok((lower, upper))
}

fn make_bound<T>(value: Option<T>, inclusive: bool) -> Bound<T> {
    match (value, inclusive) {
        (None, _) => Bound::Unbounded,
        (Some(v), true) => Bound::Included(v),
        (Some(v), false) => Bound::Excluded(v),
    }
}

impl<T: RangeElement> Range<T> {
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    /// Normalize and validate a pair of bounds
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Result<Self, Issue> {
        let (lower, upper) = if T::DISCRETE {
            (Self::canonical_lower(lower)?, Self::canonical_upper(upper)?)
        } else {
            (lower, upper)
        };

        if let (Some(l), Some(u)) = (bound_value(&lower), bound_value(&upper)) {
            match l.compare(u) {
                Ordering::Greater => {
                    return Err(Issue::invalid_string(
                        "range lower bound less than or equal to upper bound",
                        format!("{}, {}", l, u),
                    ));
                }
                Ordering::Equal => {
                    let both_inclusive =
                        matches!(lower, Bound::Included(_)) && matches!(upper, Bound::Included(_));
                    if !both_inclusive {
                        return Ok(Self::empty());
                    }
                }
                Ordering::Less => {}
            }
        }
        Ok(Self {
            bounds: Some((lower, upper)),
        })
    }

    fn canonical_lower(bound: Bound<T>) -> Result<Bound<T>, Issue> {
        match bound {
            Bound::Excluded(v) => v
                .successor()
                .map(Bound::Included)
                .ok_or_else(|| no_successor(&v)),
            other => Ok(other),
        }
    }

    fn canonical_upper(bound: Bound<T>) -> Result<Bound<T>, Issue> {
        match bound {
            Bound::Included(v) => v
                .successor()
                .map(Bound::Excluded)
                .ok_or_else(|| no_successor(&v)),
            other => Ok(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn lower(&self) -> Option<&Bound<T>> {
        self.bounds.as_ref().map(|(l, _)| l)
    }

    pub fn upper(&self) -> Option<&Bound<T>> {
        self.bounds.as_ref().map(|(_, u)| u)
    }

    /// Finite lower bound value
    pub fn lower_value(&self) -> Option<&T> {
        self.lower().and_then(bound_value)
    }

    pub fn upper_value(&self) -> Option<&T> {
        self.upper().and_then(bound_value)
    }

    pub fn lower_inclusive(&self) -> bool {
        matches!(self.lower(), Some(Bound::Included(_)))
    }

    pub fn upper_inclusive(&self) -> bool {
        matches!(self.upper(), Some(Bound::Included(_)))
    }

    pub fn contains(&self, value: &T) -> bool {
        let Some((lower, upper)) = &self.bounds else {
            return false;
        };
        let above_lower = match lower {
            Bound::Unbounded => true,
            Bound::Included(l) => l.compare(value) != Ordering::Greater,
            Bound::Excluded(l) => l.compare(value) == Ordering::Less,
        };
        let below_upper = match upper {
            Bound::Unbounded => true,
            Bound::Included(u) => value.compare(u) != Ordering::Greater,
            Bound::Excluded(u) => value.compare(u) == Ordering::Less,
        };
        above_lower && below_upper
    }

    /// True when `self` ends at or after the point where `next` starts, so the
    /// two can be merged. Expects `self` to start no later than `next`.
    pub(crate) fn reaches(&self, next: &Self) -> bool {
        let (Some((_, upper)), Some((lower, _))) = (&self.bounds, &next.bounds) else {
            return false;
        };
        match (upper, lower) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
            (Bound::Excluded(u), Bound::Excluded(l)) => u.compare(l) == Ordering::Greater,
            (Bound::Included(u) | Bound::Excluded(u), Bound::Included(l) | Bound::Excluded(l)) => {
                u.compare(l) != Ordering::Less
            }
        }
    }

    /// Smallest range covering both; only meaningful when they overlap or touch
    pub(crate) fn span(&self, other: &Self) -> Self {
        match (&self.bounds, &other.bounds) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            (Some((l1, u1)), Some((l2, u2))) => {
                let lower = if cmp_lower(l1, l2) == Ordering::Greater { l2 } else { l1 };
                let upper = if cmp_upper(u1, u2) == Ordering::Less { u2 } else { u1 };
                Self {
                    bounds: Some((lower.clone(), upper.clone())),
                }
            }
        }
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        let (first, second) = if self.cmp_start(other) == Ordering::Greater {
            (other, self)
        } else {
            (self, other)
        };
        let (Some((_, upper)), Some((lower, _))) = (&first.bounds, &second.bounds) else {
            return false;
        };
        match (upper, lower) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
            (Bound::Included(u), Bound::Included(l)) => u.compare(l) != Ordering::Less,
            (Bound::Included(u) | Bound::Excluded(u), Bound::Included(l) | Bound::Excluded(l)) => {
                u.compare(l) == Ordering::Greater
            }
        }
    }

    /// True when the ranges share a boundary point but no elements
    pub fn adjacent(&self, other: &Self) -> bool {
        let (first, second) = if self.cmp_start(other) == Ordering::Greater {
            (other, self)
        } else {
            (self, other)
        };
        first.reaches(second) && !first.overlaps(second)
    }

    /// Order by lower bound, then upper bound; empty sorts first
    pub(crate) fn cmp_start(&self, other: &Self) -> Ordering {
        match (&self.bounds, &other.bounds) {
            (None, None) => Ordering::Equal,
            (None, _) => Ordering::Less,
            (_, None) => Ordering::Greater,
            (Some((l1, u1)), Some((l2, u2))) => cmp_lower(l1, l2).then_with(|| cmp_upper(u1, u2)),
        }
    }

    /// Parse `[a,b)`, `(,b]`, `empty`
    pub(crate) fn parse_text(text: &str) -> Result<Self, Issue> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("empty") {
            return Ok(Self::empty());
        }
        let invalid = || Issue::invalid_string(format!("{} literal", T::RANGE_NAME), text);

        let lower_inclusive = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid()),
        };
        let upper_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid()),
        };
        if trimmed.len() < 2 {
            return Err(invalid());
        }
        let body = &trimmed[1..trimmed.len() - 1];
        let [lower, upper] = split_top_level(body, ',')[..] else {
            return Err(invalid());
        };

        let lower = unquote(lower).map(|s| T::parse_bound(Arg::Text(s))).transpose()?;
        let upper = unquote(upper).map(|s| T::parse_bound(Arg::Text(s))).transpose()?;
        Self::new(make_bound(lower, lower_inclusive), make_bound(upper, upper_inclusive))
    }

    /// Build from JSON-shaped bound values and flags
    fn from_values(lower: Option<&Value>, upper: Option<&Value>, flags: (bool, bool)) -> Result<Self, Issue> {
        let parse = |value: Option<&Value>| match value {
            None | Some(Value::Null) => Ok(None),
            Some(v) => T::parse_bound(Arg::from(v)).map(Some),
        };
        Self::new(make_bound(parse(lower)?, flags.0), make_bound(parse(upper)?, flags.1))
    }

    fn bound_arg(arg: &Arg<Self>) -> Result<Option<T>, Issue> {
        match arg {
            Arg::Null => Ok(None),
            Arg::Text(s) if s.trim().is_empty() => Ok(None),
            other => match other.cast::<T>() {
                Some(arg) => T::parse_bound(arg).map(Some),
                None => Err(Issue::InvalidType {
                    expected: T::ACCEPTS.to_vec(),
                    received: ArgKind::Instance,
                }),
            },
        }
    }
}

impl<T: RangeElement> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((lower, upper)) = &self.bounds else {
            return f.write_str("empty");
        };
        let open = if matches!(lower, Bound::Included(_)) { '[' } else { '(' };
        let close = if matches!(upper, Bound::Included(_)) { ']' } else { ')' };
        let text = |bound: &Bound<T>| bound_value(bound).map(|v| quote(&v.to_string())).unwrap_or_default();
        write!(f, "{}{},{}{}", open, text(lower), text(upper), close)
    }
}

impl<T: RangeElement> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some((lower, upper)) = &self.bounds else {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("empty", &true)?;
            return map.end();
        };
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("lower", &bound_value(lower))?;
        map.serialize_entry("upper", &bound_value(upper))?;
        map.serialize_entry("lowerInclusive", &matches!(lower, Bound::Included(_)))?;
        map.serialize_entry("upperInclusive", &matches!(upper, Bound::Included(_)))?;
        map.end()
    }
}

impl<T: RangeElement> PgCodec for Range<T> {
    const TYPE_NAME: &'static str = T::RANGE_NAME;
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 3));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Range::parse_text(text)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        if object.contains_key("empty") {
            let fields = expect_keys(ctx, object, &["empty"], &[])?;
            return match fields.boolean("empty")? {
                true => Ok(Range::empty()),
                false => Err(Issue::MissingKeys {
                    keys: vec!["lower".to_string(), "upper".to_string()],
                }),
            };
        }
        let fields = expect_keys(
            ctx,
            object,
            &["lower", "upper"],
            &["lowerInclusive", "upperInclusive"],
        )?;
        let flags = (
            fields.optional_boolean("lowerInclusive")?.unwrap_or(true),
            fields.optional_boolean("upperInclusive")?.unwrap_or(false),
        );
        Range::from_values(fields.get("lower"), fields.get("upper"), flags)
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        let flags = match items {
            [_, _] => (true, false),
            [_, _, Value::String(flags)] => parse_flags(flags)?,
            _ => {
                return Err(Issue::invalid_string(
                    format!("[lower, upper] pair for {}", T::RANGE_NAME),
                    Value::from(items.to_vec()).to_string(),
                ));
            }
        };
        Range::from_values(items.first(), items.get(1), flags)
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        let flags = match args.get(2) {
            None => (true, false),
            Some(Arg::Text(flags)) => parse_flags(flags)?,
            Some(other) => {
                return Err(Issue::InvalidType {
                    expected: vec![ArgKind::String],
                    received: other.kind(),
                })
            }
        };
        let lower = Range::bound_arg(&args[0])?;
        let upper = Range::bound_arg(&args[1])?;
        Range::new(make_bound(lower, flags.0), make_bound(upper, flags.1))
    }
}

impl<T: RangeElement> From<Range<T>> for Arg<Range<T>> {
    fn from(value: Range<T>) -> Self {
        Arg::Instance(value)
    }
}

impl<T: RangeElement> From<Range<T>> for Args<Range<T>> {
    fn from(value: Range<T>) -> Self {
        Args::one(Arg::Instance(value))
    }
}

impl<T: RangeElement> From<&Range<T>> for Args<Range<T>> {
    fn from(value: &Range<T>) -> Self {
        Args::one(Arg::Instance(value.clone()))
    }
}

impl<T: RangeElement> FromStr for Range<T> {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::safe_from(s)
    }
}
