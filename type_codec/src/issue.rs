//! Issue module
//!
//! The closed set of validation issues a codec can report. Every failure
//! surfaced by `safe_from`, `safe_equals` or a setter carries exactly one of
//! these as its primary issue.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Runtime shape of an input argument, used in `invalid_type` reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Date,
    Instance,
}

impl ArgKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgKind::Null => "null",
            ArgKind::Boolean => "boolean",
            ArgKind::Number => "number",
            ArgKind::String => "string",
            ArgKind::Array => "array",
            ArgKind::Object => "object",
            ArgKind::Date => "date",
            ArgKind::Instance => "instance",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a `too_big` / `too_small` bound applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKind {
    /// A numeric component value
    Number,
    /// The count of positional arguments
    Arguments,
    /// The character (or bit, or byte) length of a string value
    Length,
}

/// A numeric bound or received value. Integer bounds keep full 64-bit precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Limit {
    Integer(i128),
    Float(f64),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Integer(n) => write!(f, "{}", n),
            Limit::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Limit {
    fn from(value: i64) -> Self {
        Limit::Integer(value as i128)
    }
}

impl From<i128> for Limit {
    fn from(value: i128) -> Self {
        Limit::Integer(value)
    }
}

impl From<u32> for Limit {
    fn from(value: u32) -> Self {
        Limit::Integer(value as i128)
    }
}

impl From<usize> for Limit {
    fn from(value: usize) -> Self {
        Limit::Integer(value as i128)
    }
}

impl From<f64> for Limit {
    fn from(value: f64) -> Self {
        Limit::Float(value)
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Issue {
    /// The input shape is not one the codec accepts
    InvalidType {
        expected: Vec<ArgKind>,
        received: ArgKind,
    },
    /// A string input (or a style name) did not match any accepted grammar
    InvalidString {
        expected: Cow<'static, str>,
        received: String,
    },
    /// A named timezone could not be resolved to an offset
    InvalidTimezone { received: String },
    TooBig {
        #[serde(rename = "type")]
        kind: SizeKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<Cow<'static, str>>,
        maximum: Limit,
        inclusive: bool,
        received: Limit,
    },
    TooSmall {
        #[serde(rename = "type")]
        kind: SizeKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<Cow<'static, str>>,
        minimum: Limit,
        inclusive: bool,
        received: Limit,
    },
    /// An integral component received a fractional value
    NotWhole {
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<Cow<'static, str>>,
        received: f64,
    },
    MissingKeys { keys: Vec<String> },
    UnrecognizedKeys { keys: Vec<String> },
    InvalidKeyType {
        key: String,
        expected: Vec<ArgKind>,
        received: ArgKind,
    },
}

impl Issue {
    /// Stable snake_case identifier of the issue variant
    pub fn code(&self) -> &'static str {
        match self {
            Issue::InvalidType { .. } => "invalid_type",
            Issue::InvalidString { .. } => "invalid_string",
            Issue::InvalidTimezone { .. } => "invalid_timezone",
            Issue::TooBig { .. } => "too_big",
            Issue::TooSmall { .. } => "too_small",
            Issue::NotWhole { .. } => "not_whole",
            Issue::MissingKeys { .. } => "missing_keys",
            Issue::UnrecognizedKeys { .. } => "unrecognized_keys",
            Issue::InvalidKeyType { .. } => "invalid_key_type",
        }
    }

    pub fn invalid_string(expected: impl Into<Cow<'static, str>>, received: impl Into<String>) -> Self {
        Issue::InvalidString {
            expected: expected.into(),
            received: received.into(),
        }
    }

    pub fn invalid_timezone(received: impl Into<String>) -> Self {
        Issue::InvalidTimezone {
            received: received.into(),
        }
    }

    pub fn too_big(
        kind: SizeKind,
        field: Option<&'static str>,
        maximum: impl Into<Limit>,
        inclusive: bool,
        received: impl Into<Limit>,
    ) -> Self {
        Issue::TooBig {
            kind,
            field: field.map(Cow::Borrowed),
            maximum: maximum.into(),
            inclusive,
            received: received.into(),
        }
    }

    pub fn too_small(
        kind: SizeKind,
        field: Option<&'static str>,
        minimum: impl Into<Limit>,
        inclusive: bool,
        received: impl Into<Limit>,
    ) -> Self {
        Issue::TooSmall {
            kind,
            field: field.map(Cow::Borrowed),
            minimum: minimum.into(),
            inclusive,
            received: received.into(),
        }
    }

    pub fn not_whole(field: Option<&'static str>, received: f64) -> Self {
        Issue::NotWhole {
            field: field.map(Cow::Borrowed),
            received,
        }
    }

    /// Attach a field name to a numeric issue that does not carry one yet
    pub fn with_field(mut self, name: &'static str) -> Self {
        match &mut self {
            Issue::TooBig { field, .. } | Issue::TooSmall { field, .. } | Issue::NotWhole { field, .. } => {
                if field.is_none() {
                    *field = Some(Cow::Borrowed(name));
                }
            }
            _ => {}
        }
        self
    }
}

fn write_kinds(f: &mut fmt::Formatter<'_>, kinds: &[ArgKind]) -> fmt::Result {
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            f.write_str(" | ")?;
        }
        write!(f, "'{}'", kind)?;
    }
    Ok(())
}

fn subject(f: &mut fmt::Formatter<'_>, kind: SizeKind, field: &Option<Cow<'static, str>>) -> fmt::Result {
    match (kind, field) {
        (SizeKind::Arguments, _) => f.write_str("Function must have"),
        (SizeKind::Length, Some(name)) => write!(f, "{} length must be", name),
        (SizeKind::Length, None) => f.write_str("Length must be"),
        (SizeKind::Number, Some(name)) => write!(f, "{} must be", name),
        (SizeKind::Number, None) => f.write_str("Number must be"),
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::InvalidType { expected, received } => {
                f.write_str("Expected ")?;
                write_kinds(f, expected)?;
                write!(f, ", received '{}'", received)
            }
            Issue::InvalidString { expected, received } => {
                write!(f, "Expected {}, received '{}'", expected, received)
            }
            Issue::InvalidTimezone { received } => {
                write!(f, "Invalid timezone '{}'", received)
            }
            Issue::TooBig {
                kind,
                field,
                maximum,
                inclusive,
                received,
            } => {
                subject(f, *kind, field)?;
                let op = if *inclusive { "less than or equal to" } else { "less than" };
                match kind {
                    SizeKind::Arguments => write!(f, " at most {} argument(s), received {}", maximum, received),
                    _ => write!(f, " {} {}, received {}", op, maximum, received),
                }
            }
            Issue::TooSmall {
                kind,
                field,
                minimum,
                inclusive,
                received,
            } => {
                subject(f, *kind, field)?;
                let op = if *inclusive { "greater than or equal to" } else { "greater than" };
                match kind {
                    SizeKind::Arguments => write!(f, " at least {} argument(s), received {}", minimum, received),
                    _ => write!(f, " {} {}, received {}", op, minimum, received),
                }
            }
            Issue::NotWhole { field, received } => match field {
                Some(name) => write!(f, "{} must be a whole number, received {}", name, received),
                None => write!(f, "Expected a whole number, received {}", received),
            },
            Issue::MissingKeys { keys } => write!(f, "Missing keys: {}", keys.join(", ")),
            Issue::UnrecognizedKeys { keys } => write!(f, "Unrecognized keys: {}", keys.join(", ")),
            Issue::InvalidKeyType { key, expected, received } => {
                write!(f, "Key '{}' expected ", key)?;
                write_kinds(f, expected)?;
                write!(f, ", received '{}'", received)
            }
        }
    }
}
