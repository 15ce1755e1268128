//! Parse context module
//!
//! Carries the positional input of one `safe_from` / `safe_equals` call and
//! the issues recorded while parsing it. A context lives for exactly one call.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use serde_json::{Map, Value};

use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue};
use crate::trace_log;

/// A native chrono date/time handed to a codec
#[derive(Debug, Clone, PartialEq)]
pub enum NativeTime {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

/// One positional input argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<T> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Native(NativeTime),
    /// Another value of the codec being parsed
    Instance(T),
}

impl<T> Arg<T> {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Null => ArgKind::Null,
            Arg::Bool(_) => ArgKind::Boolean,
            Arg::Int(_) | Arg::Float(_) => ArgKind::Number,
            Arg::Text(_) => ArgKind::String,
            Arg::Array(_) => ArgKind::Array,
            Arg::Object(_) => ArgKind::Object,
            Arg::Native(_) => ArgKind::Date,
            Arg::Instance(_) => ArgKind::Instance,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Arg::Int(v) => Some(*v as f64),
            Arg::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Re-target a non-instance argument at another codec
    pub fn cast<U>(&self) -> Option<Arg<U>> {
        Some(match self {
            Arg::Null => Arg::Null,
            Arg::Bool(b) => Arg::Bool(*b),
            Arg::Int(v) => Arg::Int(*v),
            Arg::Float(v) => Arg::Float(*v),
            Arg::Text(s) => Arg::Text(s.clone()),
            Arg::Array(a) => Arg::Array(a.clone()),
            Arg::Object(m) => Arg::Object(m.clone()),
            Arg::Native(n) => Arg::Native(n.clone()),
            Arg::Instance(_) => return None,
        })
    }
}

/// Runtime shape of a JSON value
pub fn json_kind(value: &Value) -> ArgKind {
    match value {
        Value::Null => ArgKind::Null,
        Value::Bool(_) => ArgKind::Boolean,
        Value::Number(_) => ArgKind::Number,
        Value::String(_) => ArgKind::String,
        Value::Array(_) => ArgKind::Array,
        Value::Object(_) => ArgKind::Object,
    }
}

impl<T> From<Value> for Arg<T> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Arg::Int(i),
                None => Arg::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Arg::Text(s),
            Value::Array(a) => Arg::Array(a),
            Value::Object(m) => Arg::Object(m),
        }
    }
}

impl<T> From<&Value> for Arg<T> {
    fn from(value: &Value) -> Self {
        Arg::from(value.clone())
    }
}

impl<T> From<Map<String, Value>> for Arg<T> {
    fn from(value: Map<String, Value>) -> Self {
        Arg::Object(value)
    }
}

impl<T> From<bool> for Arg<T> {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

macro_rules! int_args {
    ($($ty:ty),*) => {
        $(
            impl<T> From<$ty> for Arg<T> {
                fn from(value: $ty) -> Self {
                    Arg::Int(value as i64)
                }
            }
        )*
    };
}

int_args!(i8, i16, i32, i64, u8, u16, u32);

impl<T> From<u64> for Arg<T> {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Arg::Int(v),
            Err(_) => Arg::Float(value as f64),
        }
    }
}

impl<T> From<f32> for Arg<T> {
    fn from(value: f32) -> Self {
        Arg::Float(value as f64)
    }
}

impl<T> From<f64> for Arg<T> {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl<T> From<&str> for Arg<T> {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl<T> From<String> for Arg<T> {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl<T> From<&String> for Arg<T> {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl<T> From<NaiveDate> for Arg<T> {
    fn from(value: NaiveDate) -> Self {
        Arg::Native(NativeTime::Date(value))
    }
}

impl<T> From<NaiveTime> for Arg<T> {
    fn from(value: NaiveTime) -> Self {
        Arg::Native(NativeTime::Time(value))
    }
}

impl<T> From<NaiveDateTime> for Arg<T> {
    fn from(value: NaiveDateTime) -> Self {
        Arg::Native(NativeTime::DateTime(value))
    }
}

impl<T, Tz: TimeZone> From<DateTime<Tz>> for Arg<T> {
    fn from(value: DateTime<Tz>) -> Self {
        let offset = value.offset().fix();
        Arg::Native(NativeTime::Zoned(value.with_timezone(&offset)))
    }
}

/// Ordered positional arguments of one parse call
#[derive(Debug, Clone, PartialEq)]
pub struct Args<T>(pub Vec<Arg<T>>);

impl<T> Args<T> {
    pub fn one(arg: Arg<T>) -> Self {
        Args(vec![arg])
    }

    pub fn as_slice(&self) -> &[Arg<T>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Arg<T>> for Args<T> {
    fn from(arg: Arg<T>) -> Self {
        Args(vec![arg])
    }
}

impl<T> From<Vec<Arg<T>>> for Args<T> {
    fn from(args: Vec<Arg<T>>) -> Self {
        Args(args)
    }
}

macro_rules! single_args {
    ($($ty:ty),*) => {
        $(
            impl<T> From<$ty> for Args<T> {
                fn from(value: $ty) -> Self {
                    Args(vec![Arg::from(value)])
                }
            }
        )*
    };
}

single_args!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, &str, String, &String, Value, &Value,
    Map<String, Value>, NaiveDate, NaiveTime, NaiveDateTime
);

impl<T, Tz: TimeZone> From<DateTime<Tz>> for Args<T> {
    fn from(value: DateTime<Tz>) -> Self {
        Args(vec![Arg::from(value)])
    }
}

macro_rules! tuple_args {
    ($($name:ident),+) => {
        impl<T, $($name: Into<Arg<T>>),+> From<($($name,)+)> for Args<T> {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Args(vec![$($name.into()),+])
            }
        }
    };
}

tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
tuple_args!(A, B, C, D, E);
tuple_args!(A, B, C, D, E, F);
tuple_args!(A, B, C, D, E, F, G);
tuple_args!(A, B, C, D, E, F, G, H);
tuple_args!(A, B, C, D, E, F, G, H, I);

/// Implements the same-codec instance conversions for concrete value types
macro_rules! instance_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::context::Arg<$ty> {
                fn from(value: $ty) -> Self {
                    $crate::context::Arg::Instance(value)
                }
            }

            impl From<&$ty> for $crate::context::Arg<$ty> {
                fn from(value: &$ty) -> Self {
                    $crate::context::Arg::Instance(value.clone())
                }
            }

            impl From<$ty> for $crate::context::Args<$ty> {
                fn from(value: $ty) -> Self {
                    $crate::context::Args(vec![$crate::context::Arg::Instance(value)])
                }
            }

            impl From<&$ty> for $crate::context::Args<$ty> {
                fn from(value: &$ty) -> Self {
                    $crate::context::Args(vec![$crate::context::Arg::Instance(value.clone())])
                }
            }
        )*
    };
}

pub(crate) use instance_args;

/// Per-call parsing state
#[derive(Debug)]
pub struct ParseContext<'a, T> {
    codec: &'static str,
    args: &'a [Arg<T>],
    issues: Vec<Issue>,
}

impl<'a, T> ParseContext<'a, T> {
    pub fn new(codec: &'static str, args: &'a [Arg<T>]) -> Self {
        Self {
            codec,
            args,
            issues: Vec::new(),
        }
    }

    pub fn codec(&self) -> &'static str {
        self.codec
    }

    pub fn args(&self) -> &'a [Arg<T>] {
        self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Record a secondary issue without aborting the parse
    pub fn record(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    fn finish(mut self, result: Result<T, Issue>) -> Result<T, CodecError> {
        match result {
            Ok(value) => Ok(value),
            Err(issue) => {
                if !self.issues.contains(&issue) {
                    self.issues.push(issue);
                }
                let primary = self.issues[0].clone();
                trace_log!("{} rejected input: {}", self.codec, primary.code());
                Err(CodecError {
                    codec: self.codec,
                    issue: primary,
                    issues: self.issues,
                })
            }
        }
    }
}

/// Run one parse over `args` and fold its outcome into a `CodecError` on failure
pub fn run<T, F>(codec: &'static str, args: &Args<T>, parse: F) -> Result<T, CodecError>
where
    F: FnOnce(&mut ParseContext<'_, T>) -> Result<T, Issue>,
{
    let mut ctx = ParseContext::new(codec, args.as_slice());
    let result = parse(&mut ctx);
    ctx.finish(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_split_into_int_and_float() {
        let arg: Arg<()> = Arg::from(json!(5));
        assert_eq!(arg, Arg::Int(5));

        let arg: Arg<()> = Arg::from(json!(5.5));
        assert_eq!(arg, Arg::Float(5.5));
        assert_eq!(arg.kind(), ArgKind::Number);
    }

    #[test]
    fn test_tuple_becomes_positional_args() {
        let args: Args<()> = Args::from((2004, 10, "plus"));
        assert_eq!(args.len(), 3);
        assert_eq!(args.as_slice()[2], Arg::Text("plus".to_string()));
    }

    #[test]
    fn test_run_reports_first_recorded_issue() {
        let args: Args<()> = Args::from("x");
        let err = run("Test", &args, |ctx| {
            ctx.record(Issue::MissingKeys {
                keys: vec!["a".to_string()],
            });
            Err(Issue::invalid_timezone("x"))
        })
        .unwrap_err();

        assert_eq!(err.code(), "missing_keys");
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn test_cast_drops_instances() {
        let arg: Arg<u8> = Arg::Instance(1);
        assert!(arg.cast::<()>().is_none());

        let arg: Arg<u8> = Arg::Int(1);
        assert_eq!(arg.cast::<()>(), Some(Arg::Int(1)));
    }
}
