//! Codec trait
//!
//! `PgCodec` is the uniform value-object surface shared by every PostgreSQL
//! type in this crate. Implementors supply the shape hooks they accept; the
//! provided methods build `safe_from`, equality and the setters on top.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{self, Arg, Args, NativeTime, ParseContext};
use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue, SizeKind};

/// Text codec and value object for one PostgreSQL type
pub trait PgCodec: Sized + Clone + PartialEq + fmt::Display + Serialize {
    /// Name used in error reports, e.g. `TimestampTZ`
    const TYPE_NAME: &'static str;

    /// Input shapes accepted as a single argument
    const ACCEPTS: &'static [ArgKind];

    /// Inclusive bounds on the positional-argument form, if the codec has one
    const POSITIONAL: Option<(usize, usize)> = None;

    /// Parse the context's arguments into a value
    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        dispatch(ctx)
    }

    fn from_int(ctx: &mut ParseContext<'_, Self>, value: i64) -> Result<Self, Issue> {
        Self::from_float(ctx, value as f64)
    }

    fn from_float(ctx: &mut ParseContext<'_, Self>, _value: f64) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::Number))
    }

    fn from_bool(ctx: &mut ParseContext<'_, Self>, _value: bool) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::Boolean))
    }

    fn from_text(ctx: &mut ParseContext<'_, Self>, _text: &str) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::String))
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, _object: &Map<String, Value>) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::Object))
    }

    fn from_array(ctx: &mut ParseContext<'_, Self>, _items: &[Value]) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::Array))
    }

    fn from_native(ctx: &mut ParseContext<'_, Self>, _native: &NativeTime) -> Result<Self, Issue> {
        Err(ctx.invalid_type(ArgKind::Date))
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        Err(Issue::too_big(SizeKind::Arguments, None, 1usize, true, args.len()))
    }

    /// Parse `input`, reporting any failure as a structured error
    fn safe_from(input: impl Into<Args<Self>>) -> Result<Self, CodecError> {
        let args = input.into();
        context::run(Self::TYPE_NAME, &args, Self::parse)
    }

    /// Parse `input` that is known to be valid
    ///
    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    fn expect_from(input: impl Into<Args<Self>>) -> Self {
        match Self::safe_from(input) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Re-parse `args` with the same type modifiers as `self`
    fn reparse(&self, args: Args<Self>) -> Result<Self, CodecError> {
        Self::safe_from(args)
    }

    /// Compare against `input` in canonical form
    fn safe_equals(&self, input: impl Into<Args<Self>>) -> Result<bool, CodecError> {
        let other = self.reparse(input.into())?;
        Ok(*self == other)
    }

    /// Compare against `input` that is known to be valid
    ///
    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    fn equals(&self, input: impl Into<Args<Self>>) -> bool {
        match self.safe_equals(input) {
            Ok(equal) => equal,
            Err(err) => panic!("{}", err),
        }
    }

    /// Canonical text sent to and received from the database driver
    fn value(&self) -> String {
        self.to_string()
    }

    /// Alias of [`PgCodec::value`]
    fn postgres(&self) -> String {
        self.value()
    }

    /// Replace every field by re-parsing `input`; `self` is untouched on failure
    fn set_value(&mut self, input: impl Into<Args<Self>>) -> Result<(), CodecError> {
        let next = self.reparse(input.into())?;
        *self = next;
        Ok(())
    }

    /// Alias of [`PgCodec::set_value`]
    fn set_postgres(&mut self, input: impl Into<Args<Self>>) -> Result<(), CodecError> {
        self.set_value(input)
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Replace one field of the JSON shape and re-validate the whole value
    fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), CodecError> {
        let mut json = self.to_json();
        let Some(map) = json.as_object_mut() else {
            return Err(CodecError::new(
                Self::TYPE_NAME,
                Issue::InvalidType {
                    expected: vec![ArgKind::Object],
                    received: context::json_kind(&json),
                },
            ));
        };
        map.insert(field.to_string(), value.into());
        self.set_value(Args::one(Arg::Object(map.clone())))
    }
}

impl<T: PgCodec> ParseContext<'_, T> {
    /// `invalid_type` issue listing the shapes this codec accepts
    pub fn invalid_type(&self, received: ArgKind) -> Issue {
        Issue::InvalidType {
            expected: T::ACCEPTS.to_vec(),
            received,
        }
    }
}

/// Default shape dispatch: number, string, object, array, native, instance
pub fn dispatch<T: PgCodec>(ctx: &mut ParseContext<'_, T>) -> Result<T, Issue> {
    let args = ctx.args();
    match args.len() {
        0 => Err(Issue::too_small(SizeKind::Arguments, None, 1usize, true, 0usize)),
        1 => match &args[0] {
            Arg::Int(v) => T::from_int(ctx, *v),
            Arg::Float(v) => T::from_float(ctx, *v),
            Arg::Text(s) => T::from_text(ctx, s),
            Arg::Object(m) => T::from_object(ctx, m),
            Arg::Array(a) => T::from_array(ctx, a),
            Arg::Native(n) => T::from_native(ctx, n),
            Arg::Instance(v) => Ok(v.clone()),
            Arg::Bool(b) => T::from_bool(ctx, *b),
            Arg::Null => Err(ctx.invalid_type(ArgKind::Null)),
        },
        n => match T::POSITIONAL {
            None => Err(Issue::too_big(SizeKind::Arguments, None, 1usize, true, n)),
            Some((min, _)) if n < min => Err(Issue::too_small(SizeKind::Arguments, None, min, true, n)),
            Some((_, max)) if n > max => Err(Issue::too_big(SizeKind::Arguments, None, max, true, n)),
            Some(_) => T::from_arguments(ctx, args),
        },
    }
}

/// `FromStr` and same-codec instance conversions for a value type
macro_rules! value_object {
    ($($ty:ty),* $(,)?) => {
        $(
            $crate::context::instance_args!($ty);

            impl std::str::FromStr for $ty {
                type Err = $crate::errors::CodecError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as $crate::traits::PgCodec>::safe_from(s)
                }
            }
        )*
    };
}

pub(crate) use value_object;
