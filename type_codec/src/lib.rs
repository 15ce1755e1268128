//! # type-codec
//!
//! Text-format codecs for PostgreSQL scalar, temporal, range and geometric
//! types. Every type is a validated value object implementing [`PgCodec`]:
//!
//! ```rust
//! use type_codec::prelude::*;
//!
//! let ts = TimestampTZ::expect_from("2004-10-19 10:23:54.678 EST");
//! assert!(ts.equals("2004-10-19 15:23:54.678Z"));
//!
//! let ranges = Int4MultiRange::expect_from("{[1,3),[2,5)}");
//! assert_eq!(ranges.to_string(), "{[1,5)}");
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

pub mod context;
pub mod errors;
pub mod geometric;
pub mod grammar;
pub mod issue;
pub mod object;
pub mod prelude;
pub mod range;
pub mod scalar;
pub mod temporal;
pub mod traits;
pub mod validation;

pub use context::{Arg, Args, NativeTime, ParseContext};
pub use errors::CodecError;
pub use issue::{ArgKind, Issue, Limit, SizeKind};
pub use traits::PgCodec;

pub use geometric::{Circle, Line, LineSegment, Path, PathConnection, PgBox, Point, Polygon};
pub use range::{
    DateMultiRange, DateRange, Int4MultiRange, Int4Range, Int8MultiRange, Int8Range, MultiRange,
    NumMultiRange, NumRange, Range, RangeElement, TsMultiRange, TsRange, TsTzMultiRange, TsTzRange,
};
pub use scalar::{
    Bit, BitCodec, BitVarying, BitVaryingCodec, Boolean, Character, CharacterCodec,
    CharacterVarying, CharacterVaryingCodec, Float4, Float8, Int2, Int4, Int8, Money, Name,
    Numeric, Oid, Text, Uuid,
};
pub use temporal::{
    Date, Direction, Interval, Offset, Style, Time, TimeTZ, Timestamp, TimestampTZ,
};
