//! Convenience re-exports for working with the codecs
//!
//! ```rust
//! use type_codec::prelude::*;
//!
//! let point = Point::expect_from("(1,2)");
//! assert_eq!(point.x(), 1.0);
//! ```

// Codec surface
pub use crate::context::{Arg, Args, NativeTime};
pub use crate::errors::CodecError;
pub use crate::issue::{ArgKind, Issue, SizeKind};
pub use crate::traits::PgCodec;

// Scalar codecs
pub use crate::scalar::{
    Bit, BitCodec, BitVarying, BitVaryingCodec, Boolean, Character, CharacterCodec,
    CharacterVarying, CharacterVaryingCodec, Float4, Float8, Int2, Int4, Int8, Money, Name,
    Numeric, Oid, Text, Uuid,
};

// Temporal codecs
pub use crate::temporal::{
    Date, Direction, Interval, Offset, Style, Time, TimeTZ, Timestamp, TimestampTZ,
};

// Ranges
pub use crate::range::{
    DateMultiRange, DateRange, Int4MultiRange, Int4Range, Int8MultiRange, Int8Range, MultiRange,
    NumMultiRange, NumRange, Range, RangeElement, TsMultiRange, TsRange, TsTzMultiRange, TsTzRange,
};

// Geometric codecs
pub use crate::geometric::{
    Circle, Line, LineSegment, Path, PathConnection, PgBox, Point, Polygon,
};
