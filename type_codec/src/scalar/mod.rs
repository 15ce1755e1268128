//! Scalar codecs
//!
//! Booleans, fixed-width integers, floating point, arbitrary precision
//! numeric, money, bit strings, character strings and UUIDs. Parameterised
//! types (`bit(n)`, `varchar(n)`, ...) are configured through `set_n`, which
//! returns a codec carrying the type modifier.

mod bit;
mod boolean;
mod character;
mod float;
mod integer;
mod money;
mod numeric;
mod uuid;

pub use bit::{Bit, BitCodec, BitVarying, BitVaryingCodec};
pub use boolean::Boolean;
pub use character::{Character, CharacterCodec, CharacterVarying, CharacterVaryingCodec, Name, Text};
pub use float::{Float4, Float8};
pub use integer::{Int2, Int4, Int8, Oid};
pub use money::Money;
pub use numeric::Numeric;
pub use self::uuid::Uuid;

use crate::context::{Arg, ParseContext};
use crate::issue::{Issue, SizeKind};

/// The single argument of a codec without a positional form
pub(crate) fn single_arg<'a, T>(ctx: &ParseContext<'a, T>) -> Result<&'a Arg<T>, Issue> {
    match ctx.args() {
        [arg] => Ok(arg),
        [] => Err(Issue::too_small(SizeKind::Arguments, None, 1usize, true, 0usize)),
        args => Err(Issue::too_big(SizeKind::Arguments, None, 1usize, true, args.len())),
    }
}
