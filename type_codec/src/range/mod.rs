//! Range and multirange composition
//!
//! [`Range`] and [`MultiRange`] are written once over any [`RangeElement`].
//! Discrete element types are canonicalised to `[a,b)` so that adjacency is a
//! plain equality between one range's upper bound and the next one's lower.

mod element;
mod literal;
mod multirange;
#[allow(clippy::module_inception)]
mod range;

pub use element::RangeElement;
pub use multirange::MultiRange;
pub use range::Range;

use crate::scalar::{Int4, Int8, Numeric};
use crate::temporal::{Date, Timestamp, TimestampTZ};

pub type Int4Range = Range<Int4>;
pub type Int8Range = Range<Int8>;
pub type NumRange = Range<Numeric>;
pub type DateRange = Range<Date>;
pub type TsRange = Range<Timestamp>;
pub type TsTzRange = Range<TimestampTZ>;

pub type Int4MultiRange = MultiRange<Int4>;
pub type Int8MultiRange = MultiRange<Int8>;
pub type NumMultiRange = MultiRange<Numeric>;
pub type DateMultiRange = MultiRange<Date>;
pub type TsMultiRange = MultiRange<Timestamp>;
pub type TsTzMultiRange = MultiRange<TimestampTZ>;
