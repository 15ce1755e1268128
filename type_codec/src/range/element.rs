use std::cmp::Ordering;

use crate::context::{Arg, Args};
use crate::issue::Issue;
use crate::scalar::{Int4, Int8, Numeric};
use crate::temporal::{Date, Timestamp, TimestampTZ};
use crate::traits::PgCodec;

/// A codec usable as the element type of a range
pub trait RangeElement: PgCodec {
    const RANGE_NAME: &'static str;
    const MULTIRANGE_NAME: &'static str;

    /// Discrete types have a successor and are canonicalised to `[a,b)`
    const DISCRETE: bool = false;

    fn compare(&self, other: &Self) -> Ordering;

    /// Next representable value; `None` for continuous types or at the maximum
    fn successor(&self) -> Option<Self> {
        None
    }

    /// Parse one bound, reporting the element codec's primary issue
    fn parse_bound(arg: Arg<Self>) -> Result<Self, Issue> {
        Self::safe_from(Args::one(arg)).map_err(|err| err.issue)
    }
}

impl RangeElement for Int4 {
    const RANGE_NAME: &'static str = "Int4Range";
    const MULTIRANGE_NAME: &'static str = "Int4MultiRange";
    const DISCRETE: bool = true;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn successor(&self) -> Option<Self> {
        self.get().checked_add(1).map(Int4::new)
    }
}

impl RangeElement for Int8 {
    const RANGE_NAME: &'static str = "Int8Range";
    const MULTIRANGE_NAME: &'static str = "Int8MultiRange";
    const DISCRETE: bool = true;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn successor(&self) -> Option<Self> {
        self.get().checked_add(1).map(Int8::new)
    }
}

impl RangeElement for Numeric {
    const RANGE_NAME: &'static str = "NumRange";
    const MULTIRANGE_NAME: &'static str = "NumMultiRange";

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RangeElement for Date {
    const RANGE_NAME: &'static str = "DateRange";
    const MULTIRANGE_NAME: &'static str = "DateMultiRange";
    const DISCRETE: bool = true;

    fn compare(&self, other: &Self) -> Ordering {
        self.days_since_epoch().cmp(&other.days_since_epoch())
    }

    fn successor(&self) -> Option<Self> {
        Date::from_days(self.days_since_epoch() + 1).ok()
    }
}

impl RangeElement for Timestamp {
    const RANGE_NAME: &'static str = "TsRange";
    const MULTIRANGE_NAME: &'static str = "TsMultiRange";

    fn compare(&self, other: &Self) -> Ordering {
        self.to_micros().cmp(&other.to_micros())
    }
}

impl RangeElement for TimestampTZ {
    const RANGE_NAME: &'static str = "TsTzRange";
    const MULTIRANGE_NAME: &'static str = "TsTzMultiRange";

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}
