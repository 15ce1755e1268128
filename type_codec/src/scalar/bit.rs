//! `bit(n)` and `bit varying(n)` codecs
//!
//! Both accept a `0`/`1` string, hex input such as `x1F`, or a non-negative
//! integer which is written in binary. Values expose three projections: the
//! value object itself, the raw bit string and the numeric value.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::context::{self, Arg, Args, ParseContext};
use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::traits::{value_object, PgCodec};
use crate::validation::whole;

use super::single_arg;

const ACCEPTS: &[ArgKind] = &[ArgKind::Number, ArgKind::String, ArgKind::Instance];

/// How the declared width constrains a bit string
#[derive(Debug, Clone, Copy)]
enum Width {
    /// `bit(n)`: exactly n bits, numbers are zero-padded
    Exact(usize),
    /// `bit varying(n)`: at most n bits
    AtMost(usize),
    Unbounded,
}

impl Width {
    fn limit(&self) -> Option<usize> {
        match self {
            Width::Exact(n) | Width::AtMost(n) => Some(*n),
            Width::Unbounded => None,
        }
    }
}

fn from_hex(text: &str, original: &str) -> Result<String, Issue> {
    text.chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| format!("{:04b}", d))
                .ok_or_else(|| Issue::invalid_string("hexadecimal bit string", original))
        })
        .collect()
}

fn check_text(text: &str, width: Width) -> Result<String, Issue> {
    let trimmed = text.trim();
    let bits = match trimmed.chars().next() {
        Some('x') | Some('X') => from_hex(&trimmed[1..], text)?,
        Some('b') | Some('B') => trimmed[1..].to_string(),
        _ => trimmed.to_string(),
    };
    if !bits.chars().all(|c| c == '0' || c == '1') {
        return Err(Issue::invalid_string("bit string of 0 and 1", text));
    }

    let len = bits.len();
    match width {
        Width::Exact(n) if len < n => Err(Issue::too_small(SizeKind::Length, None, n, true, len)),
        Width::Exact(n) | Width::AtMost(n) if len > n => {
            Err(Issue::too_big(SizeKind::Length, None, n, true, len))
        }
        _ => Ok(bits),
    }
}

fn check_number(value: f64, width: Width) -> Result<String, Issue> {
    let value = whole(None, value)?;
    if value < 0.0 {
        return Err(Issue::too_small(SizeKind::Number, None, 0i64, true, value));
    }
    if value >= u64::MAX as f64 {
        return Err(Issue::too_big(SizeKind::Number, None, u64::MAX as i128, true, value));
    }
    let binary = format!("{:b}", value as u64);
    match width.limit() {
        Some(n) if binary.len() > n => {
            let max = if n >= 127 { i128::MAX } else { (1i128 << n) - 1 };
            Err(Issue::too_big(SizeKind::Number, None, max, true, value as u64 as i128))
        }
        _ => Ok(match width {
            Width::Exact(n) => format!("{:0>n$}", binary, n = n),
            _ => binary,
        }),
    }
}

fn parse_bits<T>(ctx: &ParseContext<'_, T>, width: Width, bits_of: fn(&T) -> &str) -> Result<String, Issue> {
    match single_arg(ctx)? {
        Arg::Int(v) => check_number(*v as f64, width),
        Arg::Float(v) => check_number(*v, width),
        Arg::Text(s) => check_text(s, width),
        Arg::Instance(v) => check_text(bits_of(v), width),
        other => Err(Issue::InvalidType {
            expected: ACCEPTS.to_vec(),
            received: other.kind(),
        }),
    }
}

fn to_u64(bits: &str) -> Option<u64> {
    match bits {
        "" => Some(0),
        _ => u64::from_str_radix(bits, 2).ok(),
    }
}

fn to_number(bits: &str) -> f64 {
    bits.chars()
        .fold(0.0, |acc, c| acc * 2.0 + if c == '1' { 1.0 } else { 0.0 })
}

/// `bit(n)`; `n` defaults to 1
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bit {
    bits: String,
    n: usize,
}

/// `bit(n)` codec with its width applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitCodec {
    n: usize,
}

impl Bit {
    pub fn set_n(n: usize) -> BitCodec {
        BitCodec { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    /// `None` when wider than 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        to_u64(&self.bits)
    }

    pub fn to_number(&self) -> f64 {
        to_number(&self.bits)
    }
}

impl BitCodec {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn safe_from(&self, input: impl Into<Args<Bit>>) -> Result<Bit, CodecError> {
        let n = self.n;
        context::run(Bit::TYPE_NAME, &input.into(), |ctx| {
            parse_bits(ctx, Width::Exact(n), Bit::bits).map(|bits| Bit { bits, n })
        })
    }

    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    pub fn expect_from(&self, input: impl Into<Args<Bit>>) -> Bit {
        match self.safe_from(input) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl Serialize for Bit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bits)
    }
}

impl PgCodec for Bit {
    const TYPE_NAME: &'static str = "Bit";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        parse_bits(ctx, Width::Exact(1), Bit::bits).map(|bits| Bit { bits, n: 1 })
    }

    fn reparse(&self, args: Args<Self>) -> Result<Self, CodecError> {
        Bit::set_n(self.n).safe_from(args)
    }
}

/// `bit varying(n)`; unbounded unless `n` is set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVarying {
    bits: String,
    n: Option<usize>,
}

/// `bit varying(n)` codec with its maximum width applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitVaryingCodec {
    n: usize,
}

impl BitVarying {
    pub fn set_n(n: usize) -> BitVaryingCodec {
        BitVaryingCodec { n }
    }

    pub fn n(&self) -> Option<usize> {
        self.n
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn to_u64(&self) -> Option<u64> {
        to_u64(&self.bits)
    }

    pub fn to_number(&self) -> f64 {
        to_number(&self.bits)
    }
}

impl BitVaryingCodec {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn safe_from(&self, input: impl Into<Args<BitVarying>>) -> Result<BitVarying, CodecError> {
        let n = self.n;
        context::run(BitVarying::TYPE_NAME, &input.into(), |ctx| {
            parse_bits(ctx, Width::AtMost(n), BitVarying::bits).map(|bits| BitVarying { bits, n: Some(n) })
        })
    }

    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    pub fn expect_from(&self, input: impl Into<Args<BitVarying>>) -> BitVarying {
        match self.safe_from(input) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl fmt::Display for BitVarying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl Serialize for BitVarying {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bits)
    }
}

impl PgCodec for BitVarying {
    const TYPE_NAME: &'static str = "BitVarying";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        parse_bits(ctx, Width::Unbounded, BitVarying::bits).map(|bits| BitVarying { bits, n: None })
    }

    fn reparse(&self, args: Args<Self>) -> Result<Self, CodecError> {
        match self.n {
            Some(n) => BitVarying::set_n(n).safe_from(args),
            None => BitVarying::safe_from(args),
        }
    }
}

value_object!(Bit, BitVarying);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Limit;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bit_varying_width_from_number() {
        let codec = BitVarying::set_n(3);
        let value = codec.expect_from(4);
        assert_eq!(value.to_string(), "100");
        assert_eq!(value.len(), 3);

        let err = codec.safe_from(8).unwrap_err();
        assert_eq!(err.code(), "too_big");
        match err.issue {
            Issue::TooBig { maximum, received, .. } => {
                assert_eq!(maximum, Limit::Integer(7));
                assert_eq!(received, Limit::Integer(8));
            }
            other => panic!("unexpected issue {:?}", other),
        }
    }

    #[test]
    fn test_bit_is_fixed_width() {
        let codec = Bit::set_n(4);
        assert_eq!(codec.expect_from(5).to_string(), "0101");
        assert_eq!(codec.expect_from("1010").to_u64(), Some(10));

        let err = codec.safe_from("101").unwrap_err();
        assert_eq!(err.code(), "too_small");
        let err = codec.safe_from("10101").unwrap_err();
        assert_eq!(err.code(), "too_big");

        assert_eq!(Bit::expect_from("1").n(), 1);
        assert_eq!(Bit::safe_from("10").unwrap_err().code(), "too_big");
    }

    #[test]
    fn test_projections() {
        let value = BitVarying::expect_from("x1F");
        assert_eq!(value.bits(), "00011111");
        assert_eq!(value.to_number(), 31.0);
        assert_eq!(value.to_json(), serde_json::json!("00011111"));
        assert_eq!(BitVarying::expect_from("").to_u64(), Some(0));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(BitVarying::safe_from("102").unwrap_err().code(), "invalid_string");
        assert_eq!(BitVarying::safe_from(-1).unwrap_err().code(), "too_small");
        assert_eq!(BitVarying::safe_from(1.5).unwrap_err().code(), "not_whole");
        assert_eq!(BitVarying::safe_from(true).unwrap_err().code(), "invalid_type");
    }

    #[test]
    fn test_setters_keep_width() {
        let mut value = Bit::set_n(3).expect_from("101");
        assert!(value.set_value("1111").is_err());
        assert_eq!(value.bits(), "101");
        value.set_value(2).unwrap();
        assert_eq!(value.to_string(), "010");
        assert!(value.equals("010"));
    }
}
