//! Character string codecs: `character(n)`, `character varying(n)`, `name`
//! and `text`
//!
//! Lengths are counted in characters except for `name`, whose limit is in
//! bytes. Over-long input is accepted only when the excess is all spaces,
//! which are then dropped.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::context::{self, Arg, Args, ParseContext};
use crate::errors::CodecError;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::traits::{value_object, PgCodec};

use super::single_arg;

const ACCEPTS: &[ArgKind] = &[ArgKind::String, ArgKind::Number, ArgKind::Instance];

/// Default byte limit of an identifier (`NAMEDATALEN - 1`)
pub const NAME_MAX_LENGTH: usize = 63;

fn reject_nul(text: &str) -> Result<(), Issue> {
    if text.contains('\0') {
        return Err(Issue::invalid_string("text without NUL characters", text.replace('\0', "\\0")));
    }
    Ok(())
}

/// Raw text of the single argument; numbers are accepted in their decimal form
fn text_arg<T>(ctx: &ParseContext<'_, T>, text_of: fn(&T) -> &str) -> Result<String, Issue> {
    let text = match single_arg(ctx)? {
        Arg::Text(s) => s.clone(),
        Arg::Int(v) => v.to_string(),
        Arg::Float(v) => v.to_string(),
        Arg::Instance(v) => text_of(v).to_string(),
        other => {
            return Err(Issue::InvalidType {
                expected: ACCEPTS.to_vec(),
                received: other.kind(),
            })
        }
    };
    reject_nul(&text)?;
    Ok(text)
}

/// Cut `text` to `n` characters when everything past `n` is spaces
fn fit(text: &str, n: usize) -> Result<String, Issue> {
    let len = text.chars().count();
    if len <= n {
        return Ok(text.to_string());
    }
    let cut = text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len());
    if text[cut..].chars().all(|c| c == ' ') {
        Ok(text[..cut].to_string())
    } else {
        Err(Issue::too_big(SizeKind::Length, None, n, true, len))
    }
}

fn pad(text: String, n: usize) -> String {
    let len = text.chars().count();
    if len >= n {
        text
    } else {
        format!("{}{}", text, " ".repeat(n - len))
    }
}

macro_rules! string_value {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.text)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.text)
            }
        }
    };
}

/// Panic wrapper shared by the configured codecs
fn expect<T>(result: Result<T, CodecError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// `character(n)`, blank-padded to `n`; `n` defaults to 1
#[derive(Debug, Clone, Eq)]
pub struct Character {
    text: String,
    n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCodec {
    n: usize,
}

impl Character {
    pub fn set_n(n: usize) -> CharacterCodec {
        CharacterCodec { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Padded text as stored
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text without the trailing pad
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches(' ')
    }

    fn build(ctx: &ParseContext<'_, Self>, n: usize) -> Result<Self, Issue> {
        let text = text_arg(ctx, Character::as_str)?;
        Ok(Character {
            text: pad(fit(&text, n)?, n),
            n,
        })
    }
}

impl CharacterCodec {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn safe_from(&self, input: impl Into<Args<Character>>) -> Result<Character, CodecError> {
        let n = self.n;
        context::run(Character::TYPE_NAME, &input.into(), |ctx| Character::build(ctx, n))
    }

    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    pub fn expect_from(&self, input: impl Into<Args<Character>>) -> Character {
        expect(self.safe_from(input))
    }
}

/// Trailing spaces are insignificant
impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

string_value!(Character);

impl PgCodec for Character {
    const TYPE_NAME: &'static str = "Character";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        Character::build(ctx, 1)
    }

    fn reparse(&self, args: Args<Self>) -> Result<Self, CodecError> {
        Character::set_n(self.n).safe_from(args)
    }
}

/// `character varying(n)`; unbounded unless `n` is set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterVarying {
    text: String,
    n: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterVaryingCodec {
    n: usize,
}

impl CharacterVarying {
    pub fn set_n(n: usize) -> CharacterVaryingCodec {
        CharacterVaryingCodec { n }
    }

    pub fn n(&self) -> Option<usize> {
        self.n
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn build(ctx: &ParseContext<'_, Self>, n: Option<usize>) -> Result<Self, Issue> {
        let text = text_arg(ctx, CharacterVarying::as_str)?;
        let text = match n {
            Some(n) => fit(&text, n)?,
            None => text,
        };
        Ok(CharacterVarying { text, n })
    }
}

impl CharacterVaryingCodec {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn safe_from(&self, input: impl Into<Args<CharacterVarying>>) -> Result<CharacterVarying, CodecError> {
        let n = self.n;
        context::run(CharacterVarying::TYPE_NAME, &input.into(), |ctx| {
            CharacterVarying::build(ctx, Some(n))
        })
    }

    /// # Panics
    ///
    /// Panics with the issue message when `input` is rejected.
    pub fn expect_from(&self, input: impl Into<Args<CharacterVarying>>) -> CharacterVarying {
        expect(self.safe_from(input))
    }
}

string_value!(CharacterVarying);

impl PgCodec for CharacterVarying {
    const TYPE_NAME: &'static str = "CharacterVarying";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        CharacterVarying::build(ctx, None)
    }

    fn reparse(&self, args: Args<Self>) -> Result<Self, CodecError> {
        match self.n {
            Some(n) => CharacterVarying::set_n(n).safe_from(args),
            None => CharacterVarying::safe_from(args),
        }
    }
}

/// Identifier type, limited in bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    text: String,
}

impl Name {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parse with a byte limit other than the default 63
    pub fn with_max_length(input: &str, max: usize) -> Result<Self, CodecError> {
        let args: Args<Name> = input.into();
        context::run(Self::TYPE_NAME, &args, |ctx| Name::build(ctx, max))
    }

    fn build(ctx: &ParseContext<'_, Self>, max: usize) -> Result<Self, Issue> {
        let text = text_arg(ctx, Name::as_str)?;
        if text.len() > max {
            return Err(Issue::too_big(SizeKind::Length, None, max, true, text.len()));
        }
        Ok(Name { text })
    }
}

string_value!(Name);

impl PgCodec for Name {
    const TYPE_NAME: &'static str = "Name";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        Name::build(ctx, NAME_MAX_LENGTH)
    }
}

/// Unlimited text; NUL is the only rejected character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

string_value!(Text);

impl PgCodec for Text {
    const TYPE_NAME: &'static str = "Text";
    const ACCEPTS: &'static [ArgKind] = ACCEPTS;

    fn parse(ctx: &mut ParseContext<'_, Self>) -> Result<Self, Issue> {
        text_arg(ctx, Text::as_str).map(|text| Text { text })
    }
}

value_object!(Character, CharacterVarying, Name, Text);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_character_pads_and_trims() {
        let codec = Character::set_n(5);
        let value = codec.expect_from("ab");
        assert_eq!(value.to_string(), "ab   ");
        assert_eq!(value.trimmed(), "ab");

        assert_eq!(codec.expect_from("abc     ").to_string(), "abc  ");
        let err = codec.safe_from("abcdef").unwrap_err();
        assert_eq!(err.code(), "too_big");
        assert_eq!(err.message(), "Length must be less than or equal to 5, received 6");

        assert!(value.equals("ab"));
        assert!(value.equals("ab "));
        assert_eq!(Character::expect_from("x").n(), 1);
    }

    #[test]
    fn test_character_varying_limit() {
        let codec = CharacterVarying::set_n(3);
        assert_eq!(codec.expect_from("héé").as_str(), "héé");
        assert_eq!(codec.expect_from("ab  ").as_str(), "ab ");
        assert_eq!(codec.safe_from("abcd").unwrap_err().code(), "too_big");
        assert_eq!(CharacterVarying::expect_from("anything at all").n(), None);
        assert_eq!(CharacterVarying::expect_from(12).as_str(), "12");
    }

    #[test]
    fn test_setter_keeps_modifier() {
        let mut value = CharacterVarying::set_n(2).expect_from("ab");
        assert!(value.set_value("abc").is_err());
        assert_eq!(value.as_str(), "ab");
    }

    #[test]
    fn test_name_byte_limit() {
        let name = "a".repeat(63);
        assert_eq!(Name::expect_from(name.as_str()).as_str().len(), 63);

        let err = Name::safe_from("a".repeat(64)).unwrap_err();
        assert_eq!(err.code(), "too_big");

        // Multi-byte characters count by bytes
        let wide = "é".repeat(32);
        assert_eq!(Name::safe_from(wide.as_str()).unwrap_err().code(), "too_big");
        assert!(Name::with_max_length("abcd", 3).is_err());
    }

    #[test]
    fn test_text_rejects_nul() {
        assert_eq!(Text::expect_from("hello").len(), 5);
        assert_eq!(Text::safe_from("a\0b").unwrap_err().code(), "invalid_string");
        assert_eq!(Text::safe_from(serde_json::json!(null)).unwrap_err().code(), "invalid_type");
    }
}
