//! `boolean` codec

use serde::Serialize;
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue};
use crate::traits::{value_object, PgCodec};
use crate::validation::whole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Boolean {
    value: bool,
}

impl Boolean {
    pub const TRUE: Boolean = Boolean { value: true };
    pub const FALSE: Boolean = Boolean { value: false };

    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    pub fn to_number(&self) -> f64 {
        if self.value { 1.0 } else { 0.0 }
    }
}

/// Server spellings: unique prefixes of `true`/`false`/`yes`/`no`, `on`/`off`, `1`/`0`
fn parse_literal(text: &str) -> Option<bool> {
    let lower = text.trim().to_ascii_lowercase();
    let prefix_of = |word: &str, min: usize| lower.len() >= min && word.starts_with(lower.as_str());
    if prefix_of("true", 1) || prefix_of("yes", 1) || lower == "on" || lower == "1" {
        Some(true)
    } else if prefix_of("false", 1) || prefix_of("no", 1) || prefix_of("off", 2) || lower == "0" {
        Some(false)
    } else {
        None
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Boolean::new(value)
    }
}

impl From<Boolean> for bool {
    fn from(value: Boolean) -> Self {
        value.value
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.value { "t" } else { "f" })
    }
}

impl PgCodec for Boolean {
    const TYPE_NAME: &'static str = "Boolean";
    const ACCEPTS: &'static [ArgKind] = &[
        ArgKind::Boolean,
        ArgKind::Number,
        ArgKind::String,
        ArgKind::Instance,
    ];

    fn from_bool(_ctx: &mut ParseContext<'_, Self>, value: bool) -> Result<Self, Issue> {
        Ok(Boolean::new(value))
    }

    fn from_int(_ctx: &mut ParseContext<'_, Self>, value: i64) -> Result<Self, Issue> {
        Ok(Boolean::new(value != 0))
    }

    fn from_float(_ctx: &mut ParseContext<'_, Self>, value: f64) -> Result<Self, Issue> {
        Ok(Boolean::new(whole(None, value)? != 0.0))
    }

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        parse_literal(text)
            .map(Boolean::new)
            .ok_or_else(|| Issue::invalid_string("boolean", text))
    }
}

value_object!(Boolean);
