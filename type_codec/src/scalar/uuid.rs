//! `uuid` codec

use serde::{Serialize, Serializer};
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue};
use crate::traits::{value_object, PgCodec};

/// Accepts hyphenated, simple, braced and URN forms; renders lowercase hyphenated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid {
    value: ::uuid::Uuid,
}

impl Uuid {
    pub const NIL: Uuid = Uuid {
        value: ::uuid::Uuid::nil(),
    };

    pub fn new_v4() -> Self {
        Self {
            value: ::uuid::Uuid::new_v4(),
        }
    }

    pub fn get(&self) -> ::uuid::Uuid {
        self.value
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.value.as_bytes()
    }
}

impl From<::uuid::Uuid> for Uuid {
    fn from(value: ::uuid::Uuid) -> Self {
        Self { value }
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.hyphenated())
    }
}

impl Serialize for Uuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl PgCodec for Uuid {
    const TYPE_NAME: &'static str = "Uuid";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Instance];

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        ::uuid::Uuid::parse_str(text.trim())
            .map(Uuid::from)
            .map_err(|_| Issue::invalid_string("uuid", text))
    }
}

value_object!(Uuid);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepted_forms() {
        let expected = "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11";
        for input in [
            "A0EEBC99-9C0B-4EF8-BB6D-6BB9BD380A11",
            "{a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11}",
            "a0eebc999c0b4ef8bb6d6bb9bd380a11",
            "urn:uuid:a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
        ] {
            assert_eq!(Uuid::expect_from(input).to_string(), expected, "{}", input);
        }
    }

    #[test]
    fn test_invalid_and_equality() {
        assert_eq!(Uuid::safe_from("not-a-uuid").unwrap_err().code(), "invalid_string");
        assert_eq!(Uuid::safe_from(1).unwrap_err().code(), "invalid_type");

        let value = Uuid::new_v4();
        assert!(value.equals(value.to_string().to_uppercase()));
        assert!(Uuid::NIL.equals("00000000-0000-0000-0000-000000000000"));
    }
}
