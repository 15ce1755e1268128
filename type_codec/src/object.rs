//! Object input module
//!
//! Plain-object inputs must match a codec's JSON shape exactly: every required
//! key present, no unknown keys, each key holding the expected JSON type.

use serde_json::{Map, Value};

use crate::context::{json_kind, ParseContext};
use crate::issue::{ArgKind, Issue};

/// Key-checked view over an object input
#[derive(Debug, Clone, Copy)]
pub struct Fields<'m> {
    map: &'m Map<String, Value>,
}

/// Check the key set of `map`, recording both missing and unrecognized keys
pub fn expect_keys<'m, T>(
    ctx: &mut ParseContext<'_, T>,
    map: &'m Map<String, Value>,
    required: &[&str],
    optional: &[&str],
) -> Result<Fields<'m>, Issue> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let unrecognized: Vec<String> = map
        .keys()
        .filter(|key| !required.contains(&key.as_str()) && !optional.contains(&key.as_str()))
        .cloned()
        .collect();

    let mut found = Vec::new();
    if !missing.is_empty() {
        found.push(Issue::MissingKeys { keys: missing });
    }
    if !unrecognized.is_empty() {
        found.push(Issue::UnrecognizedKeys { keys: unrecognized });
    }
    for issue in &found {
        ctx.record(issue.clone());
    }

    match found.into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(Fields { map }),
    }
}

fn key_type(key: &str, expected: &[ArgKind], value: &Value) -> Issue {
    Issue::InvalidKeyType {
        key: key.to_string(),
        expected: expected.to_vec(),
        received: json_kind(value),
    }
}

impl<'m> Fields<'m> {
    pub fn get(&self, key: &str) -> Option<&'m Value> {
        self.map.get(key)
    }

    pub fn number(&self, key: &str) -> Result<f64, Issue> {
        match self.map.get(key) {
            Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(f64::NAN)),
            Some(other) => Err(key_type(key, &[ArgKind::Number], other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }

    pub fn optional_number(&self, key: &str) -> Result<Option<f64>, Issue> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.number(key).map(Some),
        }
    }

    pub fn string(&self, key: &str) -> Result<&'m str, Issue> {
        match self.map.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(key_type(key, &[ArgKind::String], other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool, Issue> {
        match self.map.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(key_type(key, &[ArgKind::Boolean], other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }

    pub fn optional_boolean(&self, key: &str) -> Result<Option<bool>, Issue> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.boolean(key).map(Some),
        }
    }

    pub fn object(&self, key: &str) -> Result<&'m Map<String, Value>, Issue> {
        match self.map.get(key) {
            Some(Value::Object(m)) => Ok(m),
            Some(other) => Err(key_type(key, &[ArgKind::Object], other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }

    pub fn array(&self, key: &str) -> Result<&'m [Value], Issue> {
        match self.map.get(key) {
            Some(Value::Array(a)) => Ok(a),
            Some(other) => Err(key_type(key, &[ArgKind::Array], other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }

    /// Key holding any of the listed JSON shapes
    pub fn one_of(&self, key: &str, expected: &[ArgKind]) -> Result<&'m Value, Issue> {
        match self.map.get(key) {
            Some(value) if expected.contains(&json_kind(value)) => Ok(value),
            Some(other) => Err(key_type(key, expected, other)),
            None => Err(Issue::MissingKeys {
                keys: vec![key.to_string()],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Arg;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_missing_and_unrecognized_are_both_recorded() {
        let args: Vec<Arg<()>> = vec![];
        let mut ctx = ParseContext::new("Test", &args);
        let object = map(json!({ "x": 1, "z": 3 }));

        let err = expect_keys(&mut ctx, &object, &["x", "y"], &[]).unwrap_err();
        assert_eq!(
            err,
            Issue::MissingKeys {
                keys: vec!["y".to_string()]
            }
        );
        assert_eq!(ctx.issues().len(), 2);
        assert_eq!(ctx.issues()[1].code(), "unrecognized_keys");
    }

    #[test]
    fn test_invalid_key_type() {
        let args: Vec<Arg<()>> = vec![];
        let mut ctx = ParseContext::new("Test", &args);
        let object = map(json!({ "x": "1" }));

        let fields = expect_keys(&mut ctx, &object, &["x"], &[]).unwrap();
        let err = fields.number("x").unwrap_err();
        assert_eq!(err.code(), "invalid_key_type");
    }

    #[test]
    fn test_optional_keys_may_be_absent() {
        let args: Vec<Arg<()>> = vec![];
        let mut ctx = ParseContext::new("Test", &args);
        let object = map(json!({ "x": 1 }));

        let fields = expect_keys(&mut ctx, &object, &["x"], &["y"]).unwrap();
        assert_eq!(fields.optional_number("y").unwrap(), None);
    }
}
