use serde::Serialize;
use thiserror::Error;

use crate::issue::Issue;

/// Structured failure returned by every codec
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{codec}: {issue}")]
pub struct CodecError {
    /// Name of the codec that rejected the input, e.g. `TimestampTZ`
    pub codec: &'static str,
    /// The first issue encountered
    pub issue: Issue,
    /// Every issue recorded while parsing, the primary one included
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl CodecError {
    pub fn new(codec: &'static str, issue: Issue) -> Self {
        Self {
            codec,
            issues: vec![issue.clone()],
            issue,
        }
    }

    /// Human readable rendering of the primary issue
    pub fn message(&self) -> String {
        self.issue.to_string()
    }

    pub fn code(&self) -> &'static str {
        self.issue.code()
    }
}
