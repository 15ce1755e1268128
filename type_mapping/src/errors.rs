use thiserror::Error;
use type_codec::CodecError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Unknown PostgreSQL type: {0}")]
    UnknownType(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Type mismatch: expected {expected}, received {received}")]
    Mismatch { expected: String, received: String },
}

impl MappingError {
    pub fn mismatch(expected: impl Into<String>, received: impl Into<String>) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            received: received.into(),
        }
    }
}
