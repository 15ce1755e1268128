//! Error types for the pgtyped crate
//!
//! This module contains all error types that can be returned by `PgTyped` operations.

use config::ConfigError;
use thiserror::Error;
use type_codec::CodecError;
use type_mapping::MappingError;

#[derive(Error, Debug)]
pub enum PgTypedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Type alias already registered: {0}")]
    AliasExists(String),

    #[error("Type alias not found: {0}")]
    AliasNotFound(String),
}
