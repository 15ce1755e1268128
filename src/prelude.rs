//! Convenience re-exports for common pgtyped usage
//!
//! This prelude module re-exports the most commonly used items from the pgtyped workspace,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use pgtyped::prelude::*;
//!
//! let pg = PgTyped::new(CodecConfig::default());
//! let value = pg.decode("point", Some("(1,2)")).unwrap();
//! assert!(value.is::<Point>());
//! ```

// Core pgtyped components
pub use crate::core::PgTyped;
pub use crate::errors::PgTypedError;

// Re-export centralized config
pub use config::{AppConfig, CodecConfig, ConfigError, DateStyle, IntervalStyle};

// Every codec and the codec trait
pub use type_codec::prelude::*;

// Driver boundary
pub use type_mapping::{MappingError, PgType, PgValue, PgVariant, Record};
