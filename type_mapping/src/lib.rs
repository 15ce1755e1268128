//! # type-mapping
//!
//! The boundary between the codecs and a database driver: PostgreSQL type
//! names and OIDs ([`PgType`]), a runtime value union over every codec
//! ([`PgValue`]) and row decoding.
//!
//! ```rust
//! use config::CodecConfig;
//! use type_mapping::{PgType, PgValue};
//!
//! let ty = PgType::from_name("timestamp with time zone").unwrap();
//! let value = PgValue::from_driver(ty, Some("2004-10-19 10:23:54+02")).unwrap();
//! assert_eq!(
//!     value.to_driver(&CodecConfig::default()).as_deref(),
//!     Some("2004-10-19T10:23:54+02:00")
//! );
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

pub mod errors;
pub mod serialize;
pub mod sql;
pub mod types;
pub mod value;

pub use errors::MappingError;
pub use serialize::{decode_record, decode_record_with, Record};
pub use sql::{normalize_type_name, type_modifier};
pub use types::{oid, PgType};
pub use value::{PgValue, PgVariant};
