//! # pgtyped
//!
//! Typed value objects for PostgreSQL's text formats: every scalar, temporal,
//! range and geometric type parses from text, JSON shapes, native values or
//! positional arguments, and renders back in the server's own styles.
//!
//! ## Quick Start
//!
//! ```rust
//! use pgtyped::prelude::*;
//!
//! // Codecs on their own
//! let ts = TimestampTZ::expect_from("2004-10-19 10:23:54+02");
//! assert!(ts.equals("2004-10-19 08:23:54Z"));
//!
//! let circle = Circle::safe_from("<(0,0),-1>");
//! assert_eq!(circle.unwrap_err().code(), "too_small");
//!
//! // Driver values, rendered in the configured server style
//! let mut pg = PgTyped::new(CodecConfig::new(DateStyle::Sql, IntervalStyle::IsoDuration, 63));
//! pg.register_type("us_postal_code", PgType::VarChar)?;
//!
//! let interval = pg.decode("interval", Some("1 day 02:00:00"))?;
//! assert_eq!(pg.encode(&interval).as_deref(), Some("P1DT2H"));
//! # Ok::<(), PgTypedError>(())
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::PgTyped;
pub use errors::PgTypedError;

// Re-export centralized config
pub use config::{AppConfig, CodecConfig, DateStyle, IntervalStyle};

// Re-export the member crates
pub use config;
pub use type_codec;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use serde_json;
