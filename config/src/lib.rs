//! # Configuration for pgtyped
//!
//! Server output settings that decide how values are rendered when they are
//! handed to a database driver. The defaults mirror a stock PostgreSQL server.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{CodecConfig, DateStyle, IntervalStyle};
//!
//! let codec = CodecConfig::new(DateStyle::Iso, IntervalStyle::IsoDuration, 63);
//! assert_eq!(codec.interval_style.as_str(), "iso_8601");
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [codec]
//! date_style = "ISO"
//! interval_style = "postgres"
//! name_max_length = 63
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from the file named by PGTYPED_CONFIG, or ./pgtyped.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, fmt, path::Path, str::FromStr};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./pgtyped.toml";
const CONFIG_ENV: &str = "PGTYPED_CONFIG";

/// Identifier byte limit of a stock server (`NAMEDATALEN - 1`)
pub const DEFAULT_NAME_MAX_LENGTH: usize = 63;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub codec: CodecConfig,
}

/// The server's `DateStyle` output setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateStyle {
    #[default]
    #[serde(rename = "ISO", alias = "iso")]
    Iso,
    #[serde(rename = "Postgres", alias = "postgres")]
    Postgres,
    #[serde(rename = "SQL", alias = "sql")]
    Sql,
    #[serde(rename = "German", alias = "german")]
    German,
}

/// The server's `IntervalStyle` output setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IntervalStyle {
    #[default]
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "postgres_verbose")]
    PostgresVerbose,
    #[serde(rename = "sql_standard")]
    SqlStandard,
    #[serde(rename = "iso_8601")]
    IsoDuration,
}

/// Codec rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub date_style: DateStyle,
    pub interval_style: IntervalStyle,
    pub name_max_length: usize,
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment or the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        match env::var(CONFIG_ENV) {
            Ok(config_path) => Self::from_file(&config_path),
            Err(env::VarError::NotPresent) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            Err(env::VarError::NotPresent) => Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_ENV, DEFAULT_CONFIG_PATH
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(date_style: DateStyle, interval_style: IntervalStyle, name_max_length: usize) -> Self {
        Self {
            date_style,
            interval_style,
            name_max_length,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_max_length == 0 {
            return Err(ConfigError::Invalid(
                "Codec name_max_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(DateStyle::Iso, IntervalStyle::Postgres, DEFAULT_NAME_MAX_LENGTH)
    }
}

impl DateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateStyle::Iso => "ISO",
            DateStyle::Postgres => "Postgres",
            DateStyle::Sql => "SQL",
            DateStyle::German => "German",
        }
    }
}

impl IntervalStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalStyle::Postgres => "postgres",
            IntervalStyle::PostgresVerbose => "postgres_verbose",
            IntervalStyle::SqlStandard => "sql_standard",
            IntervalStyle::IsoDuration => "iso_8601",
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IntervalStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the server's spelling, ignoring case; a `SET DateStyle` value
/// like `ISO, MDY` keeps only its output part
impl FromStr for DateStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let output = s.split(',').next().unwrap_or_default().trim();
        match output.to_ascii_lowercase().as_str() {
            "iso" => Ok(DateStyle::Iso),
            "postgres" => Ok(DateStyle::Postgres),
            "sql" => Ok(DateStyle::Sql),
            "german" => Ok(DateStyle::German),
            _ => Err(ConfigError::Invalid(format!("Unknown DateStyle '{}'", s))),
        }
    }
}

impl FromStr for IntervalStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(IntervalStyle::Postgres),
            "postgres_verbose" => Ok(IntervalStyle::PostgresVerbose),
            "sql_standard" => Ok(IntervalStyle::SqlStandard),
            "iso_8601" => Ok(IntervalStyle::IsoDuration),
            _ => Err(ConfigError::Invalid(format!("Unknown IntervalStyle '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_stock_server() {
        let config = AppConfig::default();
        assert_eq!(config.codec.date_style, DateStyle::Iso);
        assert_eq!(config.codec.interval_style, IntervalStyle::Postgres);
        assert_eq!(config.codec.name_max_length, 63);
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = r#"
            [codec]
            date_style = "German"
            interval_style = "sql_standard"
            name_max_length = 127
        "#
        .parse()
        .unwrap();
        assert_eq!(
            config.codec,
            CodecConfig::new(DateStyle::German, IntervalStyle::SqlStandard, 127)
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: AppConfig = "[codec]\ndate_style = \"sql\"\n".parse().unwrap();
        assert_eq!(config.codec.date_style, DateStyle::Sql);
        assert_eq!(config.codec.name_max_length, DEFAULT_NAME_MAX_LENGTH);

        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = "[codec]\nname_max_length = 0\n".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = "[codec]\ninterval_style = \"verbose\"\n".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("pgtyped-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[codec]\ninterval_style = \"iso_8601\"\n").unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.codec.interval_style, IntervalStyle::IsoDuration);

        let err = AppConfig::from_file("/nonexistent/pgtyped.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_style_names() {
        assert_eq!("ISO, MDY".parse::<DateStyle>().unwrap(), DateStyle::Iso);
        assert_eq!("postgres".parse::<DateStyle>().unwrap(), DateStyle::Postgres);
        assert_eq!("SQL_STANDARD".parse::<IntervalStyle>().unwrap(), IntervalStyle::SqlStandard);
        assert!("nope".parse::<IntervalStyle>().is_err());
        assert_eq!(IntervalStyle::PostgresVerbose.to_string(), "postgres_verbose");
    }
}
