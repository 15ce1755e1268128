//! Core pgtyped functionality
//!
//! This module contains the `PgTyped` coordinator: a registry of type aliases
//! (domains, custom names) on top of the built-in catalogue, and decode/encode
//! of driver text under the configured server styles.

use std::collections::HashMap;

use config::{AppConfig, CodecConfig};
use type_mapping::{normalize_type_name, type_modifier, MappingError, PgType, PgValue, Record};

use crate::debug_log;
use crate::errors::PgTypedError;

/// Main pgtyped coordinator that resolves type names and converts driver values
#[derive(Debug, Clone, Default)]
pub struct PgTyped {
    config: CodecConfig,
    aliases: HashMap<String, PgType>,
}

impl PgTyped {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            aliases: HashMap::new(),
        }
    }

    /// Create from the configuration file named in the environment or the default path
    pub fn load() -> Result<Self, PgTypedError> {
        Ok(Self::from_app_config(AppConfig::load()?))
    }

    pub fn from_app_config(config: AppConfig) -> Self {
        Self::new(config.codec)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Register an alias for a type, e.g. a domain over `text`
    pub fn register_type(&mut self, alias: &str, ty: PgType) -> Result<(), PgTypedError> {
        let alias = normalize_type_name(alias);
        if self.aliases.contains_key(&alias) || PgType::from_name(&alias).is_some() {
            return Err(PgTypedError::AliasExists(alias));
        }

        debug_log!("Registering type alias '{}' for {}", alias, ty);
        self.aliases.insert(alias, ty);
        Ok(())
    }

    /// Remove an alias, returning the type it named
    pub fn unregister_type(&mut self, alias: &str) -> Result<PgType, PgTypedError> {
        let alias = normalize_type_name(alias);
        self.aliases
            .remove(&alias)
            .ok_or(PgTypedError::AliasNotFound(alias))
    }

    /// Resolve a registered alias or a built-in type name
    pub fn resolve(&self, name: &str) -> Result<PgType, PgTypedError> {
        let normalized = normalize_type_name(name);
        self.aliases
            .get(&normalized)
            .copied()
            .or_else(|| PgType::from_name(&normalized))
            .ok_or_else(|| MappingError::UnknownType(name.to_string()).into())
    }

    /// List all registered aliases with their types, sorted by alias
    pub fn list_types(&self) -> Vec<(&str, PgType)> {
        let mut types: Vec<_> = self.aliases.iter().map(|(alias, ty)| (alias.as_str(), *ty)).collect();
        types.sort();
        types
    }

    /// Decode driver text for a named type; `None` is SQL NULL.
    /// A modifier in the name (`varchar(10)`, `bit(4)`) is applied.
    pub fn decode(&self, type_name: &str, text: Option<&str>) -> Result<PgValue, PgTypedError> {
        let ty = self.resolve(type_name)?;
        debug_log!("Decoding '{}' as {}", type_name, ty);
        Ok(PgValue::from_driver_with(ty, type_modifier(type_name), text, &self.config)?)
    }

    /// Decode driver text for a type OID
    pub fn decode_oid(&self, oid: u32, text: Option<&str>) -> Result<PgValue, PgTypedError> {
        let ty = PgType::from_oid(oid).ok_or_else(|| MappingError::UnknownType(format!("oid {}", oid)))?;
        Ok(PgValue::from_driver_with(ty, None, text, &self.config)?)
    }

    /// Decode a row against `(column, type name)` pairs
    pub fn decode_record(&self, row: &[Option<&str>], columns: &[(&str, &str)]) -> Result<Record, PgTypedError> {
        let schema = columns
            .iter()
            .map(|(column, type_name)| Ok((*column, self.resolve(type_name)?)))
            .collect::<Result<Vec<_>, PgTypedError>>()?;
        Ok(type_mapping::decode_record_with(row, &schema, &self.config)?)
    }

    /// Driver text in the configured server style; `None` for SQL NULL
    pub fn encode(&self, value: &PgValue) -> Option<String> {
        value.to_driver(&self.config)
    }
}
