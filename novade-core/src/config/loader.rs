//! Configuration Loading.
//!
//! This module provides the [`ConfigLoader`] struct, responsible for locating,
//! merging, parsing and validating the [`CoreConfig`].
//!
//! ## Configuration File Locations
//!
//! - System: `/etc/novade/config.toml`, or the path in `NOVADE_SYSTEM_CONFIG_PATH`.
//! - User: `config.toml` inside the directory returned by
//!   [`get_app_config_dir`](crate::utils::paths::get_app_config_dir).
//!
//! Missing files are not an error; a missing or empty document contributes nothing.
//!
//! ## Validation
//!
//! - The log level must be one of "trace", "debug", "info", "warn", "error"; it is lowercased.
//! - The log format must be "text" or "json"; it is lowercased.
//! - A relative log file path is made absolute against the application state directory,
//!   and the parent directory of the log file is created.
//! - `display.output_name_prefix` must not be empty or contain whitespace.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use toml::Value;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as nova_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir, get_system_config_path_with_override};

/// `ConfigLoader` provides static methods to load and validate `CoreConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads, merges and validates the configuration from the system and user files.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadError`] if a file exists but cannot be read.
    /// - [`ConfigError::ParseError`] if a document is not valid TOML or violates the schema.
    /// - [`ConfigError::ValidationError`] if a value is out of range.
    /// - [`ConfigError::DirectoryUnavailable`] if the config or state directory cannot be resolved.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let system_config_path = get_system_config_path_with_override();
        let user_config_path = get_app_config_dir()?.join("config.toml");
        Self::load_from_paths(Some(&system_config_path), &user_config_path)
    }

    /// Same as [`ConfigLoader::load`] with explicit file locations.
    pub fn load_from_paths(system_path: Option<&Path>, user_path: &Path) -> Result<CoreConfig, CoreError> {
        let system_toml_value = match system_path {
            Some(path) => Self::read_toml_value(path)?,
            None => None,
        };
        let user_toml_value = Self::read_toml_value(user_path)?;

        let merged_toml = Self::merge_toml_values(system_toml_value, user_toml_value);

        let mut final_config: CoreConfig = match merged_toml {
            Some(value) => toml::from_str(&value.to_string()).map_err(ConfigError::ParseError)?,
            None => CoreConfig::default(),
        };

        Self::validate_config(&mut final_config)?;
        tracing::debug!(
            system = ?system_path,
            user = %user_path.display(),
            renderer = %final_config.display.renderer,
            "Configuration loaded"
        );
        Ok(final_config)
    }

    /// Parses and validates a single TOML document.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Reads a TOML file. Missing or blank files yield `None`.
    fn read_toml_value(path: &Path) -> Result<Option<Value>, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => {
                let value = content.parse::<Value>().map_err(ConfigError::ParseError)?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
            .into()),
        }
    }

    /// Merges two optional TOML values. `override_val` takes precedence.
    fn merge_toml_values(base: Option<Value>, override_val: Option<Value>) -> Option<Value> {
        match (base, override_val) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(Value::Table(mut base_table)), Some(Value::Table(override_table))) => {
                Self::merge_toml_tables(&mut base_table, &override_table);
                Some(Value::Table(base_table))
            }
            (_, Some(o)) => Some(o),
        }
    }

    /// Recursively merges `override_table` into `base_table`.
    fn merge_toml_tables(base_table: &mut toml::map::Map<String, Value>, override_table: &toml::map::Map<String, Value>) {
        for (key, override_item) in override_table {
            match base_table.get_mut(key) {
                Some(base_item) => {
                    if let (Value::Table(bt), Value::Table(ot)) = (&mut *base_item, override_item) {
                        Self::merge_toml_tables(bt, ot);
                    } else {
                        *base_item = override_item.clone();
                    }
                }
                None => {
                    base_table.insert(key.clone(), override_item.clone());
                }
            }
        }
    }

    /// Validates the loaded `CoreConfig` and normalizes it in place.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))
                .into());
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))
                .into());
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            let absolute_path = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.exists() {
                    nova_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        let prefix = &config.display.output_name_prefix;
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid display.output_name_prefix: '{}'. Must be non-empty and contain no whitespace.",
                prefix
            ))
            .into());
        }

        Ok(())
    }
}
