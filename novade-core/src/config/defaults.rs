//! Default configuration values.
//!
//! These functions back the `serde` `default` attributes of the configuration
//! structures, providing values for settings the configuration file omits.

use crate::config::{DisplayConfig, LoggingConfig, RendererBackend};
use std::path::PathBuf;

/// Returns the default `LoggingConfig`.
pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

/// Returns the default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file by default.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Returns the default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Returns the default `DisplayConfig`: software rendering, `wl_output` prefix.
pub(super) fn default_display_config() -> DisplayConfig {
    DisplayConfig {
        renderer: RendererBackend::default(),
        output_name_prefix: default_output_name_prefix(),
    }
}

pub(super) fn default_output_name_prefix() -> String {
    "wl_output".to_string()
}
