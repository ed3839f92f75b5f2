//! Configuration Data Structures for the NovaDE display layer.
//!
//! These structs are populated by deserializing a TOML document. Missing fields
//! take their values from the [`super::defaults`] module, and unknown fields are
//! rejected through `#[serde(deny_unknown_fields)]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use super::defaults;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use novade_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/novade_display.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/novade_display.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level to record: "trace", "debug", "info", "warn" or "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the application's state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Rendering backend used when building output configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererBackend {
    /// CPU rasterization into shared-memory buffers.
    #[default]
    Software,
    /// Accelerated rendering through Vulkan.
    Vulkan,
}

impl fmt::Display for RendererBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererBackend::Software => write!(f, "software"),
            RendererBackend::Vulkan => write!(f, "vulkan"),
        }
    }
}

/// Settings for output tracking.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Which configuration backend new outputs get.
    #[serde(default)]
    pub renderer: RendererBackend,
    /// Prefix of the name given to outputs the display server did not name,
    /// followed by `.` and the output id (e.g. `wl_output.42`).
    #[serde(default = "defaults::default_output_name_prefix")]
    pub output_name_prefix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        defaults::default_display_config()
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use novade_core::config::{CoreConfig, RendererBackend};
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [display]
/// renderer = "vulkan"
/// "#;
/// let loaded_config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(loaded_config.logging.level, "warn");
/// assert_eq!(loaded_config.display.renderer, RendererBackend::Vulkan);
/// assert_eq!(loaded_config.display.output_name_prefix, "wl_output");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}
