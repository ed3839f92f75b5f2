//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Paths are derived with the `directories-next` crate from the constants
//! `QUALIFIER` ("org"), `ORGANIZATION` ("NovaDE") and `APPLICATION` ("NovaDE").
//!
//! Functions returning `Result` yield
//! [`CoreError::Config(ConfigError::DirectoryUnavailable)`](crate::error::ConfigError::DirectoryUnavailable)
//! when a directory cannot be determined (e.g. no HOME directory).

use std::env;
use std::path::PathBuf;
use directories_next::{BaseDirs, ProjectDirs};
use crate::error::{ConfigError, CoreError};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "NovaDE";
const APPLICATION: &str = "NovaDE";

/// Environment variable overriding the location of the system configuration file.
pub const SYSTEM_CONFIG_PATH_ENV: &str = "NOVADE_SYSTEM_CONFIG_PATH";

const DEFAULT_SYSTEM_CONFIG_PATH: &str = "/etc/novade/config.toml";

/// Returns the base directory for user-specific state files
/// (`$XDG_STATE_HOME`, falling back to `~/.local/state` on Linux).
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "State Base".to_string()
        }))
}

/// Returns the application-specific configuration directory,
/// e.g. `~/.config/NovaDE` on Linux.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "App Config".to_string()
        }))
}

/// Returns the application-specific state directory, e.g. `~/.local/state/NovaDE/NovaDE`.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base_state| base_state.join(ORGANIZATION).join(APPLICATION))
}

/// Returns the system-wide configuration file path, honouring
/// [`SYSTEM_CONFIG_PATH_ENV`] when it is set to a non-empty value.
pub fn get_system_config_path_with_override() -> PathBuf {
    match env::var(SYSTEM_CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_SYSTEM_CONFIG_PATH),
    }
}
