//! Configuration Management for the NovaDE display layer.
//!
//! ## Submodules
//!
//! - [`types`]: The configuration schema ([`CoreConfig`], [`LoggingConfig`], [`DisplayConfig`]).
//! - [`defaults`]: Default values used when settings are missing.
//! - [`loader`]: The [`ConfigLoader`] that finds, merges, parses and validates configuration.
//!
//! ## Loading Process
//!
//! 1. `ConfigLoader::load()` reads the system configuration file, if any.
//! 2. It reads `config.toml` from the user's application config directory, if any.
//! 3. Both TOML documents are merged table by table, user values winning.
//! 4. The merged document is deserialized into [`CoreConfig`]; when neither file
//!    exists the defaults are used.
//! 5. The result is validated and normalized (log level and format lowercased,
//!    relative log paths resolved against the state directory).

pub mod defaults;
pub mod types;
pub mod loader;

pub use types::{CoreConfig, DisplayConfig, LoggingConfig, RendererBackend};
pub use loader::ConfigLoader;
