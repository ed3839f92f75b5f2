//! # NovaDE Core Library (`novade-core`)
//!
//! `novade-core` is the foundational library for the NovaDE display layer.
//! It provides the shared plumbing every other crate in the workspace builds on:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types `ConfigError` and `LoggingError`.
//! - **Geometry**: Integer primitives (`PointInt`, `SizeInt`, `RectInt`) used to describe
//!   output positions and bounds in the global multi-monitor layout.
//! - **Configuration Management**: TOML-based loading, merging and validation of the
//!   `CoreConfig` through the `ConfigLoader`.
//! - **Logging**: A logging setup built on top of the `tracing` crate, configurable for
//!   console and file output in text or JSON format.
//! - **Utilities**: Filesystem helpers (`utils::fs`) and XDG path resolution (`utils::paths`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novade_core::config::ConfigLoader;
//! use novade_core::logging::init_logging;
//! use novade_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!
//!     tracing::info!(renderer = ?core_config.display.renderer, "NovaDE core initialized");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use error::{CoreError, ConfigError, LoggingError};
pub use types::{PointInt, RectInt, SizeInt};
pub use config::{CoreConfig, DisplayConfig, LoggingConfig, RendererBackend, ConfigLoader};
pub use logging::{init_logging, init_minimal_logging};
