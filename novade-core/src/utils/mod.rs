//! General Utilities for NovaDE Core.
//!
//! - [`fs`]: Filesystem helpers such as ensuring a directory exists.
//! - [`paths`]: XDG base directories and application-specific paths.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
