//! Core data types used throughout the NovaDE display layer.
//!
//! Currently this is the integer geometry used to place outputs in the global
//! multi-monitor layout. All types are serializable with Serde.

pub mod geometry;

pub use self::geometry::{PointInt, RectInt, SizeInt};
