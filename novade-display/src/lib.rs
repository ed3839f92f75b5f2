//! NovaDE display output tracking.
//!
//! Every monitor the display server announces is represented by an
//! [`OutputDevice`]: its identity (server-assigned id plus position in the
//! global layout), its single current [`GraphicsConfiguration`] and its
//! exclusive full-screen window. The [`OutputRegistry`] follows output
//! announcements and removals, keeps device handles stable across
//! reconfiguration, and tells listeners when the display layout changed.

pub mod context;
pub mod device;
pub mod error;
pub mod fullscreen;
pub mod graphics_config;
pub mod peer;
pub mod registry;

pub use context::OutputContext;
pub use device::{DeviceType, OutputDevice, OutputId};
pub use error::DisplayError;
pub use fullscreen::{FullScreenState, FullScreenTransition, PeerRequest};
pub use graphics_config::{
    same_config, BackendConfigFactory, ConfigFactory, GraphicsConfiguration, PixelFormat, SoftwareConfig,
    VulkanConfig,
};
pub use peer::{PeerResolver, PeerTable, WindowId, WindowPeer};
pub use registry::{DisplayChangedListener, OutputHandle, OutputInfo, OutputRegistry, OutputSource};
