//! Output configurations and the factories that build them.
//!
//! A configuration describes the single mode an output currently runs in:
//! its bounds and integer scale, plus what the rendering backend needs to
//! know about its buffers. Configurations are immutable; a change of mode
//! produces a new one, and holders detect changes by comparing `Arc` identity
//! (see [`same_config`]).

use std::fmt;
use std::sync::Arc;

use novade_core::config::{DisplayConfig, RendererBackend};
use novade_core::types::{RectInt, SizeInt};
use serde::{Deserialize, Serialize};

use crate::device::OutputId;

/// Pixel layout of the buffers presented on an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// `wl_shm` ARGB8888, used for CPU rasterized buffers.
    Argb8888,
    /// `VK_FORMAT_B8G8R8A8_UNORM` swapchain images.
    Bgra8Unorm,
}

/// The active mode of an output.
pub trait GraphicsConfiguration: fmt::Debug + fmt::Display + Send + Sync {
    /// Device-space bounds; the origin is always `(0, 0)`.
    fn bounds(&self) -> RectInt;

    fn scale(&self) -> i32;

    fn backend(&self) -> RendererBackend;

    fn pixel_format(&self) -> PixelFormat;

    /// Returns `true` if this configuration does not describe the given mode.
    fn differs_from(&self, width: u32, height: u32, scale: i32) -> bool {
        let bounds = self.bounds();
        bounds.width() != width || bounds.height() != height || self.scale() != scale
    }
}

/// Returns `true` when both handles point at the same configuration object.
pub fn same_config(a: &Arc<dyn GraphicsConfiguration>, b: &Arc<dyn GraphicsConfiguration>) -> bool {
    // Compare data pointers only; vtable pointers of the same type may differ across codegen units.
    std::ptr::eq(
        Arc::as_ptr(a) as *const u8,
        Arc::as_ptr(b) as *const u8,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareConfig {
    size: SizeInt,
    scale: i32,
}

impl SoftwareConfig {
    pub fn new(width: u32, height: u32, scale: i32) -> Self {
        Self { size: SizeInt::new(width, height), scale }
    }
}

impl GraphicsConfiguration for SoftwareConfig {
    fn bounds(&self) -> RectInt {
        RectInt::from_size(self.size)
    }

    fn scale(&self) -> i32 {
        self.scale
    }

    fn backend(&self) -> RendererBackend {
        RendererBackend::Software
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Argb8888
    }
}

impl fmt::Display for SoftwareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoftwareConfig[{}x{}, scale={}]", self.size.width, self.size.height, self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulkanConfig {
    size: SizeInt,
    scale: i32,
}

impl VulkanConfig {
    pub fn new(width: u32, height: u32, scale: i32) -> Self {
        Self { size: SizeInt::new(width, height), scale }
    }
}

impl GraphicsConfiguration for VulkanConfig {
    fn bounds(&self) -> RectInt {
        RectInt::from_size(self.size)
    }

    fn scale(&self) -> i32 {
        self.scale
    }

    fn backend(&self) -> RendererBackend {
        RendererBackend::Vulkan
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Bgra8Unorm
    }
}

impl fmt::Display for VulkanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VulkanConfig[{}x{}, scale={}]", self.size.width, self.size.height, self.scale)
    }
}

/// Builds configurations for an output.
///
/// Every call must return a fresh object so that a mode change is observable
/// through configuration identity.
pub trait ConfigFactory: fmt::Debug + Send + Sync {
    fn create(&self, output_id: OutputId, width: u32, height: u32, scale: i32) -> Arc<dyn GraphicsConfiguration>;
}

/// Chooses between the software and Vulkan configuration for every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendConfigFactory {
    backend: RendererBackend,
}

impl BackendConfigFactory {
    pub fn new(backend: RendererBackend) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.renderer)
    }

    pub fn backend(&self) -> RendererBackend {
        self.backend
    }
}

impl ConfigFactory for BackendConfigFactory {
    fn create(&self, output_id: OutputId, width: u32, height: u32, scale: i32) -> Arc<dyn GraphicsConfiguration> {
        tracing::debug!(%output_id, width, height, scale, backend = %self.backend, "Creating output configuration");
        match self.backend {
            RendererBackend::Software => Arc::new(SoftwareConfig::new(width, height, scale)),
            RendererBackend::Vulkan => Arc::new(VulkanConfig::new(width, height, scale)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(RendererBackend::Software, PixelFormat::Argb8888)]
    #[case(RendererBackend::Vulkan, PixelFormat::Bgra8Unorm)]
    fn test_factory_selects_backend(#[case] backend: RendererBackend, #[case] format: PixelFormat) {
        let factory = BackendConfigFactory::new(backend);
        let config = factory.create(OutputId::new(3), 1920, 1080, 2);

        assert_eq!(config.backend(), backend);
        assert_eq!(config.pixel_format(), format);
        assert_eq!(config.bounds(), RectInt::from_coords(0, 0, 1920, 1080));
        assert_eq!(config.scale(), 2);
    }

    #[test]
    fn test_factory_from_display_config() {
        let display = DisplayConfig { renderer: RendererBackend::Vulkan, ..DisplayConfig::default() };
        assert_eq!(BackendConfigFactory::from_config(&display).backend(), RendererBackend::Vulkan);
    }

    #[rstest]
    #[case(1920, 1080, 1, false)]
    #[case(1280, 1080, 1, true)]
    #[case(1920, 720, 1, true)]
    #[case(1920, 1080, 2, true)]
    fn test_differs_from(#[case] width: u32, #[case] height: u32, #[case] scale: i32, #[case] expected: bool) {
        let config = SoftwareConfig::new(1920, 1080, 1);
        assert_eq!(config.differs_from(width, height, scale), expected);
    }

    #[test]
    fn test_factory_returns_fresh_objects() {
        let factory = BackendConfigFactory::new(RendererBackend::Software);
        let a = factory.create(OutputId::new(1), 800, 600, 1);
        let b = factory.create(OutputId::new(1), 800, 600, 1);

        assert!(same_config(&a, &a.clone()));
        assert!(!same_config(&a, &b));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(SoftwareConfig::new(800, 600, 1).to_string(), "SoftwareConfig[800x600, scale=1]");
        assert_eq!(VulkanConfig::new(3840, 2160, 2).to_string(), "VulkanConfig[3840x2160, scale=2]");
    }
}
