//! Shared construction context for output devices.
//!
//! Every device of a registry is built from the same [`OutputContext`]: the
//! [`ConfigFactory`] chosen from the renderer setting and the prefix used to
//! name outputs the display server left unnamed.

use std::sync::Arc;

use novade_core::config::DisplayConfig;

use crate::device::OutputId;
use crate::graphics_config::{BackendConfigFactory, ConfigFactory};

/// What every [`OutputDevice`](crate::device::OutputDevice) is built with:
/// the configuration factory and the naming rule for unnamed outputs.
#[derive(Debug, Clone)]
pub struct OutputContext {
    factory: Arc<dyn ConfigFactory>,
    name_prefix: String,
}

impl OutputContext {
    pub fn new(factory: Arc<dyn ConfigFactory>, name_prefix: impl Into<String>) -> Self {
        Self { factory, name_prefix: name_prefix.into() }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(
            Arc::new(BackendConfigFactory::from_config(config)),
            config.output_name_prefix.clone(),
        )
    }

    pub fn factory(&self) -> &dyn ConfigFactory {
        self.factory.as_ref()
    }

    /// Name given to an output the display server did not name, e.g. `wl_output.42`.
    pub fn synthetic_name(&self, output_id: OutputId) -> String {
        format!("{}.{}", self.name_prefix, output_id)
    }
}

impl Default for OutputContext {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novade_core::config::RendererBackend;

    #[test]
    fn test_synthetic_name_uses_prefix() {
        let context = OutputContext::default();
        assert_eq!(context.synthetic_name(OutputId::new(42)), "wl_output.42");

        let custom = OutputContext::from_config(&DisplayConfig {
            renderer: RendererBackend::Vulkan,
            output_name_prefix: "head".to_string(),
        });
        assert_eq!(custom.synthetic_name(OutputId::new(3)), "head.3");
    }

    #[test]
    fn test_factory_follows_renderer() {
        let context = OutputContext::from_config(&DisplayConfig {
            renderer: RendererBackend::Vulkan,
            ..DisplayConfig::default()
        });
        let config = context.factory().create(OutputId::new(1), 640, 480, 1);
        assert_eq!(config.backend(), RendererBackend::Vulkan);
    }
}
