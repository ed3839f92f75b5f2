//! A single display output.
//!
//! An [`OutputDevice`] is identified by the id the display server gave its
//! output together with the output's position in the global layout. Whenever
//! either of those changes the display server is describing a different
//! device; [`OutputDevice::invalidate`] then moves the new identity into the
//! existing object so that everything referring to it keeps working.

use std::fmt;
use std::sync::Arc;

use novade_core::types::{PointInt, RectInt};
use serde::{Deserialize, Serialize};

use crate::context::OutputContext;
use crate::fullscreen::{FullScreenState, FullScreenTransition};
use crate::graphics_config::{same_config, GraphicsConfiguration};
use crate::peer::{PeerResolver, WindowId};

/// Id of a `wl_output` as announced by the display server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputId(u32);

impl OutputId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

/// Kind of graphics device. Every display output is a raster screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceType {
    RasterScreen,
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct OutputDevice {
    output_id: OutputId,
    position: PointInt,
    /// Not part of the device's identity.
    name: Option<String>,
    config: Arc<dyn GraphicsConfiguration>,
    windows: Vec<WindowId>,
    full_screen: FullScreenState,
    context: Arc<OutputContext>,
}

impl OutputDevice {
    /// Creates a device for a newly announced output in its initial mode.
    pub fn create_with_configuration(
        output_id: OutputId,
        name: Option<&str>,
        position: PointInt,
        width: u32,
        height: u32,
        scale: i32,
        context: Arc<OutputContext>,
    ) -> Self {
        let config = context.factory().create(output_id, width, height, scale);
        let name = Some(match name {
            Some(name) => name.to_string(),
            None => context.synthetic_name(output_id),
        });
        Self {
            output_id,
            position,
            name,
            config,
            windows: Vec::new(),
            full_screen: FullScreenState::Normal,
            context,
        }
    }

    /// Updates the name and, if the mode changed, installs a new configuration.
    ///
    /// An absent `name` is replaced by the synthetic `<prefix>.<id>` name.
    /// When the mode is unchanged the current configuration object is kept, so
    /// holders can rely on configuration identity to detect mode changes.
    /// Returns `true` if a new configuration was installed.
    pub fn update_configuration(&mut self, name: Option<&str>, width: u32, height: u32, scale: i32) -> bool {
        self.name = Some(match name {
            Some(name) => name.to_string(),
            None => self.context.synthetic_name(self.output_id),
        });

        if !self.config.differs_from(width, height, scale) {
            return false;
        }
        let config = self.context.factory().create(self.output_id, width, height, scale);
        tracing::debug!(
            output_id = %self.output_id,
            old = %self.config,
            new = %config,
            "Output configuration replaced"
        );
        self.config = config;
        true
    }

    /// Makes this device indistinguishable from `replacement`: identity, name
    /// and mode are taken over, while attached windows and full-screen state stay.
    pub fn invalidate(&mut self, replacement: &OutputDevice) {
        tracing::info!(
            from_id = %self.output_id,
            from_position = ?self.position,
            to_id = %replacement.output_id,
            to_position = ?replacement.position,
            "Invalidating output device"
        );
        self.output_id = replacement.output_id;
        self.position = replacement.position;

        let bounds = replacement.config.bounds();
        self.update_configuration(
            replacement.name.as_deref(),
            bounds.width(),
            bounds.height(),
            replacement.config.scale(),
        );
    }

    /// Returns `true` iff the given attributes identify this device.
    pub fn is_same_device_as(&self, output_id: OutputId, x: i32, y: i32) -> bool {
        self.output_id == output_id && self.position == PointInt::new(x, y)
    }

    /// Both names must be present to compare equal.
    pub fn has_same_name_as(&self, other: &OutputDevice) -> bool {
        match (&self.name, &other.name) {
            (Some(name), Some(other_name)) => name == other_name,
            _ => false,
        }
    }

    pub fn has_same_size_as(&self, other: &OutputDevice) -> bool {
        self.config.bounds() == other.config.bounds()
    }

    /// The display server's id for the output this device currently represents.
    pub fn id(&self) -> OutputId {
        self.output_id
    }

    /// Top-left corner of the output in the global layout.
    pub fn position(&self) -> PointInt {
        self.position
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Identifier string reported to applications; this is the display name.
    pub fn id_string(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Integer scale of the current configuration.
    pub fn scale(&self) -> i32 {
        self.config.scale()
    }

    /// Bounds of the current configuration, always at `(0, 0)`.
    pub fn bounds(&self) -> RectInt {
        self.config.bounds()
    }

    /// Bounds placed at the device's position in the global layout.
    pub fn layout_bounds(&self) -> RectInt {
        self.config.bounds().at(self.position)
    }

    /// The display server only ever advertises the current mode, so there is
    /// exactly one configuration.
    pub fn configurations(&self) -> Vec<Arc<dyn GraphicsConfiguration>> {
        vec![Arc::clone(&self.config)]
    }

    pub fn default_configuration(&self) -> Arc<dyn GraphicsConfiguration> {
        Arc::clone(&self.config)
    }

    /// Returns `true` if `config` is the configuration currently installed.
    pub fn is_current_configuration(&self, config: &Arc<dyn GraphicsConfiguration>) -> bool {
        same_config(&self.config, config)
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::RasterScreen
    }

    pub fn is_full_screen_supported(&self) -> bool {
        true
    }

    pub fn full_screen_window(&self) -> Option<WindowId> {
        self.full_screen.window()
    }

    pub fn full_screen_state(&self) -> FullScreenState {
        self.full_screen
    }

    /// Makes `window` the exclusive full-screen window of this output, or
    /// returns the output to normal mode for `None`, and notifies the peers.
    pub fn set_full_screen_window(&mut self, window: Option<WindowId>, resolver: &dyn PeerResolver) {
        let transition = self.begin_full_screen_change(window);
        transition.dispatch(self.output_id, resolver);
    }

    /// Updates the full-screen state and returns the peer requests without sending them.
    pub fn begin_full_screen_change(&mut self, window: Option<WindowId>) -> FullScreenTransition {
        if !self.is_full_screen_supported() {
            return FullScreenTransition::default();
        }
        self.full_screen.transition(window)
    }

    /// Records that `window` is shown on this output. Returns `false` if it already was.
    pub fn attach_window(&mut self, window: WindowId) -> bool {
        if self.windows.contains(&window) {
            return false;
        }
        self.windows.push(window);
        true
    }

    /// Forgets that `window` is shown on this output. Returns `false` if it was not.
    pub fn detach_window(&mut self, window: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| *w != window);
        self.windows.len() != before
    }

    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }
}

impl fmt::Display for OutputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OutputDevice: id={} at ({}, {}) with {}",
            self.output_id, self.position.x, self.position.y, self.config
        )
    }
}
