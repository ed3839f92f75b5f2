//! Registry of all output devices known to the client.
//!
//! The registry is driven by display server events (an output was configured,
//! an output went away) or by polling an [`OutputSource`]. Devices live in
//! slots that are never freed; everything else holds an [`OutputHandle`].
//! An output that moves is invalidated in place. An output that goes away
//! leaves a forwarding slot behind, so a handle obtained earlier keeps
//! resolving to the live device that took its place.

use std::fmt;
use std::sync::Arc;

use novade_core::config::DisplayConfig;
use novade_core::types::{PointInt, RectInt};
use parking_lot::{ReentrantMutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::context::OutputContext;
use crate::device::{OutputDevice, OutputId};
use crate::error::DisplayError;
use crate::peer::{PeerResolver, WindowId};

/// Stable reference to a registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputHandle(usize);

impl fmt::Display for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One output as described by the display server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputInfo {
    pub output_id: OutputId,
    #[serde(default)]
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale: i32,
}

/// Something that can list the outputs currently present.
pub trait OutputSource {
    fn query_outputs(&self) -> Result<Vec<OutputInfo>, DisplayError>;
}

/// Called after the set of outputs or one of their configurations changed.
pub trait DisplayChangedListener: Send + Sync {
    fn display_changed(&self);
}

#[derive(Debug)]
enum Slot {
    Live(OutputDevice),
    /// The output is gone; its holders are served by the successor.
    Forwarded(OutputHandle),
}

#[derive(Debug, Default)]
struct RegistryState {
    slots: Vec<Slot>,
    /// Handles of outputs currently present, in announcement order. Always live slots.
    active: Vec<OutputHandle>,
}

impl RegistryState {
    /// Follows forwarding slots to the live slot serving `handle`.
    fn resolve(&self, handle: OutputHandle) -> Result<OutputHandle, DisplayError> {
        let mut current = handle;
        // Forwarding always points at a slot that was active at the time, so chains are acyclic.
        for _ in 0..=self.slots.len() {
            match self.slots.get(current.0) {
                Some(Slot::Live(_)) => return Ok(current),
                Some(Slot::Forwarded(next)) => current = *next,
                None => break,
            }
        }
        Err(DisplayError::OutputNotFound { handle })
    }

    fn live(&self, handle: OutputHandle) -> Option<&OutputDevice> {
        match self.slots.get(handle.0) {
            Some(Slot::Live(device)) => Some(device),
            _ => None,
        }
    }

    fn live_mut(&mut self, handle: OutputHandle) -> Option<&mut OutputDevice> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Live(device)) => Some(device),
            _ => None,
        }
    }

    fn device(&self, handle: OutputHandle) -> Result<&OutputDevice, DisplayError> {
        let live = self.resolve(handle)?;
        self.live(live).ok_or(DisplayError::OutputNotFound { handle })
    }

    fn device_mut(&mut self, handle: OutputHandle) -> Result<&mut OutputDevice, DisplayError> {
        let live = self.resolve(handle)?;
        self.live_mut(live).ok_or(DisplayError::OutputNotFound { handle })
    }

    fn active_devices(&self) -> impl Iterator<Item = (OutputHandle, &OutputDevice)> + '_ {
        self.active
            .iter()
            .filter_map(move |&handle| self.live(handle).map(|device| (handle, device)))
    }

    fn active_by_id(&self, output_id: OutputId) -> Option<OutputHandle> {
        self.active_devices()
            .find(|(_, device)| device.id() == output_id)
            .map(|(handle, _)| handle)
    }

    /// Picks the device a removed one should turn into: the first with the same
    /// name, otherwise the last with the same size, otherwise the first present.
    fn similar_device(&self, model: &OutputDevice) -> Option<OutputHandle> {
        let mut similar = self.active.first().copied();
        for (handle, device) in self.active_devices() {
            if device.has_same_name_as(model) {
                return Some(handle);
            }
            if device.has_same_size_as(model) {
                similar = Some(handle);
            }
        }
        similar
    }

    fn apply_configured(&mut self, context: &Arc<OutputContext>, info: &OutputInfo) -> OutputHandle {
        let announced = || {
            OutputDevice::create_with_configuration(
                info.output_id,
                info.name.as_deref(),
                PointInt::new(info.x, info.y),
                info.width,
                info.height,
                info.scale,
                Arc::clone(context),
            )
        };

        if let Some(handle) = self.active_by_id(info.output_id) {
            if let Some(device) = self.live_mut(handle) {
                if device.is_same_device_as(info.output_id, info.x, info.y) {
                    device.update_configuration(info.name.as_deref(), info.width, info.height, info.scale);
                } else {
                    device.invalidate(&announced());
                }
            }
            return handle;
        }

        let handle = OutputHandle(self.slots.len());
        let device = announced();
        tracing::info!(%handle, output = %device, "Output added");
        self.slots.push(Slot::Live(device));
        self.active.push(handle);
        handle
    }

    fn apply_destroyed(&mut self, output_id: OutputId) -> Result<(), DisplayError> {
        let removed: Vec<OutputHandle> = self
            .active_devices()
            .filter(|(_, device)| device.id() == output_id)
            .map(|(handle, _)| handle)
            .collect();
        if removed.is_empty() {
            return Err(DisplayError::UnknownOutput { output_id });
        }
        self.active.retain(|handle| !removed.contains(handle));

        for handle in removed {
            let Some(successor) = self.live(handle).and_then(|model| self.similar_device(model)) else {
                tracing::info!(%handle, %output_id, "Last output removed");
                continue;
            };
            tracing::info!(%handle, %output_id, %successor, "Output removed, forwarding to successor");
            let retired = std::mem::replace(&mut self.slots[handle.0], Slot::Forwarded(successor));
            if let (Slot::Live(retired), Some(target)) = (retired, self.live_mut(successor)) {
                for &window in retired.windows() {
                    target.attach_window(window);
                }
                if let Some(window) = retired.full_screen_window() {
                    tracing::debug!(%window, %output_id, "Full-screen window lost its output");
                }
            }
        }
        Ok(())
    }
}

/// Thread-safe registry of output devices.
pub struct OutputRegistry {
    context: Arc<OutputContext>,
    state: RwLock<RegistryState>,
    /// Held across a full-screen state change and its peer requests.
    full_screen: ReentrantMutex<()>,
    listeners: RwLock<Vec<Arc<dyn DisplayChangedListener>>>,
}

impl OutputRegistry {
    pub fn new(context: Arc<OutputContext>) -> Self {
        Self {
            context,
            state: RwLock::new(RegistryState::default()),
            full_screen: ReentrantMutex::new(()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(Arc::new(OutputContext::from_config(config)))
    }

    pub fn context(&self) -> &Arc<OutputContext> {
        &self.context
    }

    /// Handles an output announcement or reconfiguration.
    ///
    /// A known output at the same position only has its name and mode updated.
    /// A known output that moved becomes a new device, and its slot is
    /// invalidated from it. An unknown output gets a new slot.
    pub fn output_configured(&self, info: OutputInfo) -> OutputHandle {
        let handle = self.state.write().apply_configured(&self.context, &info);
        self.notify_display_changed();
        handle
    }

    /// Handles the removal of an output.
    ///
    /// The device leaves the set of present outputs. Its slot then forwards to
    /// the most similar remaining device, which also takes over its windows, so
    /// existing handles stay usable. Without any remaining output the slot keeps
    /// its last state.
    ///
    /// # Errors
    ///
    /// [`DisplayError::UnknownOutput`] if no present output has `output_id`.
    pub fn output_destroyed(&self, output_id: OutputId) -> Result<(), DisplayError> {
        let result = self.state.write().apply_destroyed(output_id);
        match result {
            Ok(()) => {
                self.notify_display_changed();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%output_id, "Destroy event for an output that is not present");
                Err(e)
            }
        }
    }

    /// Brings the registry in line with the outputs `source` reports.
    /// Listeners are notified once, after all changes have been applied.
    pub fn refresh(&self, source: &dyn OutputSource) -> Result<Vec<OutputHandle>, DisplayError> {
        let outputs = source.query_outputs()?;
        let handles = {
            let mut state = self.state.write();
            let handles: Vec<OutputHandle> = outputs
                .iter()
                .map(|info| state.apply_configured(&self.context, info))
                .collect();

            let gone: Vec<OutputId> = state
                .active_devices()
                .map(|(_, device)| device.id())
                .filter(|id| !outputs.iter().any(|info| info.output_id == *id))
                .collect();
            for output_id in gone {
                state.apply_destroyed(output_id)?;
            }
            handles
        };
        tracing::debug!(outputs = handles.len(), "Outputs refreshed");
        self.notify_display_changed();
        Ok(handles)
    }

    /// Runs `f` on the device serving `handle`. A handle of a removed output
    /// reaches the device that replaced it.
    pub fn with_device<R>(&self, handle: OutputHandle, f: impl FnOnce(&OutputDevice) -> R) -> Result<R, DisplayError> {
        let state = self.state.read();
        state.device(handle).map(f)
    }

    /// Returns the live handle serving `handle`, itself unless the output was removed.
    pub fn resolve(&self, handle: OutputHandle) -> Result<OutputHandle, DisplayError> {
        self.state.read().resolve(handle)
    }

    pub fn find(&self, output_id: OutputId, x: i32, y: i32) -> Option<OutputHandle> {
        let state = self.state.read();
        let found = state
            .active_devices()
            .find(|(_, device)| device.is_same_device_as(output_id, x, y))
            .map(|(handle, _)| handle);
        found
    }

    pub fn find_by_id(&self, output_id: OutputId) -> Option<OutputHandle> {
        self.state.read().active_by_id(output_id)
    }

    pub fn active_handles(&self) -> Vec<OutputHandle> {
        self.state.read().active.clone()
    }

    /// The first output that is still present.
    pub fn default_handle(&self) -> Option<OutputHandle> {
        self.state.read().active.first().copied()
    }

    pub fn is_active(&self, handle: OutputHandle) -> bool {
        self.state.read().active.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.state.read().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().active.is_empty()
    }

    /// Union of the layout bounds of all present outputs; empty when there are none.
    pub fn total_display_bounds(&self) -> RectInt {
        let state = self.state.read();
        let total = state
            .active_devices()
            .map(|(_, device)| device.layout_bounds())
            .reduce(|acc, bounds| acc.union(&bounds))
            .unwrap_or_default();
        total
    }

    /// Changes the full-screen window of an output.
    ///
    /// Changes are serialized per registry, so peers receive requests in the
    /// order the state changed. Peers are contacted without the device lock
    /// held and may call back into the registry from the same thread.
    pub fn set_full_screen_window(
        &self,
        handle: OutputHandle,
        window: Option<WindowId>,
        resolver: &dyn PeerResolver,
    ) -> Result<(), DisplayError> {
        let _serial = self.full_screen.lock();
        let (output_id, transition) = {
            let mut state = self.state.write();
            let device = state.device_mut(handle)?;
            (device.id(), device.begin_full_screen_change(window))
        };
        transition.dispatch(output_id, resolver);
        Ok(())
    }

    pub fn attach_window(&self, handle: OutputHandle, window: WindowId) -> Result<bool, DisplayError> {
        Ok(self.state.write().device_mut(handle)?.attach_window(window))
    }

    pub fn detach_window(&self, handle: OutputHandle, window: WindowId) -> Result<bool, DisplayError> {
        Ok(self.state.write().device_mut(handle)?.detach_window(window))
    }

    pub fn add_display_changed_listener(&self, listener: Arc<dyn DisplayChangedListener>) {
        self.listeners.write().push(listener);
    }

    fn notify_display_changed(&self) {
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener.display_changed();
        }
    }
}

impl fmt::Debug for OutputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("OutputRegistry")
            .field("slots", &state.slots.len())
            .field("active", &state.active)
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}
