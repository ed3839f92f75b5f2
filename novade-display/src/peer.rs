//! Windows and their platform peers.
//!
//! The output tracker never owns windows. It refers to them by [`WindowId`]
//! and reaches their platform-side counterpart through a [`PeerResolver`]
//! whenever it needs the window to change its full-screen state.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::device::OutputId;

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    /// Allocates a new identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// The platform side of a window: the object that talks to the compositor.
pub trait WindowPeer: Send + Sync {
    /// Asks the compositor to make the window full-screen on `output_id`.
    fn request_full_screen(&self, output_id: OutputId);

    fn request_unset_full_screen(&self);
}

pub trait PeerResolver {
    /// Returns the peer of `window`, or `None` if it has none (not yet shown, already disposed).
    fn peer(&self, window: WindowId) -> Option<Arc<dyn WindowPeer>>;
}

/// Thread-safe map from windows to their peers.
#[derive(Default)]
pub struct PeerTable {
    peers: RwLock<HashMap<WindowId, Arc<dyn WindowPeer>>>,
}

impl PeerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `peer` with `window`, returning the peer it replaces.
    pub fn attach(&self, window: WindowId, peer: Arc<dyn WindowPeer>) -> Option<Arc<dyn WindowPeer>> {
        self.peers.write().insert(window, peer)
    }

    pub fn detach(&self, window: WindowId) -> Option<Arc<dyn WindowPeer>> {
        self.peers.write().remove(&window)
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.read().is_empty()
    }
}

impl PeerResolver for PeerTable {
    fn peer(&self, window: WindowId) -> Option<Arc<dyn WindowPeer>> {
        self.peers.read().get(&window).cloned()
    }
}

impl fmt::Debug for PeerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peers = self.peers.read();
        let mut windows: Vec<_> = peers.keys().copied().collect();
        windows.sort();
        f.debug_struct("PeerTable").field("windows", &windows).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(PeerTable: Send, Sync);
    assert_impl_all!(WindowId: Send, Sync, Copy, std::hash::Hash);

    struct NullPeer;

    impl WindowPeer for NullPeer {
        fn request_full_screen(&self, _output_id: OutputId) {}
        fn request_unset_full_screen(&self) {}
    }

    #[test]
    fn test_window_ids_are_unique() {
        let a = WindowId::new();
        let b = WindowId::new();
        assert_ne!(a, b);
        assert_eq!(WindowId::from_raw(a.as_raw()), a);
    }

    #[test]
    fn test_peer_table_attach_resolve_detach() {
        let table = PeerTable::new();
        let window = WindowId::new();
        assert!(table.peer(window).is_none());

        assert!(table.attach(window, Arc::new(NullPeer)).is_none());
        assert_eq!(table.len(), 1);
        assert!(table.peer(window).is_some());

        assert!(table.detach(window).is_some());
        assert!(table.is_empty());
        assert!(table.peer(window).is_none());
    }

    #[test]
    fn test_attach_replaces_previous_peer() {
        let table = PeerTable::new();
        let window = WindowId::from_raw(900);
        table.attach(window, Arc::new(NullPeer));
        assert!(table.attach(window, Arc::new(NullPeer)).is_some());
        assert_eq!(table.len(), 1);
    }
}
