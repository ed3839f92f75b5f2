//! Exclusive full-screen state of a single output.
//!
//! An output is either in normal compositing mode or has exactly one window
//! in exclusive full-screen. Changing the full-screen window yields the peer
//! requests that carry out the change; they are returned rather than executed
//! so that callers holding a lock can release it before talking to peers.

use serde::{Deserialize, Serialize};

use crate::device::OutputId;
use crate::peer::{PeerResolver, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FullScreenState {
    #[default]
    Normal,
    Exclusive(WindowId),
}

impl FullScreenState {
    pub fn window(&self) -> Option<WindowId> {
        match self {
            FullScreenState::Normal => None,
            FullScreenState::Exclusive(window) => Some(*window),
        }
    }

    pub fn is_exclusive(&self) -> bool {
        matches!(self, FullScreenState::Exclusive(_))
    }

    /// Moves to the state in which `requested` is the full-screen window
    /// (`None` meaning normal mode) and returns the peer requests to issue.
    ///
    /// The previous window always leaves full-screen before a new one enters.
    pub fn transition(&mut self, requested: Option<WindowId>) -> FullScreenTransition {
        let current = self.window();
        if current == requested {
            return FullScreenTransition::default();
        }

        let mut requests = Vec::with_capacity(2);
        if let Some(old) = current {
            requests.push(PeerRequest::Exit(old));
        }
        if let Some(new) = requested {
            requests.push(PeerRequest::Enter(new));
        }

        *self = match requested {
            Some(window) => FullScreenState::Exclusive(window),
            None => FullScreenState::Normal,
        };
        FullScreenTransition { requests }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerRequest {
    Enter(WindowId),
    Exit(WindowId),
}

/// Ordered peer requests produced by [`FullScreenState::transition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "a full-screen transition does nothing until dispatched"]
pub struct FullScreenTransition {
    requests: Vec<PeerRequest>,
}

impl FullScreenTransition {
    pub fn requests(&self) -> &[PeerRequest] {
        &self.requests
    }

    pub fn is_noop(&self) -> bool {
        self.requests.is_empty()
    }

    /// Sends the requests, in order, to the peers `resolver` knows about.
    /// Windows without a peer are skipped.
    pub fn dispatch(self, output_id: OutputId, resolver: &dyn PeerResolver) {
        for request in self.requests {
            match request {
                PeerRequest::Enter(window) => match resolver.peer(window) {
                    Some(peer) => peer.request_full_screen(output_id),
                    None => tracing::trace!(%window, %output_id, "No peer, skipping full-screen request"),
                },
                PeerRequest::Exit(window) => match resolver.peer(window) {
                    Some(peer) => peer.request_unset_full_screen(),
                    None => tracing::trace!(%window, %output_id, "No peer, skipping unset-full-screen request"),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enter_from_normal() {
        let w1 = WindowId::from_raw(1);
        let mut state = FullScreenState::Normal;

        let transition = state.transition(Some(w1));
        assert_eq!(transition.requests(), &[PeerRequest::Enter(w1)]);
        assert_eq!(state, FullScreenState::Exclusive(w1));
    }

    #[test]
    fn test_same_window_is_noop() {
        let w1 = WindowId::from_raw(1);
        let mut state = FullScreenState::Exclusive(w1);

        assert!(state.transition(Some(w1)).is_noop());
        assert_eq!(state, FullScreenState::Exclusive(w1));

        let mut normal = FullScreenState::Normal;
        assert!(normal.transition(None).is_noop());
        assert_eq!(normal, FullScreenState::Normal);
    }

    #[test]
    fn test_switch_exits_before_entering() {
        let w1 = WindowId::from_raw(1);
        let w2 = WindowId::from_raw(2);
        let mut state = FullScreenState::Exclusive(w1);

        let transition = state.transition(Some(w2));
        assert_eq!(transition.requests(), &[PeerRequest::Exit(w1), PeerRequest::Enter(w2)]);
        assert_eq!(state.window(), Some(w2));
    }

    #[test]
    fn test_exit_to_normal() {
        let w2 = WindowId::from_raw(2);
        let mut state = FullScreenState::Exclusive(w2);

        let transition = state.transition(None);
        assert_eq!(transition.requests(), &[PeerRequest::Exit(w2)]);
        assert!(!state.is_exclusive());
    }
}
