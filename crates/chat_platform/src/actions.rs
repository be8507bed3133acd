//! Host action records and the dispatch seam the platform produces into.
//!
//! The platform never consumes actions. It only emits them when something user-relevant happens
//! outside the host's own event flow: a notification click or a newly deployed build.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
/// Action record delivered to the host's dispatcher.
pub enum HostAction {
    /// Navigate the host to a room (emitted on notification click).
    ViewRoom {
        /// Room identifier carried by the clicked notification.
        room_id: String,
    },
    /// A different build is deployed than the one currently running.
    NewVersion {
        /// Identifier observed by the first successful poll.
        #[serde(rename = "currentVersion")]
        current_version: String,
        /// Identifier returned by the latest poll.
        #[serde(rename = "newVersion")]
        new_version: String,
    },
}

impl HostAction {
    /// Returns the stable action name used on the dispatch boundary.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ViewRoom { .. } => "view_room",
            Self::NewVersion { .. } => "new_version",
        }
    }
}

/// Host-side receiver for platform-produced actions.
pub trait ActionDispatcher {
    /// Delivers one action to the host.
    fn dispatch(&self, action: HostAction);
}

impl<F> ActionDispatcher for F
where
    F: Fn(HostAction),
{
    fn dispatch(&self, action: HostAction) {
        self(action)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Dispatcher that drops every action.
pub struct NoopActionDispatcher;

impl ActionDispatcher for NoopActionDispatcher {
    fn dispatch(&self, _action: HostAction) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory dispatcher that records every action in order.
pub struct MemoryActionDispatcher {
    inner: Rc<RefCell<Vec<HostAction>>>,
}

impl MemoryActionDispatcher {
    /// Returns a snapshot of the recorded actions.
    pub fn actions(&self) -> Vec<HostAction> {
        self.inner.borrow().clone()
    }

    /// Removes and returns the recorded actions.
    pub fn take(&self) -> Vec<HostAction> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }
}

impl ActionDispatcher for MemoryActionDispatcher {
    fn dispatch(&self, action: HostAction) {
        self.inner.borrow_mut().push(action);
    }
}
