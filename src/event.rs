//! Lifecycle notifications.
//!
//! The registry reports three things about a slot:
//! - **Registered**: a device was classified and bound for the first time.
//! - **Connected**: the bound controller became active. Fires right after
//!   `Registered`, and again on every reconnect.
//! - **Disconnected**: the slot's device name went empty.
//!
//! `Registered` fires exactly once per slot, and a slot's first `Connected`
//! never precedes its `Registered`.

use crate::device::Slot;
use crate::metadata::ControllerInfo;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    Registered,
    Connected,
    Disconnected,
}

/// Timestamped lifecycle notification.
#[derive(Clone, Debug)]
pub struct LifecycleEvent {
    /// Capture time (monotonic).
    pub at: Instant,
    /// Registry tick the event was raised on.
    pub tick: u64,
    pub kind: LifecycleKind,
    /// Controller state right after the transition.
    pub controller: ControllerInfo,
}

impl LifecycleEvent {
    pub(crate) fn new(tick: u64, kind: LifecycleKind, controller: ControllerInfo) -> Self {
        Self {
            at: Instant::now(),
            tick,
            kind,
            controller,
        }
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.controller.slot
    }
}
