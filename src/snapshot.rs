//! Per-frame snapshot of controller states.
//!
//! [`Snapshot`] is an **owned**, read-only view of every bound controller's
//! logical inputs at a point in time (typically "this frame"). It's produced
//! by [`ControllerRegistry::snapshot`](crate::registry::ControllerRegistry::snapshot)
//! and is cheap to clone for fan-out to multiple consumers.
//!
//! # Semantics
//! - Keys are [`Slot`]s in ascending order.
//! - Axes use the deadzone-applying path ([`ControllerProfile::get_axis`]).
//! - Inactive controllers appear with every input neutral.
//! - A snapshot is **immutable** and does not poll anything after capture.
//!
//! # Examples
//! ```no_run
//! use padslot::{LogicalAxis, Snapshot};
//!
//! fn print_sticks(snap: &Snapshot) {
//!     for (slot, state) in snap.iter() {
//!         let x = state.axis(LogicalAxis::LSX);
//!         let y = state.axis(LogicalAxis::LSY);
//!         println!("{slot}: LSX={x:.2} LSY={y:.2}");
//!     }
//! }
//! ```

use crate::control::{LogicalAxis, LogicalButton};
use crate::controller::ControllerProfile;
use crate::device::{PhysicalInputSource, Slot};
use crate::metadata::ControllerInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical inputs of one controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub info: ControllerInfo,
    pub buttons: BTreeMap<LogicalButton, bool>,
    pub axes: BTreeMap<LogicalAxis, f32>,
}

impl ControllerState {
    pub fn capture<S: PhysicalInputSource + ?Sized>(profile: &ControllerProfile, source: &S) -> Self {
        Self {
            info: profile.info(),
            buttons: LogicalButton::ALL
                .iter()
                .map(|&b| (b, profile.get_button(source, b)))
                .collect(),
            axes: LogicalAxis::ALL
                .iter()
                .map(|&a| (a, profile.get_axis(source, a)))
                .collect(),
        }
    }

    /// Gets the value of an axis (0.0 if missing).
    pub fn axis(&self, axis: LogicalAxis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// Gets the state of a button (false if missing).
    pub fn button(&self, button: LogicalButton) -> bool {
        self.buttons.get(&button).copied().unwrap_or(false)
    }
}

/// Owned snapshot of current controller states (`slot → ControllerState`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot(pub BTreeMap<Slot, ControllerState>);

impl Snapshot {
    /// Get the state for a specific slot.
    #[inline]
    pub fn get(&self, slot: Slot) -> Option<&ControllerState> {
        self.0.get(&slot)
    }

    /// Iterate `(slot, state)` pairs in ascending slot order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &ControllerState)> {
        self.0.iter()
    }

    /// Consume the snapshot and return the inner map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<Slot, ControllerState> {
        self.0
    }

    /// Pretty-printed JSON, for diagnostics dumps.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(all(test, feature = "virtual"))]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualInputSource;
    use crate::registry::ControllerRegistry;

    #[test]
    fn captures_and_exports_bound_controllers() {
        let slot = Slot::new(1).unwrap();
        let mut src = VirtualInputSource::new();
        let mut reg = ControllerRegistry::default();
        src.plug(slot, "Controller (XBOX 360 For Windows)");
        src.press(slot, 0);
        src.set_axis(slot, 2, 0.8);
        reg.tick(&src);

        let snap = reg.snapshot(&src);
        let state = snap.get(slot).unwrap();
        assert!(state.button(LogicalButton::B4));
        assert!(!state.button(LogicalButton::B7));
        assert_eq!(state.axis(LogicalAxis::LSY), -0.8);

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"B4\": true"));
        assert!(json.contains("\"kind\": \"Xbox360\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
