//! Controller metadata snapshot.
//!
//! [`ControllerInfo`] is a lightweight, cloneable description of a bound
//! controller suitable for UI display, logging, and persistence. It is what
//! lifecycle events carry, so listeners can keep it after the tick ends.
//!
//! # Conventions
//! - `id` is unique per registry and never reused, even across reconnects
//!   (a reconnect re-activates the same profile, so the id is unchanged).
//! - `name` is the device name seen at classification time; later ticks may
//!   report a different string for the same slot without affecting it.
//!
//! # Example
//! ```no_run
//! use padslot::ControllerRegistry;
//!
//! let registry = ControllerRegistry::default();
//! for info in registry.controllers() {
//!     println!("{info}");
//! }
//! ```

use crate::controller::ProfileId;
use crate::device::Slot;
use crate::profile::DeviceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of metadata describing a single bound controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerInfo {
    pub id: ProfileId,

    /// Physical port the controller is bound to.
    pub slot: Slot,

    /// Device name reported when the controller was classified.
    pub name: String,

    /// Kind chosen by the classifier. Never changes after binding.
    pub kind: DeviceKind,

    /// Whether the slot was occupied as of the last tick.
    pub active: bool,
}

impl fmt::Display for ControllerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot {} \"{}\" [{}]{}",
            self.slot,
            self.name,
            self.kind,
            if self.active { "" } else { " (inactive)" }
        )
    }
}
