//! Player bindings and named action maps.
//!
//! [`PlayerBinding`] follows "the n-th active controller" across hot-plugs.
//! [`ActionMap`] resolves game-facing action names against one controller.

use crate::control::{LogicalAxis, LogicalButton};
use crate::controller::ControllerProfile;
use crate::device::{PhysicalInputSource, Slot, MAX_SLOTS};
use crate::error::ConfigError;
use crate::event::{LifecycleEvent, LifecycleKind};
use crate::registry::ControllerRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

/// Change in what a [`PlayerBinding`] is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingChange {
    Attached(Slot),
    Detached(Slot),
}

/// Consumer-side handle on the `player`-th active controller.
///
/// Attaches when a connect notification finds at least `player` active
/// controllers, and detaches when its own controller disconnects. While
/// detached every query reports neutral.
#[derive(Debug, Clone)]
pub struct PlayerBinding {
    player: usize,
    slot: Option<Slot>,
}

impl PlayerBinding {
    /// `player` must lie in `1..=MAX_SLOTS`. An invalid id is logged once
    /// here and returned as an error; the caller then simply has no binding.
    pub fn new(player: u32) -> Result<Self, ConfigError> {
        if !(1..=MAX_SLOTS as u32).contains(&player) {
            error!(
                player,
                "invalid player id, expected 1..={}; this player will never receive a controller",
                MAX_SLOTS
            );
            return Err(ConfigError::InvalidSlot(player));
        }
        Ok(Self {
            player: player as usize,
            slot: None,
        })
    }

    pub fn player(&self) -> usize {
        self.player
    }

    /// Slot of the attached controller, if any.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn is_attached(&self) -> bool {
        self.slot.is_some()
    }

    /// React to one tick's lifecycle events.
    pub fn update(&mut self, registry: &ControllerRegistry, events: &[LifecycleEvent]) -> Vec<BindingChange> {
        let mut changes = Vec::new();
        for event in events {
            match event.kind {
                LifecycleKind::Connected if self.slot.is_none() => {
                    if let Some(profile) = registry.get_by_ordinal(self.player) {
                        self.slot = Some(profile.slot());
                        changes.push(BindingChange::Attached(profile.slot()));
                    }
                }
                LifecycleKind::Disconnected if self.slot == Some(event.slot()) => {
                    self.slot = None;
                    changes.push(BindingChange::Detached(event.slot()));
                }
                _ => {}
            }
        }
        changes
    }

    pub fn controller<'r>(&self, registry: &'r ControllerRegistry) -> Option<&'r ControllerProfile> {
        self.slot.and_then(|slot| registry.get_by_slot(slot))
    }

    pub fn get_button<S: PhysicalInputSource + ?Sized>(
        &self,
        registry: &ControllerRegistry,
        source: &S,
        button: LogicalButton,
    ) -> bool {
        self.controller(registry)
            .is_some_and(|c| c.get_button(source, button))
    }

    pub fn get_button_down<S: PhysicalInputSource + ?Sized>(
        &self,
        registry: &ControllerRegistry,
        source: &S,
        button: LogicalButton,
    ) -> bool {
        self.controller(registry)
            .is_some_and(|c| c.get_button_down(source, button))
    }

    pub fn get_button_up<S: PhysicalInputSource + ?Sized>(
        &self,
        registry: &ControllerRegistry,
        source: &S,
        button: LogicalButton,
    ) -> bool {
        self.controller(registry)
            .is_some_and(|c| c.get_button_up(source, button))
    }

    pub fn get_axis<S: PhysicalInputSource + ?Sized>(
        &self,
        registry: &ControllerRegistry,
        source: &S,
        axis: LogicalAxis,
    ) -> f32 {
        self.controller(registry)
            .map_or(0.0, |c| c.get_axis(source, axis))
    }

    pub fn get_axis_raw<S: PhysicalInputSource + ?Sized>(
        &self,
        registry: &ControllerRegistry,
        source: &S,
        axis: LogicalAxis,
    ) -> f32 {
        self.controller(registry)
            .map_or(0.0, |c| c.get_axis_raw(source, axis))
    }
}

/// Logical control an action reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Button(LogicalButton),
    Axis(LogicalAxis),
}

/// Maps a logical control to a named action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionBinding {
    pub action: String,
    pub control: Control,
    #[serde(default)]
    pub invert: bool,
    /// Extra deadzone on top of the controller's own. Axes only.
    #[serde(default)]
    pub deadzone: f32,
}

/// Serializable set of action bindings.
///
/// ```toml
/// name = "platformer"
///
/// [[bindings]]
/// action = "jump"
/// control = { button = "B4" }
///
/// [[bindings]]
/// action = "move_y"
/// control = { axis = "LSY" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionMap {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bindings: Vec<ActionBinding>,
}

/// Resolved action values.
#[derive(Default, Debug, Serialize, Deserialize)]
pub struct ActionOutput {
    pub axes: HashMap<String, f32>,
    pub buttons: HashMap<String, bool>,
}

impl ActionMap {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Resolves every action from the controller's current logical state.
    pub fn resolve<S: PhysicalInputSource + ?Sized>(&self, controller: &ControllerProfile, source: &S) -> ActionOutput {
        let mut output = ActionOutput::default();

        for binding in &self.bindings {
            match binding.control {
                Control::Axis(axis) => {
                    let mut value = controller.get_axis(source, axis);
                    if binding.invert {
                        value *= -1.0;
                    }
                    if value.abs() <= binding.deadzone {
                        value = 0.0;
                    }
                    output.axes.insert(binding.action.clone(), value);
                }
                Control::Button(button) => {
                    let pressed = controller.get_button(source, button);
                    output
                        .buttons
                        .insert(binding.action.clone(), pressed != binding.invert);
                }
            }
        }

        output
    }
}
