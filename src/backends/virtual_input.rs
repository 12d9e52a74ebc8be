//! Scriptable in-memory input source.
//!
//! [`VirtualInputSource`] stands in for the host engine: plug and unplug
//! named devices, hold physical buttons, set raw axes. Edge state
//! (pressed/released this tick) accumulates until [`end_tick`](VirtualInputSource::end_tick).

use crate::device::{KeyId, PhysicalInputSource, Slot, MAX_AXES};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct VirtualInputSource {
    names: Vec<String>,
    held: HashSet<KeyId>,
    pressed: HashSet<KeyId>,
    released: HashSet<KeyId>,
    axes: HashMap<(Slot, u8), f32>,
}

impl VirtualInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `name` at `slot`, growing the name list with empty entries as needed.
    pub fn plug(&mut self, slot: Slot, name: &str) {
        let pos = slot.position();
        if self.names.len() <= pos {
            self.names.resize(pos + 1, String::new());
        }
        self.names[pos] = name.to_string();
    }

    /// Empty the slot's name and drop its input state. The list keeps its length.
    pub fn unplug(&mut self, slot: Slot) {
        if let Some(name) = self.names.get_mut(slot.position()) {
            name.clear();
        }
        self.clear_inputs(slot);
    }

    /// Shorten the reported name list, as hosts do when trailing devices vanish.
    pub fn truncate(&mut self, len: usize) {
        self.names.truncate(len);
    }

    pub fn press(&mut self, slot: Slot, button: u8) {
        let key = KeyId::for_button(slot, Some(button));
        if !key.is_none() && self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, slot: Slot, button: u8) {
        let key = KeyId::for_button(slot, Some(button));
        if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Set a raw axis by 1-based ordinal. Ordinals outside `1..=MAX_AXES` are ignored.
    pub fn set_axis(&mut self, slot: Slot, axis: u8, value: f32) {
        if (1..=MAX_AXES).contains(&axis) {
            self.axes.insert((slot, axis), value.clamp(-1.0, 1.0));
        }
    }

    /// Forget this tick's press/release edges.
    pub fn end_tick(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    fn clear_inputs(&mut self, slot: Slot) {
        self.axes.retain(|(s, _), _| *s != slot);
        let keys: Vec<KeyId> = (0..crate::device::MAX_BUTTONS_PER_SLOT as u8)
            .map(|i| KeyId::for_button(slot, Some(i)))
            .collect();
        for key in keys {
            self.held.remove(&key);
            self.pressed.remove(&key);
            self.released.remove(&key);
        }
    }
}

impl PhysicalInputSource for VirtualInputSource {
    fn device_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn is_key_held(&self, key: KeyId) -> bool {
        self.held.contains(&key)
    }

    fn is_key_pressed(&self, key: KeyId) -> bool {
        self.pressed.contains(&key)
    }

    fn is_key_released(&self, key: KeyId) -> bool {
        self.released.contains(&key)
    }

    fn axis_raw(&self, slot: Slot, axis: u8) -> f32 {
        self.axes.get(&(slot, axis)).copied().unwrap_or(0.0)
    }
}
