//! Physical input boundary.
//!
//! The host engine owns raw polling. This crate only sees it through
//! [`PhysicalInputSource`]: per-slot device names, held/edge state of
//! globally numbered keys, and raw per-slot axis samples.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of physical ports tracked.
pub const MAX_SLOTS: usize = 10;

/// Physical buttons reserved per slot in the global key space.
pub const MAX_BUTTONS_PER_SLOT: u32 = 20;

/// Raw axes per slot, addressed by 1-based ordinal.
pub const MAX_AXES: u8 = 27;

/// Global key id of slot 1, physical button 0.
pub const JOYSTICK_KEY_BASE: u32 = 350;

/// Physical port index in `1..=MAX_SLOTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Slot(u8);

impl Slot {
    pub fn new(n: u32) -> Result<Self, ConfigError> {
        if (1..=MAX_SLOTS as u32).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(ConfigError::InvalidSlot(n))
        }
    }

    /// Slot for a zero-based position in the device-name list.
    pub(crate) fn from_position(i: usize) -> Option<Self> {
        (i < MAX_SLOTS).then(|| Self(i as u8 + 1))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the device-name list.
    #[inline]
    pub const fn position(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        (1..=MAX_SLOTS as u8).map(Slot)
    }
}

impl TryFrom<u32> for Slot {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slot> for u32 {
    fn from(slot: Slot) -> u32 {
        slot.0 as u32
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally numbered physical key, shared by all slots.
///
/// Slot `s`, physical button `i` maps to
/// `JOYSTICK_KEY_BASE + (s - 1) * MAX_BUTTONS_PER_SLOT + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(pub u32);

impl KeyId {
    /// Key that is never held. Absent buttons resolve here.
    pub const NONE: KeyId = KeyId(0);

    /// Globalize a physical button index. `None` (the kind has no such
    /// button) and indices past `MAX_BUTTONS_PER_SLOT` yield [`KeyId::NONE`].
    pub fn for_button(slot: Slot, index: Option<u8>) -> KeyId {
        match index {
            Some(i) if (i as u32) < MAX_BUTTONS_PER_SLOT => KeyId(
                JOYSTICK_KEY_BASE + (slot.get() as u32 - 1) * MAX_BUTTONS_PER_SLOT + i as u32,
            ),
            _ => KeyId::NONE,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == KeyId::NONE
    }
}

/// Host-provided raw input.
///
/// Edge queries (`is_key_pressed` / `is_key_released`) are the host's own
/// per-tick edge detection; they are not recomputed here.
pub trait PhysicalInputSource {
    /// Device name per slot, ascending. Empty string = slot unoccupied.
    /// Entries past `MAX_SLOTS` are ignored.
    fn device_names(&self) -> Vec<String>;

    fn is_key_held(&self, key: KeyId) -> bool;

    fn is_key_pressed(&self, key: KeyId) -> bool;

    fn is_key_released(&self, key: KeyId) -> bool;

    /// Raw value in `[-1, 1]` of the 1-based `axis` ordinal on `slot`.
    fn axis_raw(&self, slot: Slot, axis: u8) -> f32;
}

impl<S: PhysicalInputSource + ?Sized> PhysicalInputSource for &S {
    fn device_names(&self) -> Vec<String> {
        (**self).device_names()
    }

    fn is_key_held(&self, key: KeyId) -> bool {
        (**self).is_key_held(key)
    }

    fn is_key_pressed(&self, key: KeyId) -> bool {
        (**self).is_key_pressed(key)
    }

    fn is_key_released(&self, key: KeyId) -> bool {
        (**self).is_key_released(key)
    }

    fn axis_raw(&self, slot: Slot, axis: u8) -> f32 {
        (**self).axis_raw(slot, axis)
    }
}
