//! A classified controller bound to one slot.
//!
//! [`ControllerProfile`] turns logical queries into physical ones through
//! its [`DeviceProfile`], then applies the kind's [`AxisQuirks`] and the
//! deadzone. While inactive every query reports neutral (`false` / `0.0`).
//!
//! ## Axis pipeline
//! 1. Read the raw sample at the mapped axis ordinal.
//! 2. Sign-flip stick Y axes.
//! 3. Remap triggers to `[0, 1]` on kinds that need it.
//! 4. Deadzone: `|v| <= deadzone` becomes exactly `0.0`.
//!
//! [`get_axis_raw`](ControllerProfile::get_axis_raw) stops after step 3,
//! and DPad axes always take that path.

use crate::control::{LogicalAxis, LogicalButton};
use crate::device::{KeyId, PhysicalInputSource, Slot, MAX_AXES};
use crate::metadata::ControllerInfo;
use crate::profile::{AxisQuirks, DeviceKind, DeviceProfile};

/// Default analog deadzone.
pub const DEADZONE: f32 = 1.0 / 8.0;

/// Identity of a profile, unique for the lifetime of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ProfileId(pub u64);

pub struct ControllerProfile {
    id: ProfileId,
    slot: Slot,
    name: String,
    kind: DeviceKind,
    table: DeviceProfile,
    quirks: AxisQuirks,
    deadzone: f32,
    active: bool,
}

impl ControllerProfile {
    /// New, active profile. Kind, table and quirks are fixed from here on.
    pub fn new(id: ProfileId, slot: Slot, name: impl Into<String>, kind: DeviceKind, deadzone: f32) -> Self {
        Self {
            id,
            slot,
            name: name.into(),
            kind,
            table: kind.profile(),
            quirks: kind.quirks(),
            deadzone,
            active: true,
        }
    }

    #[inline]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Device name as reported when the profile was classified.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    #[inline]
    pub fn device_profile(&self) -> &DeviceProfile {
        &self.table
    }

    #[inline]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the state changed.
    pub(crate) fn activate(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// Returns `true` if the state changed.
    pub(crate) fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn info(&self) -> ControllerInfo {
        ControllerInfo {
            id: self.id,
            slot: self.slot,
            name: self.name.clone(),
            kind: self.kind,
            active: self.active,
        }
    }

    fn key(&self, button: LogicalButton) -> KeyId {
        KeyId::for_button(self.slot, self.table.button(button))
    }

    /// Held state of a logical button.
    pub fn get_button<S: PhysicalInputSource + ?Sized>(&self, source: &S, button: LogicalButton) -> bool {
        let key = self.key(button);
        self.active && !key.is_none() && source.is_key_held(key)
    }

    /// `true` only on the tick the button went down (host edge detection).
    pub fn get_button_down<S: PhysicalInputSource + ?Sized>(&self, source: &S, button: LogicalButton) -> bool {
        let key = self.key(button);
        self.active && !key.is_none() && source.is_key_pressed(key)
    }

    /// `true` only on the tick the button came up (host edge detection).
    pub fn get_button_up<S: PhysicalInputSource + ?Sized>(&self, source: &S, button: LogicalButton) -> bool {
        let key = self.key(button);
        self.active && !key.is_none() && source.is_key_released(key)
    }

    /// Whether any logical button is held, checked in enumeration order.
    pub fn any_button_down<S: PhysicalInputSource + ?Sized>(&self, source: &S) -> bool {
        LogicalButton::ALL
            .iter()
            .any(|&button| self.get_button(source, button))
    }

    /// Transformed axis value with deadzone. DPad axes skip the deadzone.
    pub fn get_axis<S: PhysicalInputSource + ?Sized>(&self, source: &S, axis: LogicalAxis) -> f32 {
        let value = self.get_axis_raw(source, axis);
        if axis.is_dpad() || value.abs() > self.deadzone {
            value
        } else {
            0.0
        }
    }

    /// Transformed axis value without deadzone.
    pub fn get_axis_raw<S: PhysicalInputSource + ?Sized>(&self, source: &S, axis: LogicalAxis) -> f32 {
        if !self.active {
            return 0.0;
        }
        let raw = source.axis_raw(self.slot, self.table.axis_ordinal(axis));
        self.quirks.apply(axis, raw)
    }

    /// Unmapped physical button, by index on this slot.
    pub fn button_raw<S: PhysicalInputSource + ?Sized>(&self, source: &S, index: u8) -> bool {
        let key = KeyId::for_button(self.slot, Some(index));
        !key.is_none() && source.is_key_held(key)
    }

    /// Unmapped raw axis by 1-based ordinal. Ordinals outside
    /// `1..=MAX_AXES` read as `0.0`.
    pub fn axis_raw_physical<S: PhysicalInputSource + ?Sized>(&self, source: &S, ordinal: u8) -> f32 {
        if (1..=MAX_AXES).contains(&ordinal) {
            source.axis_raw(self.slot, ordinal)
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for ControllerProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerProfile")
            .field("id", &self.id)
            .field("slot", &self.slot)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(all(test, feature = "virtual"))]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualInputSource;

    fn slot(n: u32) -> Slot {
        Slot::new(n).unwrap()
    }

    fn profile(kind: DeviceKind) -> ControllerProfile {
        ControllerProfile::new(ProfileId(0), slot(2), "pad", kind, DEADZONE)
    }

    #[test]
    fn wireless_ps4_flips_rsy_without_remap() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Ps4Wireless);
        // RSY is physical axis 6 on wireless pads, ordinal 7.
        src.set_axis(slot(2), 7, -0.5);
        assert_eq!(p.get_axis(&src, LogicalAxis::RSY), 0.5);
    }

    #[test]
    fn xbox_trigger_noise_is_clamped() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Xbox360);
        src.set_axis(slot(2), 9, 0.02);
        assert_eq!(p.get_axis_raw(&src, LogicalAxis::LT), 0.02);
        assert_eq!(p.get_axis(&src, LogicalAxis::LT), 0.0);
    }

    #[test]
    fn wired_ps4_trigger_rest_reads_zero() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Ps4Wired);
        src.set_axis(slot(2), 4, -1.0);
        src.set_axis(slot(2), 5, 1.0);
        assert_eq!(p.get_axis(&src, LogicalAxis::LT), 0.0);
        assert_eq!(p.get_axis(&src, LogicalAxis::RT), 1.0);
    }

    #[test]
    fn dpad_is_never_deadzoned() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Xbox360);
        src.set_axis(slot(2), 6, 0.1);
        assert_eq!(p.get_axis(&src, LogicalAxis::DPADX), 0.1);
    }

    #[test]
    fn absent_button_is_never_held() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Xbox360);
        for i in 0..20 {
            src.press(slot(2), i);
        }
        assert!(!p.get_button(&src, LogicalButton::B7));
        assert!(p.get_button(&src, LogicalButton::B4));
    }

    #[test]
    fn inactive_profile_reports_neutral() {
        let mut src = VirtualInputSource::new();
        let mut p = profile(DeviceKind::Xbox360);
        src.press(slot(2), 0);
        src.set_axis(slot(2), 1, 0.9);
        assert!(p.deactivate());
        assert!(!p.deactivate());
        assert!(!p.get_button(&src, LogicalButton::B4));
        assert!(!p.get_button_down(&src, LogicalButton::B4));
        assert!(!p.any_button_down(&src));
        assert_eq!(p.get_axis(&src, LogicalAxis::LSX), 0.0);
        assert_eq!(p.get_axis_raw(&src, LogicalAxis::LSX), 0.0);
        assert!(p.activate());
        assert!(!p.activate());
        assert_eq!(p.get_axis(&src, LogicalAxis::LSX), 0.9);
    }

    #[test]
    fn edges_come_from_the_source() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Ps4Wired);
        // B4 -> CROSS (1)
        src.press(slot(2), 1);
        assert!(p.get_button_down(&src, LogicalButton::B4));
        assert!(p.any_button_down(&src));
        src.end_tick();
        assert!(!p.get_button_down(&src, LogicalButton::B4));
        assert!(p.get_button(&src, LogicalButton::B4));
        src.release(slot(2), 1);
        assert!(p.get_button_up(&src, LogicalButton::B4));
        assert!(!p.any_button_down(&src));
    }

    #[test]
    fn slots_do_not_bleed_into_each_other() {
        let mut src = VirtualInputSource::new();
        let p = profile(DeviceKind::Xbox360);
        src.press(slot(1), 0);
        src.set_axis(slot(3), 1, 1.0);
        assert!(!p.any_button_down(&src));
        assert_eq!(p.get_axis(&src, LogicalAxis::LSX), 0.0);
    }
}
