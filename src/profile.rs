//! Per-kind remapping tables.
//!
//! A [`DeviceProfile`] maps each logical button to a physical button index
//! and each logical axis to a zero-based physical axis index. The raw axis
//! ordinal handed to [`PhysicalInputSource::axis_raw`](crate::device::PhysicalInputSource::axis_raw)
//! is `index + 1`.
//!
//! Per-kind value transforms live next to the tables in [`AxisQuirks`], so a
//! new kind is one more [`DeviceKind`] variant with a table and a quirk row.
//!
//! ## Physical layouts
//! XBOX-360-like buttons: `A B X Y LB RB SELECT START LS RS` (0..=9);
//! axes: `LSX LSY TRIGGER RSX RSY DPADX DPADY NULL LT RT` (0..=9).
//!
//! PS4 buttons: `SQUARE CROSS CIRCLE TRIANGLE L1 R1 L2 R2 SHARE OPTIONS L3 R3 PS TOUCHPAD`
//! (0..=13); wired axes: `LSX LSY RSX L2 R2 RSY DPADX DPADY` (0..=7).
//! Wireless PS4 pads report an extra null axis right after `LSX`.

use crate::control::{LogicalAxis, LogicalButton};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete make/model class of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Default for any name not known to be something else.
    Xbox360,
    Ps4Wired,
    Ps4Wireless,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [Self::Xbox360, Self::Ps4Wired, Self::Ps4Wireless];

    /// Remapping table for this kind.
    pub fn profile(self) -> DeviceProfile {
        match self {
            Self::Xbox360 => XBOX_360,
            Self::Ps4Wired => PS4_WIRED,
            Self::Ps4Wireless => PS4_WIRELESS,
        }
    }

    pub fn quirks(self) -> AxisQuirks {
        match self {
            Self::Xbox360 => AxisQuirks {
                invert_y: true,
                remap_triggers: false,
            },
            // Wired PS4 triggers rest at -1.
            Self::Ps4Wired => AxisQuirks {
                invert_y: true,
                remap_triggers: true,
            },
            Self::Ps4Wireless => AxisQuirks {
                invert_y: true,
                remap_triggers: false,
            },
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xbox360 => "XBOX 360",
            Self::Ps4Wired => "PS4 (wired)",
            Self::Ps4Wireless => "PS4 (wireless)",
        })
    }
}

/// Value transforms applied to raw axis samples of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisQuirks {
    /// Flip both stick Y axes so that "up" is positive.
    pub invert_y: bool,
    /// Map triggers from `[-1, 1]` to `[0, 1]` via `(raw + 1) / 2`.
    pub remap_triggers: bool,
}

impl AxisQuirks {
    /// Sign flip, then trigger remap. Deadzone is not part of this.
    pub fn apply(self, axis: LogicalAxis, raw: f32) -> f32 {
        let mut value = raw;
        if self.invert_y && axis.is_stick_y() {
            value = -value;
        }
        if self.remap_triggers && axis.is_trigger() {
            value = (value + 1.0) * 0.5;
        }
        value
    }
}

/// Immutable logical-to-physical lookup table.
///
/// Button entries are `None` where the kind has no matching physical
/// button (e.g. `B7` on XBOX-360-like pads). Those resolve to a key that
/// is never held rather than to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    buttons: [Option<u8>; LogicalButton::COUNT],
    axes: [u8; LogicalAxis::COUNT],
}

impl DeviceProfile {
    #[inline]
    pub fn button(&self, button: LogicalButton) -> Option<u8> {
        self.buttons[button.index()]
    }

    /// Zero-based physical axis index.
    #[inline]
    pub fn axis(&self, axis: LogicalAxis) -> u8 {
        self.axes[axis.index()]
    }

    /// 1-based raw axis ordinal as understood by the input source.
    #[inline]
    pub fn axis_ordinal(&self, axis: LogicalAxis) -> u8 {
        self.axis(axis) + 1
    }

    /// Same buttons, with a null axis inserted after `LSX`: every axis
    /// index except `LSX` shifts up by one.
    const fn with_null_axis_after_lsx(&self) -> DeviceProfile {
        let mut axes = self.axes;
        let mut i = 0;
        while i < axes.len() {
            if i != LogicalAxis::LSX as usize {
                axes[i] += 1;
            }
            i += 1;
        }
        DeviceProfile {
            buttons: self.buttons,
            axes,
        }
    }
}

// Order of both arrays follows LogicalButton::ALL / LogicalAxis::ALL.

#[rustfmt::skip]
const XBOX_360: DeviceProfile = DeviceProfile {
    //        B1       B2       B3       B4       B5       B6       B7    LB       RB       LS       RS
    buttons: [Some(1), Some(3), Some(2), Some(0), Some(6), Some(7), None, Some(4), Some(5), Some(8), Some(9)],
    //    LSX LSY RSX RSY DPADX DPADY LT RT
    axes: [0, 1, 3, 4, 5, 6, 8, 9],
};

#[rustfmt::skip]
const PS4_WIRED: DeviceProfile = DeviceProfile {
    //        B1       B2       B3       B4       B5       B6       B7        LB       RB       LS        RS
    buttons: [Some(2), Some(3), Some(0), Some(1), Some(8), Some(9), Some(12), Some(4), Some(5), Some(10), Some(11)],
    //    LSX LSY RSX RSY DPADX DPADY LT RT
    axes: [0, 1, 2, 5, 6, 7, 3, 4],
};

const PS4_WIRELESS: DeviceProfile = PS4_WIRED.with_null_axis_after_lsx();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wireless_shifts_every_axis_but_lsx() {
        let wired = DeviceKind::Ps4Wired.profile();
        let wireless = DeviceKind::Ps4Wireless.profile();
        for axis in LogicalAxis::ALL {
            let expected = if axis == LogicalAxis::LSX {
                wired.axis(axis)
            } else {
                wired.axis(axis) + 1
            };
            assert_eq!(wireless.axis(axis), expected, "{axis}");
        }
        for button in LogicalButton::ALL {
            assert_eq!(wireless.button(button), wired.button(button));
        }
    }

    #[test]
    fn xbox_has_no_b7() {
        let p = DeviceKind::Xbox360.profile();
        assert_eq!(p.button(LogicalButton::B7), None);
        assert_eq!(p.button(LogicalButton::B4), Some(0));
        assert_eq!(p.axis_ordinal(LogicalAxis::LT), 9);
        assert_eq!(p.axis_ordinal(LogicalAxis::RT), 10);
    }

    #[test]
    fn quirks_flip_y_and_remap_wired_triggers_only() {
        for kind in DeviceKind::ALL {
            let q = kind.quirks();
            assert_eq!(q.apply(LogicalAxis::LSY, -0.5), 0.5);
            assert_eq!(q.apply(LogicalAxis::RSY, 0.25), -0.25);
            assert_eq!(q.apply(LogicalAxis::LSX, -0.5), -0.5);
        }
        assert_eq!(DeviceKind::Ps4Wired.quirks().apply(LogicalAxis::LT, -1.0), 0.0);
        assert_eq!(DeviceKind::Ps4Wired.quirks().apply(LogicalAxis::RT, 0.0), 0.5);
        assert_eq!(DeviceKind::Ps4Wireless.quirks().apply(LogicalAxis::RT, 0.3), 0.3);
        assert_eq!(DeviceKind::Xbox360.quirks().apply(LogicalAxis::LT, 0.02), 0.02);
    }
}
