//! Logical controller vocabulary.
//!
//! [`LogicalButton`] and [`LogicalAxis`] are the kind-agnostic identifiers
//! consumers query with. Physical indices stay behind
//! [`DeviceProfile`](crate::profile::DeviceProfile).
//!
//! ## Value conventions
//! - **Sticks:** `[-1.0, 1.0]`, up and right positive.
//! - **Triggers:** `[0.0, 1.0]` on kinds that remap them, raw device range otherwise.
//! - **DPad:** `-1.0 | 0.0 | 1.0` per axis, never deadzoned.

use crate::error::ControlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical buttons, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalButton {
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    LB,
    RB,
    LS,
    RS,
}

/// Logical axes, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalAxis {
    LSX,
    LSY,
    RSX,
    RSY,
    DPADX,
    DPADY,
    LT,
    RT,
}

impl LogicalButton {
    pub const COUNT: usize = 11;

    pub const ALL: [LogicalButton; Self::COUNT] = [
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
        Self::B5,
        Self::B6,
        Self::B7,
        Self::LB,
        Self::RB,
        Self::LS,
        Self::RS,
    ];

    /// Position in [`LogicalButton::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::B4 => "B4",
            Self::B5 => "B5",
            Self::B6 => "B6",
            Self::B7 => "B7",
            Self::LB => "LB",
            Self::RB => "RB",
            Self::LS => "LS",
            Self::RS => "RS",
        }
    }
}

impl LogicalAxis {
    pub const COUNT: usize = 8;

    pub const ALL: [LogicalAxis; Self::COUNT] = [
        Self::LSX,
        Self::LSY,
        Self::RSX,
        Self::RSY,
        Self::DPADX,
        Self::DPADY,
        Self::LT,
        Self::RT,
    ];

    /// Position in [`LogicalAxis::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_dpad(self) -> bool {
        matches!(self, Self::DPADX | Self::DPADY)
    }

    #[inline]
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::LT | Self::RT)
    }

    #[inline]
    pub const fn is_stick_y(self) -> bool {
        matches!(self, Self::LSY | Self::RSY)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LSX => "LSX",
            Self::LSY => "LSY",
            Self::RSX => "RSX",
            Self::RSY => "RSY",
            Self::DPADX => "DPADX",
            Self::DPADY => "DPADY",
            Self::LT => "LT",
            Self::RT => "RT",
        }
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for LogicalButton {
    type Error = ControlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ControlError::ButtonOutOfRange(value))
    }
}

impl TryFrom<u8> for LogicalAxis {
    type Error = ControlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ControlError::AxisOutOfRange(value))
    }
}

impl FromStr for LogicalButton {
    type Err = ControlError;

    /// Case-insensitive match on the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlError::UnknownButton(s.to_string()))
    }
}

impl FromStr for LogicalAxis {
    type Err = ControlError;

    /// Case-insensitive match on the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlError::UnknownAxis(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_order_matches_index() {
        for (i, b) in LogicalButton::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
        for (i, a) in LogicalAxis::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        assert_eq!(LogicalButton::try_from(10), Ok(LogicalButton::RS));
        assert_eq!(
            LogicalButton::try_from(11),
            Err(ControlError::ButtonOutOfRange(11))
        );
        assert_eq!(LogicalAxis::try_from(7), Ok(LogicalAxis::RT));
        assert_eq!(LogicalAxis::try_from(8), Err(ControlError::AxisOutOfRange(8)));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("rsy".parse::<LogicalAxis>(), Ok(LogicalAxis::RSY));
        assert_eq!(" lb ".parse::<LogicalButton>(), Ok(LogicalButton::LB));
        assert!(matches!(
            "B8".parse::<LogicalButton>(),
            Err(ControlError::UnknownButton(_))
        ));
        assert!(matches!(
            "Z".parse::<LogicalAxis>(),
            Err(ControlError::UnknownAxis(_))
        ));
    }
}
