//! Device kind classification.
//!
//! A [`Classify`] implementation decides a [`DeviceKind`] from the raw device
//! name and a [`RawProbe`] of the still-unclassified device. The registry
//! only talks to the trait, so heuristics can be swapped without touching
//! [`ControllerProfile`](crate::controller::ControllerProfile).

use crate::device::{PhysicalInputSource, Slot, MAX_AXES};
use crate::profile::DeviceKind;
use tracing::{debug, info};

/// Raw axis ordinal sampled to tell wired from wireless PS4 pads.
pub const PS4_WIRED_PROBE_AXIS: u8 = 2;

/// Names PS4 pads are known to report.
pub const DEFAULT_PS4_ALIASES: [&str; 2] = ["Wireless Controller", "054c-05c4-Wireless Controller"];

/// Raw axis samples of one slot, taken before any remapping exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProbe {
    axes: [f32; MAX_AXES as usize],
}

impl RawProbe {
    /// Sample every raw axis of `slot`.
    pub fn capture<S: PhysicalInputSource + ?Sized>(source: &S, slot: Slot) -> Self {
        let mut axes = [0.0; MAX_AXES as usize];
        for (i, value) in axes.iter_mut().enumerate() {
            *value = source.axis_raw(slot, i as u8 + 1);
        }
        Self { axes }
    }

    /// Probe with every axis at `0.0` except the given `(ordinal, value)` pairs.
    pub fn from_samples(samples: &[(u8, f32)]) -> Self {
        let mut axes = [0.0; MAX_AXES as usize];
        for &(ordinal, value) in samples {
            if (1..=MAX_AXES).contains(&ordinal) {
                axes[ordinal as usize - 1] = value;
            }
        }
        Self { axes }
    }

    /// Raw value at a 1-based ordinal; `0.0` outside `1..=MAX_AXES`.
    pub fn axis(&self, ordinal: u8) -> f32 {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.axes.get(i as usize))
            .copied()
            .unwrap_or(0.0)
    }
}

pub trait Classify {
    fn classify(&self, name: &str, probe: &RawProbe) -> DeviceKind;
}

/// Exact-name classifier.
///
/// Names in `ps4_aliases` are PS4 pads; anything else, recognised or not,
/// is treated as an XBOX-360-like pad. PS4 connection type comes from raw
/// axis 2: bluetooth pads always report exactly `0.0` there.
#[derive(Debug, Clone)]
pub struct NameClassifier {
    ps4_aliases: Vec<String>,
}

impl NameClassifier {
    pub fn new<I, S>(ps4_aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ps4_aliases: ps4_aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ps4_aliases(&self) -> &[String] {
        &self.ps4_aliases
    }
}

impl Default for NameClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PS4_ALIASES)
    }
}

impl Classify for NameClassifier {
    fn classify(&self, name: &str, probe: &RawProbe) -> DeviceKind {
        if self.ps4_aliases.iter().any(|alias| alias == name) {
            let wired = probe.axis(PS4_WIRED_PROBE_AXIS) != 0.0;
            debug!(name, wired, "matched PS4 alias");
            if wired {
                DeviceKind::Ps4Wired
            } else {
                DeviceKind::Ps4Wireless
            }
        } else {
            info!(name, "no specific layout for device name, assuming XBOX 360");
            DeviceKind::Xbox360
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps4_aliases_split_on_axis_two() {
        let c = NameClassifier::default();
        let wireless = RawProbe::from_samples(&[(1, 0.7)]);
        let wired = RawProbe::from_samples(&[(2, -0.01)]);
        assert_eq!(c.classify("Wireless Controller", &wireless), DeviceKind::Ps4Wireless);
        assert_eq!(c.classify("Wireless Controller", &wired), DeviceKind::Ps4Wired);
        assert_eq!(
            c.classify("054c-05c4-Wireless Controller", &wired),
            DeviceKind::Ps4Wired
        );
    }

    #[test]
    fn unknown_names_default_to_xbox() {
        let c = NameClassifier::default();
        let probe = RawProbe::from_samples(&[(2, 1.0)]);
        assert_eq!(c.classify("Controller (XBOX 360 For Windows)", &probe), DeviceKind::Xbox360);
        assert_eq!(c.classify("Some Arcade Stick", &probe), DeviceKind::Xbox360);
        // Matching is exact.
        assert_eq!(c.classify("wireless controller", &probe), DeviceKind::Xbox360);
    }

    #[test]
    fn custom_aliases_replace_defaults() {
        let c = NameClassifier::new(["DUALSHOCK 4"]);
        let probe = RawProbe::from_samples(&[]);
        assert_eq!(c.classify("DUALSHOCK 4", &probe), DeviceKind::Ps4Wireless);
        assert_eq!(c.classify("Wireless Controller", &probe), DeviceKind::Xbox360);
    }

    #[test]
    fn probe_ordinals_are_one_based() {
        let p = RawProbe::from_samples(&[(1, 0.1), (27, 0.2), (28, 0.3), (0, 0.4)]);
        assert_eq!(p.axis(1), 0.1);
        assert_eq!(p.axis(27), 0.2);
        assert_eq!(p.axis(28), 0.0);
        assert_eq!(p.axis(0), 0.0);
    }
}
