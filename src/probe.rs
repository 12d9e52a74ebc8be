//! Post-connect readiness probe.
//!
//! Right after a device appears its axes can report garbage until the OS
//! handshake settles. A [`NeutralProbe`] is polled once per tick and stays
//! [`ProbeStatus::Pending`] while the slot reads fully neutral: every
//! physical button up and every raw axis exactly `0.0`. The first
//! non-neutral tick yields a [`RawProbe`] for classification.

use crate::classifier::RawProbe;
use crate::device::{KeyId, PhysicalInputSource, Slot, MAX_AXES, MAX_BUTTONS_PER_SLOT};
use tracing::trace;

/// Whether every physical button and raw axis on `slot` is at rest.
pub fn is_neutral<S: PhysicalInputSource + ?Sized>(source: &S, slot: Slot) -> bool {
    let buttons_up = (0..MAX_BUTTONS_PER_SLOT as u8)
        .all(|i| !source.is_key_held(KeyId::for_button(slot, Some(i))));
    buttons_up && (1..=MAX_AXES).all(|axis| source.axis_raw(slot, axis) == 0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStatus {
    /// Still neutral; poll again next tick.
    Pending,
    /// Device produced input. Carries the raw sample to classify from.
    Ready(RawProbe),
    /// Gave up after the configured number of polls.
    TimedOut,
}

/// Cooperative probe for one slot.
#[derive(Debug, Clone)]
pub struct NeutralProbe {
    slot: Slot,
    name: String,
    polls: u32,
    timeout: Option<u32>,
}

impl NeutralProbe {
    /// `timeout` is the number of neutral polls tolerated; `None` waits forever.
    pub fn new(slot: Slot, name: impl Into<String>, timeout: Option<u32>) -> Self {
        Self {
            slot,
            name: name.into(),
            polls: 0,
            timeout,
        }
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Name observed when the slot appeared.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Neutral polls so far.
    #[inline]
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn poll<S: PhysicalInputSource + ?Sized>(&mut self, source: &S) -> ProbeStatus {
        if !is_neutral(source, self.slot) {
            return ProbeStatus::Ready(RawProbe::capture(source, self.slot));
        }
        self.polls += 1;
        trace!(slot = %self.slot, polls = self.polls, "device still neutral");
        match self.timeout {
            Some(limit) if self.polls >= limit => ProbeStatus::TimedOut,
            _ => ProbeStatus::Pending,
        }
    }
}

#[cfg(all(test, feature = "virtual"))]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualInputSource;

    fn slot(n: u32) -> Slot {
        Slot::new(n).unwrap()
    }

    #[test]
    fn waits_for_any_input() {
        let mut src = VirtualInputSource::new();
        src.plug(slot(1), "pad");
        let mut probe = NeutralProbe::new(slot(1), "pad", None);
        for _ in 0..5 {
            assert_eq!(probe.poll(&src), ProbeStatus::Pending);
        }
        assert_eq!(probe.polls(), 5);

        src.press(slot(1), 19);
        assert!(matches!(probe.poll(&src), ProbeStatus::Ready(_)));
    }

    #[test]
    fn ready_probe_carries_raw_axes() {
        let mut src = VirtualInputSource::new();
        src.set_axis(slot(4), 2, 0.25);
        src.set_axis(slot(4), 27, -1.0);
        let mut probe = NeutralProbe::new(slot(4), "pad", None);
        match probe.poll(&src) {
            ProbeStatus::Ready(raw) => {
                assert_eq!(raw.axis(2), 0.25);
                assert_eq!(raw.axis(27), -1.0);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn other_slots_do_not_wake_the_probe() {
        let mut src = VirtualInputSource::new();
        src.press(slot(2), 0);
        src.set_axis(slot(3), 1, 1.0);
        assert!(is_neutral(&src, slot(1)));
        assert!(!is_neutral(&src, slot(2)));
    }

    #[test]
    fn bounded_probe_times_out() {
        let src = VirtualInputSource::new();
        let mut probe = NeutralProbe::new(slot(1), "pad", Some(3));
        assert_eq!(probe.poll(&src), ProbeStatus::Pending);
        assert_eq!(probe.poll(&src), ProbeStatus::Pending);
        assert_eq!(probe.poll(&src), ProbeStatus::TimedOut);
    }
}
