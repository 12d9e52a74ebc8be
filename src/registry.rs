//! Slot registry and hot-plug tracking.
//!
//! [`ControllerRegistry::tick`] is called once per host frame. Per slot the
//! state runs `Empty -> Probing -> Bound(active) <-> Bound(inactive)`; a
//! bound slot keeps its profile for the registry's lifetime.
//!
//! Each tick:
//! 1. Sample the device-name list.
//! 2. Start a [`NeutralProbe`] for every slot whose name went from empty to
//!    non-empty, or that lies past last tick's list length. A new probe
//!    replaces any probe still pending for that slot.
//! 3. Deactivate bound slots whose name is now empty, re-activate bound
//!    slots whose name is non-empty again.
//! 4. Remember the list for the next diff.
//! 5. Poll every pending probe once (new ones included). Finished probes are
//!    classified, bound, and announced as `Registered` then `Connected`.

use crate::classifier::{Classify, NameClassifier};
use crate::config::RegistryConfig;
use crate::controller::{ControllerProfile, ProfileId};
use crate::device::{PhysicalInputSource, Slot, MAX_SLOTS};
use crate::error::ConfigError;
use crate::event::{LifecycleEvent, LifecycleKind};
use crate::eventbus::{EventFilter, LifecycleEventBus, LifecycleListener, ListenerId};
use crate::metadata::ControllerInfo;
use crate::probe::{NeutralProbe, ProbeStatus};
use crate::profile::DeviceKind;
use crate::snapshot::{ControllerState, Snapshot};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub struct ControllerRegistry {
    config: RegistryConfig,
    classifier: Box<dyn Classify>,
    profiles: BTreeMap<Slot, ControllerProfile>,
    probes: Vec<NeutralProbe>,
    prev_names: Vec<String>,
    bus: LifecycleEventBus,
    tick: u64,
    next_id: u64,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        let config = RegistryConfig::default();
        let classifier = NameClassifier::new(config.ps4_aliases.iter().cloned());
        Self::build(config, Box::new(classifier))
    }
}

impl ControllerRegistry {
    /// Registry using a [`NameClassifier`] built from `config.ps4_aliases`.
    ///
    /// `config` is validated here as well, so struct-literal configs get the
    /// same checks as [`RegistryConfig::from_toml_str`].
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        let classifier = NameClassifier::new(config.ps4_aliases.iter().cloned());
        Self::with_classifier(config, classifier)
    }

    pub fn with_classifier(
        config: RegistryConfig,
        classifier: impl Classify + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Box::new(classifier)))
    }

    fn build(config: RegistryConfig, classifier: Box<dyn Classify>) -> Self {
        Self {
            config,
            classifier,
            profiles: BTreeMap::new(),
            probes: Vec::new(),
            prev_names: Vec::new(),
            bus: LifecycleEventBus::new(),
            tick: 0,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn add_listener(
        &mut self,
        listener: impl LifecycleListener + 'static,
        filter: EventFilter,
        slot: Option<Slot>,
    ) -> ListenerId {
        self.bus.add_listener(listener, filter, slot)
    }

    /// Listener management (enable, disable, remove).
    pub fn event_bus(&mut self) -> &mut LifecycleEventBus {
        &mut self.bus
    }

    /// Run one polling cycle. Returns the lifecycle events raised, in order.
    pub fn tick<S: PhysicalInputSource + ?Sized>(&mut self, source: &S) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();

        let mut names = source.device_names();
        names.truncate(MAX_SLOTS);
        if self.tick == 0 {
            let count = names.iter().filter(|n| !n.is_empty()).count();
            info!("Detected {} controller{}", count, if count == 1 { "" } else { "s" });
        }

        for (i, name) in names.iter().enumerate() {
            let appeared = match self.prev_names.get(i) {
                Some(prev) => prev.is_empty() && !name.is_empty(),
                None => true,
            };
            if appeared {
                if let Some(slot) = Slot::from_position(i) {
                    self.start_probe(slot, name);
                }
            }
        }

        // Slots past the end of the list count as empty.
        let slots: Vec<Slot> = self.profiles.keys().copied().collect();
        for slot in slots {
            let present = names.get(slot.position()).is_some_and(|n| !n.is_empty());
            if present {
                self.connect(slot, &mut events);
            } else {
                self.disconnect(slot, &mut events);
            }
        }

        self.prev_names = names;
        self.advance_probes(source, &mut events);
        self.tick += 1;
        events
    }

    fn start_probe(&mut self, slot: Slot, name: &str) {
        if name.is_empty() {
            debug!(%slot, "empty device slot, ignoring");
            return;
        }
        if self.profiles.contains_key(&slot) {
            debug!(%slot, "slot already bound, reusing existing controller");
            return;
        }
        if self.profiles.len() >= MAX_SLOTS {
            warn!(%slot, "more controllers than supported, ignoring");
            return;
        }
        // A replug restarts probing under the name reported now.
        self.probes.retain(|p| p.slot() != slot);
        info!(%slot, name, "attempting to connect controller");
        self.probes
            .push(NeutralProbe::new(slot, name, self.config.probe_timeout_ticks));
    }

    fn advance_probes<S: PhysicalInputSource + ?Sized>(
        &mut self,
        source: &S,
        events: &mut Vec<LifecycleEvent>,
    ) {
        let mut pending = Vec::with_capacity(self.probes.len());
        for mut probe in std::mem::take(&mut self.probes) {
            match probe.poll(source) {
                ProbeStatus::Pending => pending.push(probe),
                ProbeStatus::TimedOut => warn!(
                    slot = %probe.slot(),
                    polls = probe.polls(),
                    "no input from controller, giving up until it reappears"
                ),
                ProbeStatus::Ready(raw) => {
                    let kind = self.classifier.classify(probe.name(), &raw);
                    self.bind(probe.slot(), probe.name(), kind, events);
                }
            }
        }
        self.probes = pending;
    }

    fn bind(
        &mut self,
        slot: Slot,
        name: &str,
        kind: DeviceKind,
        events: &mut Vec<LifecycleEvent>,
    ) {
        if self.profiles.contains_key(&slot) {
            warn!(%slot, "controller already bound to slot, discarding duplicate probe");
            return;
        }
        let id = ProfileId(self.next_id);
        self.next_id += 1;
        let profile = ControllerProfile::new(id, slot, name, kind, self.config.deadzone);
        info!(%slot, name, %kind, "successfully connected controller");
        self.profiles.insert(slot, profile);
        self.notify(slot, LifecycleKind::Registered, events);
        self.notify(slot, LifecycleKind::Connected, events);
    }

    fn connect(&mut self, slot: Slot, events: &mut Vec<LifecycleEvent>) {
        let changed = self.profiles.get_mut(&slot).is_some_and(|p| p.activate());
        if changed {
            warn!(%slot, "controller has been connected");
            self.notify(slot, LifecycleKind::Connected, events);
        }
    }

    fn disconnect(&mut self, slot: Slot, events: &mut Vec<LifecycleEvent>) {
        let changed = self.profiles.get_mut(&slot).is_some_and(|p| p.deactivate());
        if changed {
            warn!(%slot, "controller has been disconnected");
            self.notify(slot, LifecycleKind::Disconnected, events);
        }
    }

    fn notify(&mut self, slot: Slot, kind: LifecycleKind, events: &mut Vec<LifecycleEvent>) {
        let Some(profile) = self.profiles.get(&slot) else {
            return;
        };
        let event = LifecycleEvent::new(self.tick, kind, profile.info());
        self.bus.emit(&event, profile);
        events.push(event);
    }

    /// Profile bound to `slot`, active or not.
    pub fn get_by_slot(&self, slot: Slot) -> Option<&ControllerProfile> {
        self.profiles.get(&slot)
    }

    /// `n`-th (1-based) currently active profile in ascending slot order.
    pub fn get_by_ordinal(&self, n: usize) -> Option<&ControllerProfile> {
        self.active().nth(n.checked_sub(1)?)
    }

    /// Active profiles in ascending slot order.
    pub fn active(&self) -> impl Iterator<Item = &ControllerProfile> {
        self.profiles.values().filter(|p| p.is_active())
    }

    /// Every bound profile in ascending slot order.
    pub fn profiles(&self) -> impl Iterator<Item = &ControllerProfile> {
        self.profiles.values()
    }

    pub fn controllers(&self) -> Vec<ControllerInfo> {
        self.profiles.values().map(ControllerProfile::info).collect()
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Slots with a readiness probe still waiting for input.
    pub fn probing(&self) -> Vec<Slot> {
        self.probes.iter().map(NeutralProbe::slot).collect()
    }

    /// Logical state of every bound controller as of now.
    pub fn snapshot<S: PhysicalInputSource + ?Sized>(&self, source: &S) -> Snapshot {
        Snapshot(
            self.profiles
                .iter()
                .map(|(&slot, profile)| (slot, ControllerState::capture(profile, source)))
                .collect(),
        )
    }
}
