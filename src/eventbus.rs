use crate::controller::ControllerProfile;
use crate::device::Slot;
use crate::event::{LifecycleEvent, LifecycleKind};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::error;

/// Trait for reacting to controller lifecycle changes.
pub trait LifecycleListener {
    fn on_event(&mut self, event: &LifecycleEvent, controller: &ControllerProfile);
}

impl<F> LifecycleListener for F
where
    F: FnMut(&LifecycleEvent, &ControllerProfile),
{
    fn on_event(&mut self, event: &LifecycleEvent, controller: &ControllerProfile) {
        self(event, controller)
    }
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    /// `Registered` only.
    RegistrationOnly,
    /// `Connected` and `Disconnected`.
    ConnectionOnly,
    Custom(fn(&LifecycleEvent) -> bool),
}

impl EventFilter {
    fn accepts(&self, event: &LifecycleEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::RegistrationOnly => event.kind == LifecycleKind::Registered,
            EventFilter::ConnectionOnly => matches!(
                event.kind,
                LifecycleKind::Connected | LifecycleKind::Disconnected
            ),
            EventFilter::Custom(f) => f(event),
        }
    }
}

/// Handle returned by [`LifecycleEventBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    id: ListenerId,
    listener: Box<dyn LifecycleListener>,
    enabled: bool,
    filter: EventFilter,
    slot: Option<Slot>,
}

/// Broadcasts lifecycle events to listeners in registration order.
///
/// A listener that panics is logged and skipped; the rest still receive
/// the event.
#[derive(Default)]
pub struct LifecycleEventBus {
    next_id: u64,
    listeners: Vec<ListenerEntry>,
}

impl LifecycleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with optional filtering and slot restriction.
    pub fn add_listener(
        &mut self,
        listener: impl LifecycleListener + 'static,
        filter: EventFilter,
        slot: Option<Slot>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(ListenerEntry {
            id,
            listener: Box::new(listener),
            enabled: true,
            filter,
            slot,
        });
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely. Returns `false` if it was unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn entry_mut(&mut self, id: ListenerId) -> Option<&mut ListenerEntry> {
        self.listeners.iter_mut().find(|entry| entry.id == id)
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, event: &LifecycleEvent, controller: &ControllerProfile) {
        for entry in self.listeners.iter_mut() {
            if !entry.enabled {
                continue;
            }

            if let Some(wanted) = entry.slot {
                if event.slot() != wanted {
                    continue;
                }
            }

            if !entry.filter.accepts(event) {
                continue;
            }

            let listener = &mut entry.listener;
            let delivered = catch_unwind(AssertUnwindSafe(|| listener.on_event(event, controller)));
            if delivered.is_err() {
                error!(
                    listener = entry.id.0,
                    kind = ?event.kind,
                    slot = %event.slot(),
                    "lifecycle listener panicked"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ProfileId, DEADZONE};
    use crate::profile::DeviceKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(slot: u32) -> ControllerProfile {
        ControllerProfile::new(
            ProfileId(slot as u64),
            Slot::new(slot).unwrap(),
            "pad",
            DeviceKind::Xbox360,
            DEADZONE,
        )
    }

    fn event(kind: LifecycleKind, c: &ControllerProfile) -> LifecycleEvent {
        LifecycleEvent::new(0, kind, c.info())
    }

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = LifecycleEventBus::new();
        for tag in ["a", "b", "c"] {
            let log = log.clone();
            bus.add_listener(
                move |_: &LifecycleEvent, _: &ControllerProfile| log.borrow_mut().push(tag),
                EventFilter::All,
                None,
            );
        }
        let c = controller(1);
        bus.emit(&event(LifecycleKind::Connected, &c), &c);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn panicking_listener_does_not_block_others() {
        let hits = Rc::new(RefCell::new(0));
        let mut bus = LifecycleEventBus::new();
        bus.add_listener(
            |_: &LifecycleEvent, _: &ControllerProfile| panic!("boom"),
            EventFilter::All,
            None,
        );
        let h = hits.clone();
        bus.add_listener(
            move |_: &LifecycleEvent, _: &ControllerProfile| *h.borrow_mut() += 1,
            EventFilter::All,
            None,
        );
        let c = controller(1);
        bus.emit(&event(LifecycleKind::Registered, &c), &c);
        bus.emit(&event(LifecycleKind::Connected, &c), &c);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn filters_slots_and_muting() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = LifecycleEventBus::new();
        let s = seen.clone();
        let id = bus.add_listener(
            move |e: &LifecycleEvent, _: &ControllerProfile| s.borrow_mut().push(e.kind),
            EventFilter::ConnectionOnly,
            Some(Slot::new(2).unwrap()),
        );

        let c1 = controller(1);
        let c2 = controller(2);
        bus.emit(&event(LifecycleKind::Connected, &c1), &c1);
        bus.emit(&event(LifecycleKind::Registered, &c2), &c2);
        bus.emit(&event(LifecycleKind::Connected, &c2), &c2);
        bus.disable(id);
        bus.emit(&event(LifecycleKind::Disconnected, &c2), &c2);
        bus.enable(id);
        bus.emit(&event(LifecycleKind::Disconnected, &c2), &c2);
        assert_eq!(
            *seen.borrow(),
            vec![LifecycleKind::Connected, LifecycleKind::Disconnected]
        );

        assert!(bus.remove_listener(id));
        assert!(!bus.remove_listener(id));
        assert!(bus.is_empty());
    }
}
