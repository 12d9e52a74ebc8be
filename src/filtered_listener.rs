use crate::controller::ControllerProfile;
use crate::event::LifecycleEvent;
use crate::eventbus::LifecycleListener;

/// Wraps a listener and filters events based on a user-supplied predicate.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&LifecycleEvent) -> bool>,
    inner: Box<dyn LifecycleListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&LifecycleEvent) -> bool + 'static,
        inner: impl LifecycleListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl LifecycleListener for FilteredListener {
    fn on_event(&mut self, event: &LifecycleEvent, controller: &ControllerProfile) {
        if (self.predicate)(event) {
            self.inner.on_event(event, controller);
        }
    }
}
