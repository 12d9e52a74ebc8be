use crate::controller::ControllerProfile;
use crate::event::{LifecycleEvent, LifecycleKind};
use crate::eventbus::LifecycleListener;
use tracing::{info, warn};

/// A simple listener that logs every lifecycle event through `tracing`.
///
/// Disconnects and reconnects are logged at `warn` so they stand out
/// without being treated as failures.
#[derive(Debug, Default)]
pub struct LifecycleLogger;

impl LifecycleLogger {
    pub fn new() -> Self {
        LifecycleLogger
    }
}

impl LifecycleListener for LifecycleLogger {
    fn on_event(&mut self, event: &LifecycleEvent, controller: &ControllerProfile) {
        let slot = controller.slot();
        match event.kind {
            LifecycleKind::Registered => info!(
                %slot,
                name = controller.name(),
                kind = %controller.kind(),
                "controller registered"
            ),
            LifecycleKind::Connected => warn!(%slot, tick = event.tick, "controller connected"),
            LifecycleKind::Disconnected => warn!(%slot, tick = event.tick, "controller disconnected"),
        }
    }
}
