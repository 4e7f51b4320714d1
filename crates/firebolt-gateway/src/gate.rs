//! Per-event async gates.
//!
//! Subscribe/unsubscribe and provider registration each hold a gate for their
//! event name across the platform round trip, so two transitions on the same
//! event never race while other events proceed independently. Gates are
//! created on demand and pruned once nobody holds or waits on them.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Gate = Arc<AsyncMutex<()>>;

#[derive(Default)]
pub(crate) struct EventGates {
    gates: Mutex<HashMap<String, Gate>>,
}

impl EventGates {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `event`
    pub(crate) async fn lock(&self, event: &str) -> EventGuard<'_> {
        let gate = self
            .gates
            .lock()
            .entry(event.to_string())
            .or_default()
            .clone();

        EventGuard {
            gates: self,
            event: event.to_string(),
            guard: Some(gate.lock_owned().await),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.gates.lock().len()
    }
}

/// Held for the duration of one transition on an event
pub(crate) struct EventGuard<'a> {
    gates: &'a EventGates,
    event: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for EventGuard<'_> {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };
        let gate = Arc::clone(OwnedMutexGuard::mutex(&guard));
        drop(guard);

        let mut gates = self.gates.gates.lock();
        // Only the map and this clone left: no holder, no waiter
        if Arc::strong_count(&gate) == 2 {
            gates.remove(&self.event);
        }
    }
}
