//! Event subscription registry.
//!
//! Many application listeners can share one platform subscription. The first
//! listener for an event name sends `{"listen": true}`, the last one to leave
//! sends `{"listen": false}`. Notifications fan out to a snapshot of the
//! listener set, so a listener may unsubscribe from inside its own callback.

use crate::client::RpcClient;
use crate::domain::error::FireboltResult;
use crate::domain::frames::listen_params;
use crate::gate::EventGates;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Callback invoked with each notification payload
pub type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handle identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
struct Subscription {
    listeners: Vec<(ListenerId, Listener)>,
}

/// Per-event listener sets
pub struct EventRegistry {
    subscriptions: RwLock<HashMap<String, Subscription>>,
    /// Serializes subscribe/unsubscribe per event so the platform sees one RPC
    /// per transition. Dispatch never takes it.
    gates: EventGates,
    client: Arc<RpcClient>,
    subscribe_timeout: Duration,
    next_listener: AtomicU64,
}

impl EventRegistry {
    pub fn new(client: Arc<RpcClient>, subscribe_timeout: Duration) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            gates: EventGates::new(),
            client,
            subscribe_timeout,
            next_listener: AtomicU64::new(1),
        }
    }

    /// Attach a listener to `event`.
    ///
    /// The first listener for an event issues the subscribe RPC; if that
    /// fails the error is returned and the listener is not added.
    pub async fn subscribe(&self, event: &str, listener: Listener) -> FireboltResult<ListenerId> {
        let _gate = self.gates.lock(event).await;

        let subscribed = self.subscriptions.read().contains_key(event);
        if !subscribed {
            self.client
                .call(event, listen_params(true), Some(self.subscribe_timeout))
                .await
                .map_err(|e| {
                    warn!(event = event, error = %e, "Subscribe failed");
                    e
                })?;
            debug!(event = event, "Subscribed");
        }

        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .write()
            .entry(event.to_string())
            .or_default()
            .listeners
            .push((id, listener));

        debug!(event = event, listener = %id, "Listener added");
        Ok(id)
    }

    /// Attach a listener that receives the decoded payload.
    ///
    /// Payloads that do not decode as `T` are logged and skipped.
    pub async fn subscribe_as<T, F>(&self, event: &str, listener: F) -> FireboltResult<ListenerId>
    where
        T: DeserializeOwned,
        F: Fn(T) + Send + Sync + 'static,
    {
        let name = event.to_string();
        let wrapped: Listener = Arc::new(move |value: &Value| {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(payload) => listener(payload),
                Err(e) => warn!(event = %name, error = %e, "Cannot decode event payload"),
            }
        });
        self.subscribe(event, wrapped).await
    }

    /// Detach a listener.
    ///
    /// Unknown listeners are ignored. Removing the last listener drops the
    /// subscription locally and sends the unsubscribe RPC; an RPC failure is
    /// returned but the local state stays removed.
    pub async fn unsubscribe(&self, event: &str, id: ListenerId) -> FireboltResult<()> {
        let _gate = self.gates.lock(event).await;

        let now_empty = {
            let mut subscriptions = self.subscriptions.write();
            let Some(subscription) = subscriptions.get_mut(event) else {
                return Ok(());
            };
            let before = subscription.listeners.len();
            subscription.listeners.retain(|(listener, _)| *listener != id);
            if subscription.listeners.len() == before {
                return Ok(());
            }
            let empty = subscription.listeners.is_empty();
            if empty {
                subscriptions.remove(event);
            }
            empty
        };

        debug!(event = event, listener = %id, "Listener removed");
        if !now_empty {
            return Ok(());
        }

        self.client
            .call(event, listen_params(false), Some(self.subscribe_timeout))
            .await
            .map(|_| debug!(event = event, "Unsubscribed"))
            .map_err(|e| {
                warn!(event = event, error = %e, "Unsubscribe failed");
                e
            })
    }

    /// Deliver a notification to every listener of `event`.
    ///
    /// Returns how many listeners ran to completion. A panicking listener is
    /// logged and does not stop the others.
    pub fn dispatch(&self, event: &str, payload: &Value) -> usize {
        let snapshot: Vec<(ListenerId, Listener)> = match self.subscriptions.read().get(event) {
            Some(subscription) => subscription.listeners.clone(),
            None => {
                debug!(event = event, "No listeners for event");
                return 0;
            }
        };

        let mut delivered = 0;
        for (id, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener(payload))) {
                Ok(()) => delivered += 1,
                Err(_) => error!(event = event, listener = %id, "Listener panicked"),
            }
        }
        delivered
    }

    /// Number of listeners attached to `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.subscriptions
            .read()
            .get(event)
            .map_or(0, |s| s.listeners.len())
    }

    /// Whether the platform subscription for `event` is active
    pub fn is_subscribed(&self, event: &str) -> bool {
        self.subscriptions.read().contains_key(event)
    }
}
