//! Provider registry.
//!
//! A provider answers calls the platform makes into the app (keyboard entry,
//! PIN and acknowledge challenges). One provider is active per event name;
//! registering again replaces the handler without another registration RPC.

use crate::client::RpcClient;
use crate::domain::error::{FireboltError, FireboltResult};
use crate::domain::frames::{listen_params, ProviderCallFrame, ResponseFrame};
use crate::gate::EventGates;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// Application-side handler for platform calls
#[async_trait]
pub trait Provider: Send + Sync {
    /// Handle one call for `method` (the provider event name)
    async fn handle(&self, method: &str, params: Value) -> FireboltResult<Value>;
}

/// Outcome of [`ProviderRegistry::provide`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First provider for the event; the platform was told
    Registered,
    /// An earlier provider was replaced locally
    Replaced,
}

/// Wrap an async closure over decoded params as a [`Provider`].
///
/// Params that do not decode as `P` are answered with `InvalidParams` and the
/// closure is never invoked.
pub fn typed_provider<P, R, F, Fut>(handler: F) -> Arc<dyn Provider>
where
    P: DeserializeOwned + Send + 'static,
    R: Serialize + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FireboltResult<R>> + Send + 'static,
{
    Arc::new(TypedProvider {
        handler,
        _marker: PhantomData,
    })
}

struct TypedProvider<F, P, R> {
    handler: F,
    _marker: PhantomData<fn(P) -> R>,
}

#[async_trait]
impl<P, R, F, Fut> Provider for TypedProvider<F, P, R>
where
    P: DeserializeOwned + Send + 'static,
    R: Serialize + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FireboltResult<R>> + Send + 'static,
{
    async fn handle(&self, method: &str, params: Value) -> FireboltResult<Value> {
        let params: P = serde_json::from_value(params).map_err(|e| {
            warn!(method = method, error = %e, "Provider params did not decode");
            FireboltError::InvalidParams
        })?;
        let reply = (self.handler)(params).await?;
        serde_json::to_value(reply).map_err(|e| {
            warn!(method = method, error = %e, "Cannot encode provider reply");
            FireboltError::General
        })
    }
}

/// Active providers by event name
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn Provider>>>,
    /// Serializes registration per event name
    gates: EventGates,
    client: Arc<RpcClient>,
    register_timeout: Duration,
}

impl ProviderRegistry {
    pub fn new(client: Arc<RpcClient>, register_timeout: Duration) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            gates: EventGates::new(),
            client,
            register_timeout,
        }
    }

    /// Register `provider` for `event`.
    ///
    /// The first registration sends `{"listen": true}`; if the platform
    /// rejects it nothing is stored. Later registrations replace the handler.
    pub async fn provide(
        &self,
        event: &str,
        provider: Arc<dyn Provider>,
    ) -> FireboltResult<Registration> {
        let _gate = self.gates.lock(event).await;

        {
            let mut providers = self.providers.write();
            if let Some(existing) = providers.get_mut(event) {
                *existing = provider;
                info!(event = event, "Provider replaced");
                return Ok(Registration::Replaced);
            }
        }

        self.client
            .call(event, listen_params(true), Some(self.register_timeout))
            .await
            .map_err(|e| {
                warn!(event = event, error = %e, "Provider registration failed");
                e
            })?;

        self.providers.write().insert(event.to_string(), provider);
        info!(event = event, "Provider registered");
        Ok(Registration::Registered)
    }

    /// Remove the provider for `event`.
    ///
    /// Returns false when none was registered. The provider is removed locally
    /// even if the platform rejects the `{"listen": false}` call.
    pub async fn revoke(&self, event: &str) -> FireboltResult<bool> {
        let _gate = self.gates.lock(event).await;

        if self.providers.write().remove(event).is_none() {
            return Ok(false);
        }
        info!(event = event, "Provider revoked");

        self.client
            .call(event, listen_params(false), Some(self.register_timeout))
            .await
            .map_err(|e| {
                warn!(event = event, error = %e, "Provider revocation failed");
                e
            })?;
        Ok(true)
    }

    pub fn is_provided(&self, event: &str) -> bool {
        self.providers.read().contains_key(event)
    }

    /// Answer a platform call.
    ///
    /// The provider runs on its own task and the reply is sent when it
    /// finishes, so a provider waiting on the user never stalls delivery.
    /// Calls for unknown events get a `MethodNotFound` reply.
    pub fn handle_call(&self, call: ProviderCallFrame) {
        let Ok(runtime) = Handle::try_current() else {
            error!(method = %call.method, "No runtime to run provider call");
            return;
        };

        let provider = self.providers.read().get(&call.method).cloned();
        let transport = self.client.transport().clone();

        runtime.spawn(async move {
            let ProviderCallFrame { id, method, params } = call;

            let outcome = match provider {
                Some(provider) => {
                    debug!(method = %method, id = %id, "Invoking provider");
                    let name = method.clone();
                    let task = tokio::spawn(async move { provider.handle(&name, params).await });
                    task.await.unwrap_or_else(|e| {
                        error!(method = %method, error = %e, "Provider task failed");
                        Err(FireboltError::General)
                    })
                }
                None => {
                    warn!(method = %method, "Call for unregistered provider");
                    Err(FireboltError::MethodNotFound)
                }
            };

            let reply = ResponseFrame::from_outcome(id, outcome);
            let text = match serde_json::to_string(&reply) {
                Ok(text) => text,
                Err(e) => {
                    error!(method = %method, error = %e, "Cannot encode provider reply");
                    return;
                }
            };
            if let Err(e) = transport.send(text).await {
                warn!(method = %method, error = %e, "Provider reply not sent");
            }
        });
    }
}
