//! Gateway facade and inbound delivery.
//!
//! [`Gateway`] owns one correlation table, one event registry and one provider
//! registry, all built over a single transport. It is constructed explicitly
//! and passed to whoever needs it; cloning shares the same state.

use crate::client::RpcClient;
use crate::domain::config::GatewayConfig;
use crate::domain::error::{FireboltResult, TransportError};
use crate::domain::frames::InboundFrame;
use crate::domain::pending::{cleanup_task, CorrelationTable};
use crate::events::EventRegistry;
use crate::ports::{FrameSource, Transport};
use crate::property::PropertyAccessor;
use crate::providers::ProviderRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// What happened to one inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Response; `matched` is false when no call was waiting
    Response { matched: bool },
    /// Event notification fanned out to `listeners`
    Event { listeners: usize },
    /// Platform call handed to the provider registry
    ProviderCall,
    /// Frame could not be classified and was dropped
    Malformed,
}

/// Client core over one gateway connection
#[derive(Clone)]
pub struct Gateway {
    config: GatewayConfig,
    client: Arc<RpcClient>,
    events: Arc<EventRegistry>,
    providers: Arc<ProviderRegistry>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        let table = Arc::new(CorrelationTable::new(config.wait_time));
        let client = Arc::new(RpcClient::new(table, transport));
        let events = Arc::new(EventRegistry::new(client.clone(), config.subscribe_timeout));
        let providers = Arc::new(ProviderRegistry::new(
            client.clone(),
            config.subscribe_timeout,
        ));

        info!(
            ws_url = %config.ws_url,
            wait_time_ms = config.wait_time.as_millis(),
            "Gateway client created"
        );

        Self {
            config,
            client,
            events,
            providers,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<RpcClient> {
        &self.client
    }

    pub fn events(&self) -> &Arc<EventRegistry> {
        &self.events
    }

    pub fn providers(&self) -> &Arc<ProviderRegistry> {
        &self.providers
    }

    /// Property accessor for `module`
    pub fn properties(&self, module: &str) -> PropertyAccessor {
        PropertyAccessor::new(self.client.clone(), module)
    }

    /// Call a method with the default deadline
    pub async fn call(&self, method: &str, params: Value) -> FireboltResult<Value> {
        self.client.call(method, params, None).await
    }

    /// Typed call with an optional deadline override
    pub async fn call_typed<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> FireboltResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.client.call_typed(method, params, timeout).await
    }

    /// Route one raw inbound frame.
    ///
    /// Runs on the delivery path: responses and events are handled inline,
    /// provider calls are spawned. Nothing here waits on a caller.
    pub fn deliver(&self, raw: &str) -> Delivery {
        let frame = match InboundFrame::parse(raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Dropping malformed frame");
                return Delivery::Malformed;
            }
        };

        match frame {
            InboundFrame::Response(response) => Delivery::Response {
                matched: self.client.resolve(response),
            },
            InboundFrame::Event(event) => {
                let listeners = self.events.dispatch(&event.event, &event.value);
                debug!(event = %event.event, listeners = listeners, "Event delivered");
                Delivery::Event { listeners }
            }
            InboundFrame::ProviderCall(call) => {
                self.providers.handle_call(call);
                Delivery::ProviderCall
            }
        }
    }

    /// Start the expired-call sweeper
    pub fn spawn_maintenance(&self) -> JoinHandle<()> {
        tokio::spawn(cleanup_task(
            self.client.table().clone(),
            self.config.cleanup_interval,
        ))
    }
}

/// Receive loop feeding a [`FrameSource`] into [`Gateway::deliver`]
pub struct InboundLoop {
    gateway: Gateway,
    source: Arc<dyn FrameSource>,
}

impl InboundLoop {
    pub fn new(gateway: Gateway, source: Arc<dyn FrameSource>) -> Self {
        Self { gateway, source }
    }

    /// Run until the source closes
    pub async fn run(self) {
        info!("Inbound loop started");
        loop {
            match self.source.receive().await {
                Ok(raw) => {
                    self.gateway.deliver(&raw);
                }
                Err(TransportError::Closed) => {
                    info!("Frame source closed, stopping inbound loop");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Error receiving frame");
                }
            }
        }
    }
}
