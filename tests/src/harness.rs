//! Scripted platform for integration tests.
//!
//! [`MockPlatform`] owns the far end of an in-memory channel pair. The client
//! side is a real [`Gateway`] fed by a real [`InboundLoop`]; the test plays
//! the gateway process by reading requests and writing frames.

use firebolt_gateway::ports::channel::{create_test_channel, ChannelSource, ChannelTransport};
use firebolt_gateway::{Gateway, GatewayConfig, InboundLoop};
use firebolt_sdk::telemetry_config;
use firebolt_telemetry::{init_logging, TelemetryConfig, TelemetryGuard};
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// How long a test waits for the client to send something
const FRAME_WAIT: Duration = Duration::from_secs(2);

static LOGGING: OnceLock<Option<TelemetryGuard>> = OnceLock::new();

/// Install logging once per test binary, at the first platform's level.
///
/// Output is only written when `FIREBOLT_LOG_LEVEL` is set, e.g.
/// `FIREBOLT_LOG_LEVEL=Debug` to trace frames through a failing flow.
fn init_test_logging(config: &GatewayConfig) {
    LOGGING.get_or_init(|| {
        let telemetry = TelemetryConfig {
            service_name: "firebolt-tests".to_string(),
            console_output: std::env::var_os("FIREBOLT_LOG_LEVEL").is_some(),
            ..telemetry_config(config)
        };
        init_logging(&telemetry).ok()
    });
}

pub struct MockPlatform {
    gateway: Gateway,
    /// Frames the client sent
    requests: Mutex<mpsc::Receiver<String>>,
    /// Frames for the client to receive
    frames: mpsc::Sender<String>,
    inbound: JoinHandle<()>,
}

impl MockPlatform {
    pub fn start() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        init_test_logging(&config);
        let (out_tx, out_rx, in_tx, in_rx) = create_test_channel(config.outbound_buffer);
        let gateway = Gateway::new(config, Arc::new(ChannelTransport(out_tx)));
        let inbound = tokio::spawn(
            InboundLoop::new(gateway.clone(), Arc::new(ChannelSource::new(in_rx))).run(),
        );

        Self {
            gateway,
            requests: Mutex::new(out_rx),
            frames: in_tx,
            inbound,
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Next frame the client sent
    pub async fn next_frame(&self) -> Value {
        let mut requests = self.requests.lock().await;
        let raw = timeout(FRAME_WAIT, requests.recv())
            .await
            .expect("timeout waiting for client frame")
            .expect("client channel closed");
        serde_json::from_str(&raw).expect("client sent invalid JSON")
    }

    /// Next frame, which must be a request for `method`
    pub async fn expect_request(&self, method: &str) -> Value {
        let request = self.next_frame().await;
        assert_eq!(request["method"], method, "unexpected request {request}");
        request
    }

    /// Assert the client sends nothing for `wait`
    pub async fn assert_quiet(&self, wait: Duration) {
        let mut requests = self.requests.lock().await;
        if let Ok(Some(raw)) = timeout(wait, requests.recv()).await {
            panic!("unexpected frame from client: {raw}");
        }
    }

    /// Answer `request` with a result
    pub async fn reply(&self, request: &Value, result: Value) {
        self.send(json!({"jsonrpc": "2.0", "id": request["id"], "result": result}))
            .await;
    }

    /// Answer `request` with an error object
    pub async fn reply_error(&self, request: &Value, code: i32, message: &str) {
        self.send(json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": {"code": code, "message": message}
        }))
        .await;
    }

    /// Emit an event frame
    pub async fn emit(&self, event: &str, value: Value) {
        self.send(json!({"event": event, "value": value})).await;
    }

    /// Emit a JSON-RPC notification
    pub async fn notify(&self, method: &str, value: Value) {
        self.send(json!({"jsonrpc": "2.0", "method": method, "params": {"value": value}}))
            .await;
    }

    /// Call into a provider registered by the app
    pub async fn call_provider(&self, id: &str, method: &str, params: Value) {
        self.send(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;
    }

    pub async fn send(&self, frame: Value) {
        self.send_raw(frame.to_string()).await;
    }

    pub async fn send_raw(&self, frame: String) {
        self.frames
            .send(frame)
            .await
            .expect("inbound loop stopped");
    }

    /// Acknowledge a subscribe/unsubscribe or provider registration
    pub async fn ack_listen(&self, event: &str, listen: bool) {
        let request = self.expect_request(event).await;
        assert_eq!(request["params"], json!({"listen": listen}));
        self.reply(&request, json!({"listening": listen, "event": event}))
            .await;
    }
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        self.inbound.abort();
    }
}

/// Receive one item or fail the test
pub async fn recv_within<T>(rx: &mut mpsc::UnboundedReceiver<T>, wait: Duration) -> T {
    timeout(wait, rx.recv())
        .await
        .expect("timeout waiting for delivery")
        .expect("channel closed")
}

/// Assert nothing arrives within `wait`
pub async fn assert_none_within<T: std::fmt::Debug>(
    rx: &mut mpsc::UnboundedReceiver<T>,
    wait: Duration,
) {
    if let Ok(Some(item)) = timeout(wait, rx.recv()).await {
        panic!("unexpected delivery: {item:?}");
    }
}
