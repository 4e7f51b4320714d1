//! Transport boundary.
//!
//! The physical channel to the gateway (normally a websocket) lives outside
//! this crate. It plugs in through two traits: [`Transport`] for outbound
//! frames and [`FrameSource`] for the receive loop.

use crate::domain::error::TransportError;
use async_trait::async_trait;

/// Outbound side of the channel
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one serialized frame
    async fn send(&self, frame: String) -> Result<(), TransportError>;
}

/// Inbound side of the channel
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Receive the next frame (waits until one is available)
    async fn receive(&self) -> Result<String, TransportError>;
}

/// In-memory channel transport, used by tests and by socket adapters that
/// pump an mpsc pair.
pub mod channel {
    use super::*;
    use tokio::sync::{mpsc, Mutex};

    pub struct ChannelTransport(pub mpsc::Sender<String>);

    #[async_trait]
    impl Transport for ChannelTransport {
        async fn send(&self, frame: String) -> Result<(), TransportError> {
            self.0.send(frame).await.map_err(|_| TransportError::Closed)
        }
    }

    pub struct ChannelSource(pub Mutex<mpsc::Receiver<String>>);

    impl ChannelSource {
        pub fn new(rx: mpsc::Receiver<String>) -> Self {
            Self(Mutex::new(rx))
        }
    }

    #[async_trait]
    impl FrameSource for ChannelSource {
        async fn receive(&self) -> Result<String, TransportError> {
            let mut guard = self.0.lock().await;
            guard.recv().await.ok_or(TransportError::Closed)
        }
    }

    /// Create a test channel pair.
    ///
    /// Returns `(outbound_tx, outbound_rx, inbound_tx, inbound_rx)`: the
    /// client writes to `outbound_tx`, the platform side reads `outbound_rx`
    /// and answers on `inbound_tx`.
    pub fn create_test_channel(
        buffer: usize,
    ) -> (
        mpsc::Sender<String>,
        mpsc::Receiver<String>,
        mpsc::Sender<String>,
        mpsc::Receiver<String>,
    ) {
        let (out_tx, out_rx) = mpsc::channel(buffer);
        let (in_tx, in_rx) = mpsc::channel(buffer);
        (out_tx, out_rx, in_tx, in_rx)
    }
}
