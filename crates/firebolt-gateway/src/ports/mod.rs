//! Ports for the gateway client.

pub mod transport;

pub use transport::{channel, FrameSource, Transport};
