//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the test app and the network.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod connection;

pub use connection::{Connection, ConnectionError, Connector, WireRequest, WireResponse};
