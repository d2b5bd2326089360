//! Adapters implementing application ports.

mod reqwest_connection;

pub use reqwest_connection::{ReqwestConnection, ReqwestConnector};
