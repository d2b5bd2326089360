//! LiveTest Application - Test app use case and ports
//!
//! This crate holds the test app that drives a live site, and the ports
//! it uses to reach the network.

pub mod error;
pub mod ports;
pub mod test_app;

pub use error::{ApplicationError, ApplicationResult};
pub use test_app::{RequestOptions, TestApp};
