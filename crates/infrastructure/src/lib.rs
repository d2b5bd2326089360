//! LiveTest Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest connection behind the application
//! ports, plus settings loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestConnection, ReqwestConnector};
pub use config::{settings_from_env, settings_from_lookup};
pub use logging::init_tracing;
pub use persistence::{SettingsError, SettingsRepository};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
