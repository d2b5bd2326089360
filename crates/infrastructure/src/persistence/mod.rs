//! Persistence for test app settings.

mod settings_repository;

pub use settings_repository::{SettingsError, SettingsRepository};
