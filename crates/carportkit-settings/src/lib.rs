//! Carportkit Settings Crate
//!
//! Handles application settings and the local persistence of the active
//! carport configuration.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, InteractionSettings, ShareSettings, StorageSettings};
pub use error::{
    ConfigError, ConfigResult, PersistenceError, PersistenceResult, SettingsError, SettingsResult,
};
pub use persistence::ConfigPersistence;
