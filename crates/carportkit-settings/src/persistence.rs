//! Configuration Persistence
//!
//! Keeps the active carport configuration across sessions. The configuration
//! is written as one JSON file named after the namespaced storage key, wrapped
//! in a small versioned envelope:
//!
//! ```json
//! { "version": 1, "savedAt": "2024-05-01T12:00:00Z", "state": { "config": { ... } } }
//! ```
//!
//! Only the configuration is persisted; interaction state is rebuilt on
//! startup.

use carportkit_layout::Configuration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::StorageSettings;
use crate::error::{PersistenceError, PersistenceResult};

/// Envelope version written by this build.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    version: u32,
    saved_at: DateTime<Utc>,
    state: PersistedState,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    config: Configuration,
}

/// File-backed store for the active configuration
#[derive(Debug, Clone)]
pub struct ConfigPersistence {
    path: PathBuf,
}

impl ConfigPersistence {
    /// Persistence under `directory`, in `<key>.json`.
    pub fn new(directory: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            path: directory.into().join(format!("{}.json", key)),
        }
    }

    /// Persistence at the location named by the storage settings.
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.resolve_directory(), &settings.namespace_key)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored configuration.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    pub fn try_load(&self) -> PersistenceResult<Option<Configuration>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&content)?;
        if envelope.version > STATE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: envelope.version,
                supported: STATE_VERSION,
            });
        }
        debug!(
            "Restored configuration saved at {} from {}",
            envelope.saved_at,
            self.path.display()
        );
        Ok(Some(envelope.state.config))
    }

    /// Reads the stored configuration; a missing or unreadable file yields
    /// `None`.
    pub fn load(&self) -> Option<Configuration> {
        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring stored configuration at {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Writes `config`, replacing whatever was stored before.
    pub fn save(&self, config: &Configuration) -> PersistenceResult<()> {
        config
            .validate()
            .map_err(|e| PersistenceError::InvalidConfiguration(e.to_string()))?;

        let envelope = Envelope {
            version: STATE_VERSION,
            saved_at: Utc::now(),
            state: PersistedState {
                config: config.clone(),
            },
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored configuration. Clearing an empty store is not an
    /// error.
    pub fn clear(&self) -> PersistenceResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
