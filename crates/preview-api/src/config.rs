//! Preview configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! latency_ms = 150
//! user_email = "demo@example.com"
//! log_filter = "info"
//!
//! [storage]
//! backend = "file"
//! path = ".preview/store.json"
//! ```

use crate::error::ConfigError;
use preview_model::DEMO_USER_EMAIL;
use preview_store::{JsonFileBackend, MemoryBackend, Store, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default simulated call latency in milliseconds
pub const DEFAULT_LATENCY_MS: u64 = 150;

/// Preview configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Simulated latency of every call
    pub latency_ms: u64,
    /// Email reported as the current user and stamped on new projects
    pub user_email: String,
    /// Where collections are persisted
    pub storage: StorageConfig,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Seed for reproducible ids
    pub id_seed: Option<u64>,
}

impl PreviewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` on invalid TOML or field types.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - `ConfigError::Parse` on invalid content
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Simulated latency
    #[inline]
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// With simulated latency
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With current user email
    #[inline]
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = email.into();
        self
    }

    /// With storage location
    #[inline]
    #[must_use]
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// With id seed
    #[inline]
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Open the configured store, seeding missing slots
    ///
    /// # Errors
    /// Returns the backend error when the store cannot be opened or seeded.
    pub fn open_store(&self) -> Result<Store, StoreError> {
        match &self.storage {
            StorageConfig::Memory => Store::open(MemoryBackend::new()),
            StorageConfig::File { path } => Store::open(JsonFileBackend::open(path)?),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            user_email: DEMO_USER_EMAIL.to_string(),
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
            id_seed: None,
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// JSON file on disk
    File {
        /// Store file
        path: PathBuf,
    },
}
