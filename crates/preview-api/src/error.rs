//! Error types for the planning operations
//!
//! An [`ApiError`] is an execution failure: the operation could not run to
//! completion. Unknown ids are not errors; they come back as failure
//! envelopes.

use chrono::NaiveDate;
use preview_model::IdPrefix;
use preview_store::StoreError;
use std::path::PathBuf;

/// Execution failure of an operation
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Every sequence number for the day is in use
    #[error("no free {prefix} id left for {date}")]
    IdSpaceExhausted {
        /// Entity prefix
        prefix: IdPrefix,
        /// Day of the id
        date: NaiveDate,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The blocking task running the operation panicked or was cancelled
    #[error("operation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Check if the error comes from damaged stored data
    #[inline]
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_corruption())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`crate::PreviewConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
