//! Error types for the store

use std::path::PathBuf;

/// Store failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Slot content is not valid for its collection
    #[error("slot {slot} holds undecodable data: {source}")]
    Corrupt {
        /// Slot key or file
        slot: String,
        /// Decode error
        #[source]
        source: serde_json::Error,
    },

    /// Collection could not be encoded
    #[error("failed to encode slot {slot}: {source}")]
    Encode {
        /// Slot key
        slot: String,
        /// Encode error
        #[source]
        source: serde_json::Error,
    },

    /// Backend refused the operation
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Build an I/O error for `path`
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the error means stored data is damaged
    #[inline]
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
