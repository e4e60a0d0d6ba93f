//! File-backed key-value storage
//!
//! All slots live in one JSON object on disk. The file is rewritten in full on
//! every `put` through a sibling temp file and a rename, so a crash never
//! leaves a half-written document behind.

use crate::backend::Backend;
use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Backend persisting slots to a JSON file
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    slots: Mutex<BTreeMap<String, String>>,
}

impl JsonFileBackend {
    /// Open or create the store file at `path`
    ///
    /// A missing file is an empty store; it is created on first write.
    ///
    /// # Errors
    /// - `StoreError::Io` if the file exists but cannot be read
    /// - `StoreError::Corrupt` if the file is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let slots = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                slot: path.display().to_string(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StoreError::io(&path, err)),
        };
        tracing::debug!(path = %path.display(), slots = slots.len(), "opened store file");
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    /// Location of the store file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, slots: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let text = serde_json::to_string_pretty(slots).map_err(|source| StoreError::Encode {
            slot: self.path.display().to_string(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|err| StoreError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::io(&self.path, err))
    }
}

impl Backend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut slots = self.slots.lock();
        slots.insert(key.to_string(), value);
        self.flush(&slots)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slots = self.slots.lock();
        slots.clear();
        self.flush(&slots)
    }

    fn blocking(&self) -> bool {
        true
    }
}
