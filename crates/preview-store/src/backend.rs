//! Key-value backends
//!
//! A [`Backend`] stores opaque text under string keys. All methods take `&self`;
//! implementations use interior mutability.

use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Key-value storage used by [`crate::Store`]
pub trait Backend: Send + Sync + Debug {
    /// Read a value, `Ok(None)` when the key is absent
    ///
    /// # Errors
    /// Returns the backend's failure.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value
    ///
    /// # Errors
    /// Returns the backend's failure.
    fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove every key
    ///
    /// # Errors
    /// Returns the backend's failure.
    fn clear(&self) -> Result<(), StoreError>;

    /// Whether calls perform blocking I/O
    fn blocking(&self) -> bool {
        false
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }

    fn blocking(&self) -> bool {
        (**self).blocking()
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }

    fn blocking(&self) -> bool {
        (**self).blocking()
    }
}

/// Process-local backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Create empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Check if no key is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.slots.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.slots.lock().clear();
        Ok(())
    }
}
