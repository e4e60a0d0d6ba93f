//! Preview Store - local key-value persistence
//!
//! Maps the six planning collections onto slots of a key-value [`Backend`]:
//! - Each slot holds the JSON text of one collection
//! - Slots missing on open are populated from the seed dataset
//! - `reset` wipes the backend and reseeds
//!
//! # Example
//!
//! ```rust
//! use preview_store::{MemoryBackend, Store};
//!
//! # fn example() -> Result<(), preview_store::StoreError> {
//! let store = Store::open(MemoryBackend::new())?;
//! assert_eq!(store.projects()?.len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]

pub mod backend;
pub mod collection;
pub mod error;
pub mod file;
pub mod store;

pub use backend::{Backend, MemoryBackend};
pub use collection::Collection;
pub use error::StoreError;
pub use file::JsonFileBackend;
pub use store::Store;
