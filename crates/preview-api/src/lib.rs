//! Preview API - planning operations behind a simulated call surface
//!
//! Binds the planning operations to one store:
//! - Project creation, status changes and lookup
//! - Vision, use case, 90-day plan, RACI and value record reads and upserts
//! - Proposal link generation and store reinitialization
//! - A latency-injecting shim with success and failure handler binding
//!
//! # Example
//!
//! ```rust,ignore
//! use preview_api::{CallShim, Operation, PreviewConfig};
//!
//! # async fn example() -> Result<(), preview_api::ApiError> {
//! let shim = CallShim::from_config(&PreviewConfig::new())?;
//! let envelope = shim.call(Operation::GetUserProjects).await?;
//! assert!(envelope.success);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod id_factory;
pub mod notify;
pub mod operation;
pub mod shim;

pub use api::{PreviewApi, PROPOSAL_URL_BASE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PreviewConfig, StorageConfig, DEFAULT_LATENCY_MS};
pub use error::{ApiError, ConfigError};
pub use id_factory::IdFactory;
pub use notify::{LogNotifier, Notifier};
pub use operation::Operation;
pub use shim::{CallShim, FailureHandler, FailureSink, NoFailureHandler, Runner};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for calling the planning operations
    pub use crate::{ApiError, CallShim, Operation, PreviewApi, PreviewConfig};
    pub use preview_model::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
