//! Preview Model - records of the business-planning tool
//!
//! Defines everything that crosses the storage or call boundary:
//! - Record identifiers and their `PREFIX-YYYYMMDD-####` pattern
//! - Projects, visions, use cases, RACI entries, value records, 90-day plans
//! - Loosely typed fields that keep submitted values as given
//! - The success/failure envelope returned by every operation
//! - The static seed dataset used to populate an empty store
//!
//! # Example
//!
//! ```rust
//! use preview_model::{Dataset, IdPrefix};
//!
//! let seed = Dataset::demo();
//! assert_eq!(seed.projects.len(), 3);
//! assert!(IdPrefix::Project.matches(seed.projects[0].project_id.as_str()));
//! ```

#![warn(unreachable_pub)]

pub mod dataset;
pub mod envelope;
pub mod field;
pub mod ids;
pub mod records;

pub use dataset::{Dataset, DEMO_USER_EMAIL};
pub use envelope::{
    Envelope, PROJECT_NOT_FOUND, ProposalDocument, Reply, UseCaseCreated, UserIdentity,
};
pub use field::Field;
pub use ids::{IdPrefix, ProjectId, UseCaseId};
pub use records::{
    Extra, Milestone, NinetyDayPlan, Project, ProjectStatus, RaciEntry, UseCase, UseCaseDraft,
    ValueRecord, Vision,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with planning records
    pub use crate::{
        Dataset, Envelope, Field, NinetyDayPlan, Project, ProjectId, ProjectStatus, RaciEntry, Reply,
        UseCase, UseCaseDraft, UseCaseId, ValueRecord, Vision,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
