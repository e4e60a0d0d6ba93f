//! Response envelope
//!
//! Every operation answers `{success, data?, message?, error?}`. Domain
//! failures (an unknown id) are failure envelopes, not errors.

use crate::ids::UseCaseId;
use crate::records::{NinetyDayPlan, Project, RaciEntry, UseCase, ValueRecord, Vision};
use serde::{Deserialize, Serialize};

/// Error text of the project lookup failure
pub const PROJECT_NOT_FOUND: &str = "Project not found";

/// Fixed-shape operation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload, if the operation returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Success carrying `data`
    #[inline]
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Success carrying only a message
    #[inline]
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failure with a reason
    #[inline]
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Failure for an unknown project id
    #[inline]
    #[must_use]
    pub fn project_not_found() -> Self {
        Self::failure(PROJECT_NOT_FOUND)
    }

    /// Check success flag
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Take the payload
    #[inline]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Same status, message and error with the payload dropped
    pub fn without_data<U>(self) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: None,
            message: self.message,
            error: self.error,
        }
    }

    /// Convert the payload, keeping message and error
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error: self.error,
        }
    }
}

/// Payload of `add use case`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseCreated {
    /// Assigned id
    pub usecase_id: UseCaseId,
}

/// Payload of `generate proposal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDocument {
    /// Link to the generated document
    pub document_url: String,
}

/// Identity of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Account email
    pub email: String,
}

/// Payload of any operation, serialized without a tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Project list
    Projects(Vec<Project>),
    /// Single project
    Project(Project),
    /// Vision or `null`
    Vision(Option<Vision>),
    /// Use cases of a project
    UseCases(Vec<UseCase>),
    /// Id of a new use case
    UseCaseCreated(UseCaseCreated),
    /// 90-day plan or `null`
    Plan(Option<NinetyDayPlan>),
    /// RACI entries of a project
    RaciEntries(Vec<RaciEntry>),
    /// Value records of a project
    Values(Vec<ValueRecord>),
    /// Generated document
    Document(ProposalDocument),
    /// Current user
    User(UserIdentity),
}
