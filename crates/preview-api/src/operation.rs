//! Enumerated operations
//!
//! One variant per call the planning tool can make. Encoded as
//! `{"op": "<name>", "args": ...}` so calls can be written as JSON.

use preview_model::{
    Field, NinetyDayPlan, ProjectId, RaciEntry, UseCaseDraft, UseCaseId, ValueRecord, Vision,
};
use serde::{Deserialize, Serialize};

/// A call into [`crate::PreviewApi`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "camelCase")]
pub enum Operation {
    /// List every project
    GetUserProjects,
    /// Fetch one project
    #[serde(rename_all = "camelCase")]
    GetProject {
        /// Project to fetch
        project_id: ProjectId,
    },
    /// Create a draft project
    #[serde(rename_all = "camelCase")]
    CreateProject {
        /// Customer display name
        customer_name: String,
    },
    /// Change a project's status
    #[serde(rename_all = "camelCase")]
    UpdateProjectStatus {
        /// Project to change
        project_id: ProjectId,
        /// New status label, stored as given
        status: Field,
    },
    /// Fetch a project's vision
    #[serde(rename_all = "camelCase")]
    GetVision {
        /// Owning project
        project_id: ProjectId,
    },
    /// Upsert a vision
    SaveVision(Vision),
    /// List a project's use cases
    #[serde(rename_all = "camelCase")]
    GetUsecases {
        /// Owning project
        project_id: ProjectId,
    },
    /// Append a use case
    AddUsecase(UseCaseDraft),
    /// Fetch the 90-day plan of a use case
    #[serde(rename_all = "camelCase")]
    GetNinetyDayPlan {
        /// Use case of the plan
        usecase_id: UseCaseId,
        /// Owning project, not used for lookup
        #[serde(default)]
        project_id: ProjectId,
    },
    /// Upsert a 90-day plan
    SaveNinetyDayPlan(NinetyDayPlan),
    /// List a project's RACI entries
    #[serde(rename_all = "camelCase")]
    GetRaciEntries {
        /// Owning project
        project_id: ProjectId,
    },
    /// Replace a project's RACI entries
    #[serde(rename_all = "camelCase")]
    SaveRaciEntries {
        /// Owning project
        project_id: ProjectId,
        /// Complete new list
        entries: Vec<RaciEntry>,
    },
    /// List a project's value records
    #[serde(rename_all = "camelCase")]
    GetValues {
        /// Owning project
        project_id: ProjectId,
    },
    /// Upsert a value record
    SaveValue(ValueRecord),
    /// Produce a proposal document reference
    #[serde(rename_all = "camelCase")]
    GenerateProposal {
        /// Project to describe
        project_id: ProjectId,
    },
    /// Wipe and reseed the store
    InitializeSheets,
    /// Report the current user
    GetCurrentUser,
}

impl Operation {
    /// Wire name of the operation
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetUserProjects => "getUserProjects",
            Operation::GetProject { .. } => "getProject",
            Operation::CreateProject { .. } => "createProject",
            Operation::UpdateProjectStatus { .. } => "updateProjectStatus",
            Operation::GetVision { .. } => "getVision",
            Operation::SaveVision(_) => "saveVision",
            Operation::GetUsecases { .. } => "getUsecases",
            Operation::AddUsecase(_) => "addUsecase",
            Operation::GetNinetyDayPlan { .. } => "getNinetyDayPlan",
            Operation::SaveNinetyDayPlan(_) => "saveNinetyDayPlan",
            Operation::GetRaciEntries { .. } => "getRaciEntries",
            Operation::SaveRaciEntries { .. } => "saveRaciEntries",
            Operation::GetValues { .. } => "getValues",
            Operation::SaveValue(_) => "saveValue",
            Operation::GenerateProposal { .. } => "generateProposal",
            Operation::InitializeSheets => "initializeSheets",
            Operation::GetCurrentUser => "getCurrentUser",
        }
    }

    /// Check if the operation writes to the store
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateProject { .. }
                | Operation::UpdateProjectStatus { .. }
                | Operation::SaveVision(_)
                | Operation::AddUsecase(_)
                | Operation::SaveNinetyDayPlan(_)
                | Operation::SaveRaciEntries { .. }
                | Operation::SaveValue(_)
                | Operation::InitializeSheets
        )
    }
}
