//! Planning records
//!
//! Every record is stored exactly as the caller supplied it. Only the ids are
//! typed, since they key the collections; all other content is a [`Field`]
//! holding the submitted JSON value. Keys the model does not know about are
//! kept in [`Extra`] so they survive a save/load cycle.

use crate::field::Field;
use crate::ids::{ProjectId, UseCaseId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Unrecognised fields carried through storage untouched
pub type Extra = serde_json::Map<String, Value>;

/// Project lifecycle status
///
/// Persisted as the display label used by the planning tool. Labels outside
/// the known vocabulary are preserved as [`ProjectStatus::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProjectStatus {
    /// `下書き`
    #[default]
    Draft,
    /// `確定`
    Confirmed,
    /// `アーカイブ`
    Archived,
    /// Any other label
    Custom(String),
}

impl ProjectStatus {
    /// Persisted label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ProjectStatus::Draft => "下書き",
            ProjectStatus::Confirmed => "確定",
            ProjectStatus::Archived => "アーカイブ",
            ProjectStatus::Custom(label) => label,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "下書き" => ProjectStatus::Draft,
            "確定" => ProjectStatus::Confirmed,
            "アーカイブ" => ProjectStatus::Archived,
            _ => ProjectStatus::Custom(label),
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Custom(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl From<ProjectStatus> for Field {
    fn from(status: ProjectStatus) -> Self {
        Self::from(String::from(status))
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer planning engagement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// Project id
    pub project_id: ProjectId,
    /// Customer display name
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub customer_name: Field,
    /// Creation time, ISO-8601
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub created_date: Field,
    /// Last modification time, ISO-8601
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub updated_date: Field,
    /// Email of the creator
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub creator_email: Field,
    /// Comma-joined editor emails
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub editor_emails: Field,
    /// Status label
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub status: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl Project {
    /// Parsed status, `None` when the label is missing or not text
    #[must_use]
    pub fn status(&self) -> Option<ProjectStatus> {
        self.status.as_str().map(ProjectStatus::from)
    }
}

/// Vision statement, one per project
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vision {
    /// Owning project
    pub project_id: ProjectId,
    /// Vision statement
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub vision_text: Field,
    /// Decision rules
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub decision_rules: Field,
    /// Success metrics
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub success_metrics: Field,
    /// Free-form notes
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub notes: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Use case content as submitted, before an id is assigned
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UseCaseDraft {
    /// Owning project
    pub project_id: ProjectId,
    /// Current challenge
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub challenge: Field,
    /// Target goal
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub goal: Field,
    /// Expected business impact
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub expected_impact: Field,
    /// Goal for the first 90 days
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub ninety_day_goal: Field,
    /// Prioritisation score, numeric or form text
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub score: Field,
    /// Rank, 1 is highest
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub priority: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl UseCaseDraft {
    /// Attach an id
    #[must_use]
    pub fn into_use_case(mut self, usecase_id: UseCaseId) -> UseCase {
        // A caller-supplied id never wins over the assigned one.
        self.extra.remove("usecaseId");
        UseCase {
            usecase_id,
            draft: self,
        }
    }
}

/// A prioritised use case of a project
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UseCase {
    /// Use case id
    pub usecase_id: UseCaseId,
    /// Use case content
    #[serde(flatten)]
    pub draft: UseCaseDraft,
}

impl UseCase {
    /// Owning project
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> &ProjectId {
        &self.draft.project_id
    }
}

/// One responsibility assignment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RaciEntry {
    /// Organisational pillar
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub pillar: Field,
    /// Task description
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub task: Field,
    /// Assignee name
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub assignee: Field,
    /// Responsibility code (`R`, `A`, `C` or `I`)
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub raci: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Realised value of a use case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueRecord {
    /// Use case this value belongs to
    pub usecase_id: UseCaseId,
    /// Owning project
    pub project_id: ProjectId,
    /// Measured impact
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub quantitative_impact: Field,
    /// Observed impact
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub qualitative_impact: Field,
    /// Evidence reference
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub evidence: Field,
    /// Next investment decision (`Expand`, `Continue`, ...)
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub next_investment: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// One week of a 90-day plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Week number, 1-based
    pub week: u32,
    /// Work for that week
    pub task: String,
}

impl Milestone {
    /// Create a milestone
    #[inline]
    #[must_use]
    pub fn new(week: u32, task: impl Into<String>) -> Self {
        Self {
            week,
            task: task.into(),
        }
    }
}

/// Execution plan for the first 90 days of a use case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NinetyDayPlan {
    /// Use case the plan belongs to
    pub usecase_id: UseCaseId,
    /// Owning project
    pub project_id: ProjectId,
    /// Team structure
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub structure: Field,
    /// Data the plan depends on
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub required_data: Field,
    /// Known risks
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub risks: Field,
    /// Communication cadence
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub communication_plan: Field,
    /// Milestones, usually as JSON text
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub milestones: Field,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl NinetyDayPlan {
    /// Decode the embedded milestone list
    ///
    /// Missing, `null` or blank text decodes to an empty list. A list sent as
    /// a JSON array instead of text is decoded as well.
    ///
    /// # Errors
    /// Returns the JSON error when the value is not a milestone list.
    pub fn decode_milestones(&self) -> Result<Vec<Milestone>, serde_json::Error> {
        match self.milestones.value() {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(Vec::new()),
            Some(Value::String(text)) => serde_json::from_str(text),
            Some(other) => serde_json::from_value(other.clone()),
        }
    }

    /// Replace the embedded milestone list with its JSON text
    pub fn encode_milestones(&mut self, milestones: &[Milestone]) {
        let list = milestones
            .iter()
            .map(|m| json!({"week": m.week, "task": m.task}))
            .collect();
        self.milestones = Field::from(Value::Array(list).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_map_both_ways() {
        assert_eq!(ProjectStatus::from("確定"), ProjectStatus::Confirmed);
        assert_eq!(Field::from(ProjectStatus::Archived), "アーカイブ");
        let status = ProjectStatus::from("in review");
        assert_eq!(status, ProjectStatus::Custom("in review".to_string()));
        assert_eq!(String::from(status), "in review");
    }

    #[test]
    fn project_status_accessor_tolerates_bad_values() {
        let project: Project = serde_json::from_value(json!({
            "projectId": "PRJ-20251231-0009",
            "status": 3
        }))
        .unwrap();
        assert_eq!(project.status(), None);
        assert_eq!(project.status.value(), Some(&json!(3)));
    }

    #[test]
    fn project_uses_camel_case_fields() {
        let project = Project {
            project_id: ProjectId::from("PRJ-20251231-0009"),
            customer_name: "Acme".into(),
            status: ProjectStatus::Draft.into(),
            ..Project::default()
        };
        assert_eq!(
            serde_json::to_value(&project).unwrap(),
            json!({
                "projectId": "PRJ-20251231-0009",
                "customerName": "Acme",
                "status": "下書き"
            })
        );
    }

    #[test]
    fn partial_vision_is_stored_as_given() {
        let input = json!({"projectId": "PRJ-1", "visionText": "grow", "owner": "sales"});
        let vision: Vision = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(vision.extra["owner"], "sales");
        assert!(vision.notes.is_absent());
        assert_eq!(serde_json::to_value(&vision).unwrap(), input);
    }

    #[test]
    fn form_text_and_nulls_survive_in_use_cases() {
        let draft: UseCaseDraft = serde_json::from_value(json!({
            "projectId": "PRJ-1",
            "usecaseId": "UC-fake",
            "score": "85",
            "priority": null
        }))
        .unwrap();
        let use_case = draft.into_use_case(UseCaseId::from("UC-20260101-0001"));
        let value = serde_json::to_value(&use_case).unwrap();
        assert_eq!(
            value,
            json!({
                "usecaseId": "UC-20260101-0001",
                "projectId": "PRJ-1",
                "score": "85",
                "priority": null
            })
        );

        let back: UseCase = serde_json::from_value(value).unwrap();
        assert_eq!(back, use_case);
        assert_eq!(use_case.project_id().as_str(), "PRJ-1");
    }

    #[test]
    fn milestones_encode_and_decode() {
        let mut plan = NinetyDayPlan::default();
        assert!(plan.decode_milestones().unwrap().is_empty());

        plan.encode_milestones(&[Milestone::new(1, "kickoff")]);
        assert!(plan.milestones.as_str().is_some());
        assert_eq!(plan.decode_milestones().unwrap(), vec![Milestone::new(1, "kickoff")]);

        plan.milestones = json!([{"week": 2, "task": "pilot"}]).into();
        assert_eq!(plan.decode_milestones().unwrap()[0].week, 2);

        plan.milestones = "not json".into();
        assert!(plan.decode_milestones().is_err());
    }
}
