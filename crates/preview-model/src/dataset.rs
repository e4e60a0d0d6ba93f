//! The six collections and the demo seed
//!
//! [`Dataset`] mirrors the persisted layout: a list of projects plus five maps
//! keyed by project id (visions, use cases, RACI, values) or use case id
//! (plans). [`Dataset::demo`] is what an empty store is populated with.

use crate::ids::{ProjectId, UseCaseId};
use crate::records::{
    Extra, Milestone, NinetyDayPlan, Project, ProjectStatus, RaciEntry, UseCase, UseCaseDraft,
    ValueRecord, Vision,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity used by the local preview
pub const DEMO_USER_EMAIL: &str = "demo@example.com";

/// Contents of every collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    /// Projects, newest first
    pub projects: Vec<Project>,
    /// Vision per project
    pub visions: BTreeMap<ProjectId, Vision>,
    /// Use cases per project
    pub use_cases: BTreeMap<ProjectId, Vec<UseCase>>,
    /// RACI entries per project
    pub raci: BTreeMap<ProjectId, Vec<RaciEntry>>,
    /// Value records per project
    pub values: BTreeMap<ProjectId, Vec<ValueRecord>>,
    /// 90-day plan per use case
    pub plans: BTreeMap<UseCaseId, NinetyDayPlan>,
}

impl Dataset {
    /// Empty dataset
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample records for three customers
    #[must_use]
    pub fn demo() -> Self {
        let acme = ProjectId::from("PRJ-20251231-0001");
        let global = ProjectId::from("PRJ-20251231-0002");
        let startup = ProjectId::from("PRJ-20251231-0003");

        let projects = vec![
            project(
                &acme,
                "Acme Corporation",
                utc(2025, 12, 20, 10, 0),
                utc(2025, 12, 31, 14, 30),
                DEMO_USER_EMAIL,
                ProjectStatus::Draft,
            ),
            project(
                &global,
                "Global Tech Inc.",
                utc(2025, 12, 15, 9, 0),
                utc(2025, 12, 28, 11, 0),
                "demo@example.com,team@example.com",
                ProjectStatus::Confirmed,
            ),
            project(
                &startup,
                "StartUp Labs",
                utc(2025, 11, 1, 8, 0),
                utc(2025, 11, 30, 17, 0),
                DEMO_USER_EMAIL,
                ProjectStatus::Archived,
            ),
        ];

        let mut visions = BTreeMap::new();
        visions.insert(
            acme.clone(),
            Vision {
                project_id: acme.clone(),
                vision_text: "To become the leading data-driven organization in our industry, \
                              empowering every team member to make informed decisions through \
                              accessible, real-time insights."
                    .into(),
                decision_rules: "1. Data quality over speed of delivery\n\
                                 2. User adoption is the key metric\n\
                                 3. Security and governance cannot be compromised"
                    .into(),
                success_metrics: "- 80% of business users actively using dashboards weekly\n\
                                  - 50% reduction in report generation time\n\
                                  - NPS score > 60 from internal users"
                    .into(),
                notes: "Focus on quick wins in Q1 to build momentum".into(),
                extra: Extra::new(),
            },
        );
        visions.insert(
            global.clone(),
            Vision {
                project_id: global.clone(),
                vision_text: "Enable seamless collaboration across global teams through unified \
                              analytics platform."
                    .into(),
                decision_rules: "1. Mobile-first approach\n2. Real-time data sync".into(),
                success_metrics: "- 100% team onboarding within 90 days\n\
                                  - 30% productivity improvement"
                    .into(),
                notes: "".into(),
                extra: Extra::new(),
            },
        );

        let mut use_cases = BTreeMap::new();
        use_cases.insert(
            acme.clone(),
            vec![
                use_case(
                    "UC-20251231-001",
                    &acme,
                    [
                        "Sales team spends 4+ hours weekly creating manual reports",
                        "Automate sales reporting with self-service dashboards",
                        "Save 200+ hours monthly across sales team, faster decision making",
                        "Launch automated sales dashboard with top 5 KPIs",
                    ],
                    85.0,
                    1,
                ),
                use_case(
                    "UC-20251231-002",
                    &acme,
                    [
                        "Marketing ROI is difficult to measure across channels",
                        "Create unified marketing attribution dashboard",
                        "Better budget allocation, improved campaign performance",
                        "Integrate 3 major marketing platforms into single view",
                    ],
                    72.0,
                    2,
                ),
                use_case(
                    "UC-20251231-003",
                    &acme,
                    [
                        "Customer churn prediction is currently reactive",
                        "Build predictive churn model with early warning system",
                        "Reduce churn by 15%, increase customer lifetime value",
                        "Deploy initial churn prediction model for top 100 accounts",
                    ],
                    68.0,
                    3,
                ),
            ],
        );
        use_cases.insert(
            global.clone(),
            vec![use_case(
                "UC-20251231-004",
                &global,
                [
                    "Global inventory visibility is fragmented",
                    "Real-time inventory tracking across all regions",
                    "Reduce stockouts by 30%, optimize working capital",
                    "Connect 5 major warehouses to central dashboard",
                ],
                90.0,
                1,
            )],
        );

        let mut raci = BTreeMap::new();
        raci.insert(
            acme.clone(),
            vec![
                raci_entry("CoE", "Define data governance policies", "Sarah Chen", "A"),
                raci_entry("CoE", "Establish best practices", "Sarah Chen", "R"),
                raci_entry(
                    "ビジネスデータネットワーク",
                    "Identify key business metrics",
                    "Mike Johnson",
                    "R",
                ),
                raci_entry(
                    "ビジネスデータネットワーク",
                    "User training and adoption",
                    "Lisa Park",
                    "R",
                ),
                raci_entry("IT", "Data pipeline development", "Tom Wilson", "R"),
                raci_entry("IT", "Security implementation", "Tom Wilson", "A"),
                raci_entry("IT", "Infrastructure setup", "Alex Kim", "R"),
            ],
        );
        raci.insert(
            global.clone(),
            vec![
                raci_entry("CoE", "Global standards alignment", "Emma Davis", "A"),
                raci_entry("IT", "API integration", "James Lee", "R"),
            ],
        );

        let mut values = BTreeMap::new();
        values.insert(
            acme.clone(),
            vec![
                ValueRecord {
                    usecase_id: UseCaseId::from("UC-20251231-001"),
                    project_id: acme.clone(),
                    quantitative_impact: "150 hours saved per month, $45,000 annual cost reduction"
                        .into(),
                    qualitative_impact:
                        "Improved sales team morale, faster response to market changes"
                            .into(),
                    evidence: "https://drive.google.com/example-evidence-001".into(),
                    next_investment: "Expand".into(),
                    extra: Extra::new(),
                },
                ValueRecord {
                    usecase_id: UseCaseId::from("UC-20251231-002"),
                    project_id: acme.clone(),
                    quantitative_impact: "".into(),
                    qualitative_impact: "In progress - initial feedback positive".into(),
                    evidence: "".into(),
                    next_investment: "Continue".into(),
                    extra: Extra::new(),
                },
            ],
        );
        values.insert(global, Vec::new());

        let first_plan = UseCaseId::from("UC-20251231-001");
        let mut plan = NinetyDayPlan {
            usecase_id: first_plan.clone(),
            project_id: acme,
            structure: "Project Lead: Mike Johnson, Technical Lead: Tom Wilson".into(),
            required_data: "CRM data, Sales transactions, Product catalog".into(),
            risks: "Data quality issues, User adoption resistance".into(),
            communication_plan: "Weekly standup, Monthly steering committee".into(),
            ..NinetyDayPlan::default()
        };
        plan.encode_milestones(&demo_milestones());
        let mut plans = BTreeMap::new();
        plans.insert(first_plan, plan);

        Self {
            projects,
            visions,
            use_cases,
            raci,
            values,
            plans,
        }
    }
}

fn demo_milestones() -> Vec<Milestone> {
    [
        "Requirements gathering",
        "Data source mapping",
        "Pipeline development",
        "Initial dashboard prototype",
        "User feedback round 1",
        "Iteration and refinement",
        "Security review",
        "UAT preparation",
        "User acceptance testing",
        "Training materials",
        "Pilot launch",
        "Full rollout",
    ]
    .iter()
    .zip(1u32..)
    .map(|(task, week)| Milestone::new(week, *task))
    .collect()
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn project(
    id: &ProjectId,
    customer_name: &str,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    editors: &str,
    status: ProjectStatus,
) -> Project {
    Project {
        project_id: id.clone(),
        customer_name: customer_name.into(),
        created_date: created.into(),
        updated_date: updated.into(),
        creator_email: DEMO_USER_EMAIL.into(),
        editor_emails: editors.into(),
        status: status.into(),
        extra: Extra::new(),
    }
}

fn use_case(
    id: &str,
    project_id: &ProjectId,
    [challenge, goal, expected_impact, ninety_day_goal]: [&str; 4],
    score: f64,
    priority: i64,
) -> UseCase {
    UseCaseDraft {
        project_id: project_id.clone(),
        challenge: challenge.into(),
        goal: goal.into(),
        expected_impact: expected_impact.into(),
        ninety_day_goal: ninety_day_goal.into(),
        score: score.into(),
        priority: priority.into(),
        extra: Extra::new(),
    }
    .into_use_case(UseCaseId::from(id))
}

fn raci_entry(pillar: &str, task: &str, assignee: &str, code: &str) -> RaciEntry {
    RaciEntry {
        pillar: pillar.into(),
        task: task.into(),
        assignee: assignee.into(),
        raci: code.into(),
        extra: Extra::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdPrefix;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_has_expected_shape() {
        let seed = Dataset::demo();
        assert_eq!(seed.projects.len(), 3);
        assert_eq!(seed.visions.len(), 2);
        assert_eq!(seed.use_cases["PRJ-20251231-0001"].len(), 3);
        assert_eq!(seed.raci["PRJ-20251231-0001"].len(), 7);
        assert!(seed.values["PRJ-20251231-0002"].is_empty());
        assert_eq!(seed.plans.len(), 1);
    }

    #[test]
    fn demo_ids_follow_pattern() {
        let seed = Dataset::demo();
        for project in &seed.projects {
            assert!(IdPrefix::Project.matches(project.project_id.as_str()));
        }
        for use_case in seed.use_cases.values().flatten() {
            assert!(IdPrefix::UseCase.matches(use_case.usecase_id.as_str()));
        }
    }

    #[test]
    fn demo_plan_has_twelve_weeks() {
        let seed = Dataset::demo();
        let plan = &seed.plans["UC-20251231-001"];
        let milestones = plan.decode_milestones().unwrap();
        assert_eq!(milestones.len(), 12);
        assert_eq!(milestones[11], Milestone::new(12, "Full rollout"));
    }

    #[test]
    fn demo_timestamps_are_utc() {
        let seed = Dataset::demo();
        let acme = &seed.projects[0];
        assert_eq!(acme.project_id.as_str(), "PRJ-20251231-0001");
        assert_eq!(acme.created_date, "2025-12-20T10:00:00.000Z");
        assert_eq!(acme.status(), Some(ProjectStatus::Draft));
    }

    #[test]
    fn dataset_survives_json() {
        let seed = Dataset::demo();
        let text = serde_json::to_string(&seed).unwrap();
        let back: Dataset = serde_json::from_str(&text).unwrap();
        assert_eq!(back, seed);
    }
}
