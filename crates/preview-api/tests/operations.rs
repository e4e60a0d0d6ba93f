//! Behaviour of the planning operations against a seeded memory store

use chrono::Duration;
use pretty_assertions::assert_eq;
use preview_api::{Operation, PreviewApi, PROPOSAL_URL_BASE};
use preview_model::{
    Dataset, Field, IdPrefix, ProjectStatus, RaciEntry, Reply, UseCaseId, PROJECT_NOT_FOUND,
};
use preview_test_utils::{
    project_id, sample_draft, sample_value, sample_vision, setup_failing_api, setup_test_api,
    setup_test_api_with, test_clock, test_now, RecordingNotifier, BARE_PROJECT, SEEDED_PROJECT,
};
use serde_json::json;
use std::collections::HashSet;

#[test]
fn created_project_is_listed_first_and_fetchable() {
    let api = setup_test_api();
    let created = api.create_project("Acme").unwrap().into_data().unwrap();

    assert!(IdPrefix::Project.matches(created.project_id.as_str()));
    assert!(created.project_id.as_str().starts_with("PRJ-20261016-"));
    assert_eq!(created.status(), Some(ProjectStatus::Draft));
    assert_eq!(created.status, "下書き");
    assert_eq!(created.creator_email, "demo@example.com");
    assert_eq!(created.editor_emails, "demo@example.com");
    assert_eq!(created.created_date, Field::from(test_now()));
    assert_eq!(created.created_date, "2026-10-16T09:30:00.000Z");

    let projects = api.get_user_projects().unwrap().into_data().unwrap();
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[0], created);

    let fetched = api.get_project(&created.project_id).unwrap().into_data().unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn created_ids_are_unique() {
    let api = setup_test_api();
    let mut seen = HashSet::new();
    for n in 0..25 {
        let project = api
            .create_project(&format!("Customer {n}"))
            .unwrap()
            .into_data()
            .unwrap();
        assert!(seen.insert(project.project_id));
    }

    let mut use_cases = HashSet::new();
    for n in 0..25 {
        let created = api
            .add_use_case(sample_draft(SEEDED_PROJECT, &format!("challenge {n}")))
            .unwrap()
            .into_data()
            .unwrap();
        assert!(IdPrefix::UseCase.matches(created.usecase_id.as_str()));
        assert!(use_cases.insert(created.usecase_id));
    }
}

#[test]
fn unknown_project_is_a_failure_envelope() {
    let api = setup_test_api();
    let missing = project_id("PRJ-19990101-0000");

    let env = api.get_project(&missing).unwrap();
    assert!(!env.success);
    assert_eq!(env.error.as_deref(), Some(PROJECT_NOT_FOUND));

    let env = api
        .update_project_status(&missing, ProjectStatus::Confirmed.into())
        .unwrap();
    assert!(!env.success);
    assert_eq!(env.error.as_deref(), Some(PROJECT_NOT_FOUND));
    assert_eq!(api.store().projects().unwrap(), Dataset::demo().projects);
}

#[test]
fn custom_status_round_trips() {
    let api = setup_test_api();
    let id = project_id(BARE_PROJECT);
    let env = api
        .execute(Operation::UpdateProjectStatus {
            project_id: id.clone(),
            status: "保留".into(),
        })
        .unwrap();
    assert_eq!(env.message.as_deref(), Some("Status updated"));

    let project = api.get_project(&id).unwrap().into_data().unwrap();
    assert_eq!(project.status(), Some(ProjectStatus::Custom("保留".to_string())));
}

#[test]
fn vision_save_is_idempotent_upsert() {
    let api = setup_test_api();
    let vision = sample_vision(BARE_PROJECT, "Be the lab of record");
    let id = project_id(BARE_PROJECT);

    assert_eq!(api.get_vision(&id).unwrap().into_data(), Some(None));

    api.save_vision(vision.clone()).unwrap();
    let once = api.store().snapshot().unwrap();
    api.save_vision(vision.clone()).unwrap();
    assert_eq!(api.store().snapshot().unwrap(), once);

    assert_eq!(api.get_vision(&id).unwrap().into_data(), Some(Some(vision)));
}

#[test]
fn only_vision_save_refreshes_project_timestamp() {
    let (api, clock, _) = setup_test_api_with(test_clock());
    let id = project_id(SEEDED_PROJECT);
    let before = api.get_project(&id).unwrap().into_data().unwrap().updated_date;

    api.add_use_case(sample_draft(SEEDED_PROJECT, "Forecasting"))
        .unwrap();
    api.save_raci_entries(&id, Vec::new()).unwrap();
    api.save_value(sample_value(SEEDED_PROJECT, "UC-20251231-001", "Expand"))
        .unwrap();
    let unchanged = api.get_project(&id).unwrap().into_data().unwrap();
    assert_eq!(unchanged.updated_date, before);

    clock.advance(Duration::hours(2));
    api.save_vision(sample_vision(SEEDED_PROJECT, "Refocus"))
        .unwrap();
    let refreshed = api.get_project(&id).unwrap().into_data().unwrap();
    assert_eq!(refreshed.updated_date, Field::from(test_now() + Duration::hours(2)));
    assert_eq!(refreshed.created_date, unchanged.created_date);
}

#[test]
fn vision_for_unknown_project_is_still_stored() {
    let api = setup_test_api();
    let env = api
        .save_vision(sample_vision("PRJ-19990101-0000", "Orphan"))
        .unwrap();
    assert!(env.success);
    assert_eq!(api.store().projects().unwrap(), Dataset::demo().projects);
    assert!(api.store().visions().unwrap().contains_key("PRJ-19990101-0000"));
}

#[test]
fn use_cases_append_under_their_project() {
    let api = setup_test_api();
    let id = project_id(BARE_PROJECT);
    assert!(api.get_use_cases(&id).unwrap().into_data().unwrap().is_empty());

    let created = api
        .add_use_case(sample_draft(BARE_PROJECT, "Churn"))
        .unwrap()
        .into_data()
        .unwrap();
    let listed = api.get_use_cases(&id).unwrap().into_data().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].usecase_id, created.usecase_id);
    assert_eq!(listed[0].draft.challenge, "Churn");
}

#[test]
fn raci_save_replaces_whole_list() {
    let api = setup_test_api();
    let id = project_id(SEEDED_PROJECT);
    assert_eq!(api.get_raci_entries(&id).unwrap().into_data().unwrap().len(), 7);

    let entries = vec![RaciEntry {
        pillar: "IT".into(),
        task: "Cut over".into(),
        assignee: "Kim".into(),
        raci: "R".into(),
        ..RaciEntry::default()
    }];
    let env = api.save_raci_entries(&id, entries.clone()).unwrap();
    assert_eq!(env.message.as_deref(), Some("RACI entries saved"));
    assert_eq!(api.get_raci_entries(&id).unwrap().into_data().unwrap(), entries);

    let other = project_id("PRJ-20251231-0002");
    assert_eq!(api.get_raci_entries(&other).unwrap().into_data().unwrap().len(), 2);
}

#[test]
fn value_save_replaces_same_use_case_and_appends_new() {
    let api = setup_test_api();
    let id = project_id(SEEDED_PROJECT);
    assert_eq!(api.get_values(&id).unwrap().into_data().unwrap().len(), 2);

    api.save_value(sample_value(SEEDED_PROJECT, "UC-20251231-001", "Scale"))
        .unwrap();
    let values = api.get_values(&id).unwrap().into_data().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].next_investment, "Scale");

    api.save_value(sample_value(SEEDED_PROJECT, "UC-20251231-003", "Pilot"))
        .unwrap();
    let values = api.get_values(&id).unwrap().into_data().unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values[2].usecase_id, UseCaseId::from("UC-20251231-003"));
}

#[test]
fn plan_lookup_ignores_project() {
    let api = setup_test_api();
    let usecase = UseCaseId::from("UC-20251231-001");

    let plan = api
        .get_ninety_day_plan(&usecase, &project_id("PRJ-unrelated"))
        .unwrap()
        .into_data()
        .unwrap()
        .unwrap();
    assert_eq!(plan.decode_milestones().unwrap().len(), 12);

    let missing = api
        .get_ninety_day_plan(&UseCaseId::from("UC-20251231-004"), &project_id(SEEDED_PROJECT))
        .unwrap();
    assert_eq!(missing.into_data(), Some(None));
}

#[test]
fn plan_save_upserts_by_use_case() {
    let api = setup_test_api();
    let usecase = UseCaseId::from("UC-20251231-002");
    let mut plan = api
        .get_ninety_day_plan(&UseCaseId::from("UC-20251231-001"), &project_id(SEEDED_PROJECT))
        .unwrap()
        .into_data()
        .flatten()
        .unwrap();
    plan.usecase_id = usecase.clone();
    plan.risks = "Vendor delay".into();

    let env = api.save_ninety_day_plan(plan.clone()).unwrap();
    assert_eq!(env.message.as_deref(), Some("90-day plan saved"));
    assert_eq!(api.store().plans().unwrap().len(), 2);
    assert_eq!(
        api.get_ninety_day_plan(&usecase, &project_id(SEEDED_PROJECT))
            .unwrap()
            .into_data(),
        Some(Some(plan))
    );
}

#[test]
fn initialize_restores_seed() {
    let api = setup_test_api();
    api.create_project("Acme").unwrap();
    api.save_raci_entries(&project_id(SEEDED_PROJECT), Vec::new())
        .unwrap();

    let env = api.initialize().unwrap();
    assert_eq!(env.message.as_deref(), Some("Storage initialized"));
    assert_eq!(api.store().snapshot().unwrap(), Dataset::demo());
}

#[test]
fn proposal_notifies_and_stores_nothing() {
    let notifier = RecordingNotifier::shared();
    let api: PreviewApi = setup_test_api().with_notifier(notifier.clone());

    let doc = api
        .generate_proposal(&project_id(SEEDED_PROJECT))
        .into_data()
        .unwrap();
    assert_eq!(
        doc.document_url,
        format!("{PROPOSAL_URL_BASE}{SEEDED_PROJECT}")
    );

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains(&doc.document_url));
    assert_eq!(api.store().snapshot().unwrap(), Dataset::demo());
}

#[test]
fn current_user_follows_configuration() {
    let api = setup_test_api().with_user_email("lead@example.com");
    assert_eq!(api.current_user().into_data().unwrap().email, "lead@example.com");

    let project = api.create_project("Initech").unwrap().into_data().unwrap();
    assert_eq!(project.creator_email, "lead@example.com");
}

#[test]
fn unknown_fields_survive_save_and_load() {
    let api = setup_test_api();
    let op: Operation = serde_json::from_value(json!({
        "op": "saveVision",
        "args": {
            "projectId": BARE_PROJECT,
            "visionText": "Lab of record",
            "owner": "Dana"
        }
    }))
    .unwrap();
    api.execute(op).unwrap();

    let env = api
        .execute(Operation::GetVision {
            project_id: project_id(BARE_PROJECT),
        })
        .unwrap();
    let Some(Reply::Vision(Some(vision))) = env.data else {
        panic!("vision missing");
    };
    assert_eq!(vision.extra.get("owner"), Some(&json!("Dana")));
}

#[test]
fn use_case_form_values_are_stored_as_given() {
    let api = setup_test_api();
    let op: Operation = serde_json::from_value(json!({
        "op": "addUsecase",
        "args": {
            "projectId": BARE_PROJECT,
            "challenge": "Churn",
            "score": "85",
            "priority": null
        }
    }))
    .unwrap();
    let env = api.execute(op).unwrap();
    let Some(Reply::UseCaseCreated(created)) = env.data else {
        panic!("use case id missing");
    };

    let env = api
        .execute(Operation::GetUsecases {
            project_id: project_id(BARE_PROJECT),
        })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&env.data).unwrap(),
        json!([{
            "usecaseId": created.usecase_id.as_str(),
            "projectId": BARE_PROJECT,
            "challenge": "Churn",
            "score": "85",
            "priority": null
        }])
    );
}

#[test]
fn partial_vision_is_stored_as_given() {
    let api = setup_test_api();
    let op: Operation = serde_json::from_value(json!({
        "op": "saveVision",
        "args": {"projectId": BARE_PROJECT, "notes": 42}
    }))
    .unwrap();
    assert!(api.execute(op).unwrap().success);

    let env = api
        .execute(Operation::GetVision {
            project_id: project_id(BARE_PROJECT),
        })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&env.data).unwrap(),
        json!({"projectId": BARE_PROJECT, "notes": 42})
    );
}

#[test]
fn envelope_json_shapes() {
    let api = setup_test_api();
    let env = api
        .execute(Operation::SaveRaciEntries {
            project_id: project_id(BARE_PROJECT),
            entries: Vec::new(),
        })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&env).unwrap(),
        json!({"success": true, "message": "RACI entries saved"})
    );

    let env = api
        .execute(Operation::GetProject {
            project_id: project_id("PRJ-19990101-0000"),
        })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&env).unwrap(),
        json!({"success": false, "error": "Project not found"})
    );
}

#[test]
fn backend_failure_is_an_execution_error() {
    let (api, backend) = setup_failing_api();
    let err = api.get_user_projects().unwrap_err();
    assert!(!err.is_corruption());
    assert!(err.to_string().contains("backend offline"));

    assert!(api.create_project("Acme").is_err());

    backend.recover();
    assert_eq!(api.get_user_projects().unwrap().into_data().unwrap().len(), 3);
}
