//! Deferred delivery through the call shim

use preview_api::{ApiError, CallShim, Operation, PreviewApi, PreviewConfig, StorageConfig};
use preview_model::{Envelope, Reply};
use preview_test_utils::{
    capture_logs, project_id, setup_failing_api, setup_test_shim, BARE_PROJECT,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn configured_latency_is_honoured() {
    let config = PreviewConfig::new().with_latency(Duration::from_millis(400));
    let shim = CallShim::from_config(&config).unwrap();
    assert_eq!(shim.latency(), Duration::from_millis(400));

    let start = Instant::now();
    let (tx, rx) = oneshot::channel();
    shim.with_success_handler(move |env| {
        let _ = tx.send(env);
    })
    .spawn(Operation::GetCurrentUser);

    let env = rx.await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(400));
    assert!(matches!(env.data, Some(Reply::User(ref u)) if u.email == "demo@example.com"));
}

#[tokio::test]
async fn success_handler_sees_domain_failures() {
    let shim = setup_test_shim();
    let (tx, rx) = oneshot::channel::<Envelope<Reply>>();
    shim.with_success_handler(move |env| {
        let _ = tx.send(env);
    })
    .with_failure_handler(|err| panic!("unexpected failure: {err}"))
    .run(Operation::GetProject {
        project_id: project_id("PRJ-19990101-0000"),
    })
    .await;

    let env = rx.await.unwrap();
    assert!(!env.success);
    assert_eq!(env.error.as_deref(), Some("Project not found"));
}

#[tokio::test]
async fn failure_handler_sees_execution_errors() {
    let (api, _backend) = setup_failing_api();
    let shim = CallShim::new(Arc::new(api), Duration::ZERO);

    let (tx, rx) = oneshot::channel::<ApiError>();
    shim.with_success_handler(|_| panic!("unexpected success"))
        .with_failure_handler(move |err| {
            let _ = tx.send(err);
        })
        .spawn(Operation::CreateProject {
            customer_name: "Acme".to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(rx.await.unwrap(), ApiError::Store(_)));
}

#[tokio::test]
async fn unhandled_execution_error_is_logged() {
    let (api, _backend) = setup_failing_api();
    let shim = CallShim::new(Arc::new(api), Duration::ZERO);
    let (logs, _guard) = capture_logs();

    shim.with_success_handler(|_| panic!("unexpected success"))
        .run(Operation::GetUserProjects)
        .await;

    let output = logs.contents();
    let line = output
        .lines()
        .find(|line| line.contains("no failure handler"))
        .expect("failure was not logged");
    assert!(line.contains("ERROR"));
    assert!(line.contains(r#"op="getUserProjects""#));
    assert!(line.contains("backend offline"));
}

#[tokio::test]
async fn file_backed_calls_persist() {
    let dir = tempfile::tempdir().unwrap();
    let config = PreviewConfig::new().with_storage(StorageConfig::File {
        path: dir.path().join("store.json"),
    });
    let shim = CallShim::from_config(&config).unwrap();
    assert!(shim.api().store().is_blocking());

    let env = shim
        .call(Operation::CreateProject {
            customer_name: "Acme".to_string(),
        })
        .await
        .unwrap();
    let Some(Reply::Project(created)) = env.data else {
        panic!("expected a project");
    };

    let reopened = PreviewApi::from_config(&config).unwrap();
    let fetched = reopened.get_project(&created.project_id).unwrap();
    assert!(fetched.success);
    assert_eq!(fetched.into_data().unwrap().customer_name, "Acme");
}

#[tokio::test]
async fn concurrent_creates_never_collide() {
    let shim = setup_test_shim();
    let mut tasks = Vec::new();
    for n in 0..16 {
        let shim = shim.clone();
        tasks.push(tokio::spawn(async move {
            shim.call(Operation::CreateProject {
                customer_name: format!("Customer {n}"),
            })
            .await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().unwrap().success);
    }

    let projects = shim.api().get_user_projects().unwrap().into_data().unwrap();
    assert_eq!(projects.len(), 19);
    let mut ids: Vec<_> = projects.iter().map(|p| p.project_id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 19);
}

#[tokio::test]
async fn direct_call_returns_envelope() {
    let shim = setup_test_shim();
    let env = shim
        .call(Operation::GetUsecases {
            project_id: project_id(BARE_PROJECT),
        })
        .await
        .unwrap();
    assert!(matches!(env.data, Some(Reply::UseCases(ref list)) if list.is_empty()));
}
