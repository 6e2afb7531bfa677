//! E2E tests using the mock slick server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::path::Path;

use slickqa::mock_server::{Fixtures, MockServer, MockState};
use slickqa::models::{
    Build, EmailSubscription, LogEntry, Release, ResultStatus, SystemConfigurationKind,
    TestResult, Testrun, TestrunGroup,
};
use slickqa::queries::{ResultQuery, TestcaseQuery};
use slickqa::{
    Attachable, FindOneMode, Project, ResultHandle, RetryPolicy, SlickConfig, SlickConnection,
    SlickError, TestrunHandle,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Project Hierarchy Workflows
// =============================================================================

#[tokio::test]
async fn test_workflow_create_project_release_build() {
    let server = MockServer::start_empty().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let project = slick.projects().create(&Project::named("Acme")).await.unwrap();
    assert!(project.id.is_some());

    let release = slick
        .projects()
        .with(&project)
        .releases()
        .create(&Release {
            name: Some("2.0".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let build = slick
        .projects()
        .with(&project)
        .releases()
        .with(&release)
        .builds()
        .create(&Build {
            name: Some("117".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    // The build shows up nested in the project, found by name
    let fetched = slick.projects().find_by_name("Acme").await.unwrap();
    let nested = fetched
        .release_named("2.0")
        .and_then(|r| r.build_named("117"))
        .expect("build stored under release");
    assert_eq!(nested.id, build.id);

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_default_fixtures() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let version = slick.version().get().await.unwrap();
    assert_eq!(version.product_name.as_deref(), Some("slick"));

    let builds = slick
        .projects()
        .with_id(Fixtures::PROJECT_ID)
        .releases()
        .with_id(Fixtures::RELEASE_ID)
        .builds()
        .find_all()
        .await
        .unwrap();
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].name.as_deref(), Some("42"));

    let components = slick
        .projects()
        .with_id(Fixtures::PROJECT_ID)
        .components()
        .find_all()
        .await
        .unwrap();
    assert_eq!(components[0].code.as_deref(), Some("login"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_update_and_remove() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let testcase = slick
        .testcases()
        .find_one(
            &TestcaseQuery {
                name: Some("Login works".to_string()),
                ..Default::default()
            },
            FindOneMode::First,
        )
        .await
        .unwrap()
        .expect("fixture testcase");

    let mut changes = testcase.clone();
    changes.purpose = Some("Users can sign in".to_string());
    let updated = slick.testcases().update(&changes).await.unwrap();
    assert_eq!(updated.purpose.as_deref(), Some("Users can sign in"));
    assert_eq!(updated.name, testcase.name);

    slick.testcases().with(&testcase).remove().await.unwrap();
    assert!(slick.testcases().find_all().await.unwrap().is_empty());

    server.shutdown().await;
}

// =============================================================================
// Results, Testruns and Groups
// =============================================================================

#[tokio::test]
async fn test_workflow_results_for_testrun() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let results: Vec<TestResult> = slick
        .results()
        .find(&ResultQuery::for_testrun(Fixtures::TESTRUN_ID))
        .await
        .unwrap();
    assert_eq!(results.len(), 2);

    let failed = slick
        .results()
        .find(&ResultQuery {
            status: Some(ResultStatus::Fail),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(failed.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_result_handle_log_and_link() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let result = slick.results().find_all().await.unwrap().remove(0);
    let id = result.id.clone().unwrap();
    let mut handle = ResultHandle::new(result, slick.clone());

    handle.add_log_entry("starting", "INFO", "e2e");
    handle.add_link("Dashboard", "https://ci.example.com").await.unwrap();

    let stored = slick.results().with_id(id).get().await.unwrap();
    let log: &[LogEntry] = stored.log.as_deref().unwrap();
    assert_eq!(log[0].message.as_deref(), Some("starting"));
    assert_eq!(stored.links.unwrap()[0].name.as_deref(), Some("Dashboard"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_testrun_file_upload() {
    let state = MockState::new()
        .with_chunk_size(3)
        .with_item("testruns", &Fixtures::testrun("t1", "Nightly", &Fixtures::project("p1", "Acme")));
    let server = MockServer::with_state(state).await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let testrun = slick.testruns().with_id("t1").get().await.unwrap();
    let mut handle = TestrunHandle::new(testrun, slick.clone());

    let stored = handle
        .add_file(Path::new("screenshot.png"), Some(&b"not really a png"[..]))
        .await
        .unwrap()
        .expect("contents given");

    assert_eq!(stored.mimetype.as_deref(), Some("image/png"));
    assert_eq!(stored.length, Some(16));

    let file_id = stored.id.clone().unwrap();
    let server_state = server.state();
    let state = server_state.read().await;
    assert_eq!(state.file_contents(&file_id), b"not really a png");
    assert_eq!(state.chunks[&file_id].len(), 6);
    drop(state);

    let saved: Testrun = slick.testruns().with_id("t1").get().await.unwrap();
    assert_eq!(saved.files.unwrap()[0].md5, stored.md5);

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_testrun_group_membership() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let testrun = slick.testruns().with_id(Fixtures::TESTRUN_ID).get().await.unwrap();
    let group: TestrunGroup = slick.testrungroups().with_id(Fixtures::GROUP_ID).get().await.unwrap();
    assert!(!group.contains(Fixtures::TESTRUN_ID));

    let group = slick
        .testrungroups()
        .with(&group)
        .add_testrun(&testrun)
        .await
        .unwrap();
    assert!(group.contains(Fixtures::TESTRUN_ID));

    let group = slick
        .testrungroups()
        .with(&group)
        .remove_testrun(&testrun)
        .await
        .unwrap();
    assert!(!group.contains(Fixtures::TESTRUN_ID));

    server.shutdown().await;
}

#[tokio::test]
async fn test_workflow_system_configuration_kinds() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    let mut subscription = EmailSubscription::new_configuration();
    subscription.common.name = Some("dev@example.com".to_string());
    subscription.enabled = Some(false);
    slick.system_configurations().create(&subscription).await.unwrap();

    let subscriptions = slick
        .system_configurations()
        .find_all::<EmailSubscription>()
        .await
        .unwrap();
    assert_eq!(subscriptions.len(), 2);

    let amqp = slick
        .system_configurations()
        .find_all::<slickqa::models::AmqpSystemConfiguration>()
        .await
        .unwrap();
    assert!(amqp.is_empty());

    server.shutdown().await;
}

// =============================================================================
// Failure Handling
// =============================================================================

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let server = MockServer::start().await;
    let slick = SlickConnection::new(server.url()).unwrap();

    server.fail_next(2).await;
    let projects = slick.projects().find_all().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(server.request_count().await, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_persistent_failures_surface() {
    let server = MockServer::start().await;
    let config = SlickConfig::new(server.url()).retry_policy(RetryPolicy::no_retry());
    let slick = SlickConnection::with_config(config).unwrap();

    server.fail_next(1).await;
    let err = slick.projects().find_all().await.unwrap_err();

    assert!(matches!(
        err,
        SlickError::Communication {
            attempts: 1,
            status_code: Some(500),
            ..
        }
    ));

    // A later call starts from scratch
    assert!(slick.projects().find_all().await.is_ok());

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_item_is_an_error_but_missing_match_is_not() {
    let server = MockServer::start().await;
    let config = SlickConfig::new(server.url()).max_attempts(1);
    let slick = SlickConnection::with_config(config).unwrap();

    assert!(slick.projects().find_by_name("Nope").await.is_err());

    let none = slick
        .projects()
        .find_one(&[("name", "Nope")], FindOneMode::First)
        .await
        .unwrap();
    assert!(none.is_none());

    server.shutdown().await;
}
