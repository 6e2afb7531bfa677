//! Testrun group membership tests.

use serde_json::json;
use slickqa::models::{Testrun, TestrunGroup};
use slickqa::SlickConnection;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn group() -> TestrunGroup {
    TestrunGroup {
        id: Some("g1".to_string()),
        name: Some("Week 11".to_string()),
        ..Default::default()
    }
}

fn testrun() -> Testrun {
    Testrun {
        id: Some("t1".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_add_testrun() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/testrungroups/g1/addtestrun/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g1",
            "name": "Week 11",
            "testruns": [{"id": "t1", "name": "Nightly"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let updated = slick
        .testrungroups()
        .with(&group())
        .add_testrun(&testrun())
        .await
        .unwrap();

    assert!(updated.contains("t1"));
}

#[tokio::test]
async fn test_remove_testrun() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/testrungroups/g1/removetestrun/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g1",
            "name": "Week 11",
            "testruns": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let updated = slick
        .testrungroups()
        .with(&group())
        .remove_testrun(&testrun())
        .await
        .unwrap();

    assert!(!updated.contains("t1"));
}
