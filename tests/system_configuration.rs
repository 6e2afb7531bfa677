//! System configuration part tests.

use serde_json::json;
use slickqa::models::{
    AmqpSystemConfiguration, EmailSubscription, SystemConfiguration, SystemConfigurationKind,
};
use slickqa::queries::SystemConfigurationQuery;
use slickqa::{FindOneMode, SlickConnection};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_find_adds_config_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/system-configuration"))
        .and(query_param("config-type", "email-subscription"))
        .and(query_param("name", "qa@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "configurationType": "email-subscription",
            "name": "qa@example.com",
            "enabled": true
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let found = slick
        .system_configurations()
        .find_one::<EmailSubscription, _>(&[("name", "qa@example.com")], FindOneMode::First)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.common.id.as_deref(), Some("s1"));
    assert_eq!(found.enabled, Some(true));
}

#[tokio::test]
async fn test_explicit_config_type_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/system-configuration"))
        .and(query_param("config-type", "custom-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let query = SystemConfigurationQuery {
        config_type: Some("custom-type".to_string()),
        name: None,
    };
    let found: Vec<AmqpSystemConfiguration> = slick
        .system_configurations()
        .find(&query)
        .await
        .unwrap();

    assert!(found.is_empty());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("config-type=custom-type"));
}

#[tokio::test]
async fn test_base_kind_sends_no_config_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/system-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "configurationType": "amqp-system-configuration"},
            {"id": "b", "configurationType": "email-subscription"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let all = slick
        .system_configurations()
        .find_all::<SystemConfiguration>()
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_create_and_remove() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/system-configuration"))
        .and(body_json(json!({
            "configurationType": "amqp-system-configuration",
            "className": "org.tcrun.slickij.api.data.AMQPSystemConfiguration",
            "hostname": "mq.example.com",
            "port": 5672
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "configurationType": "amqp-system-configuration",
            "hostname": "mq.example.com",
            "port": "5672"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/system-configuration/c1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let slick = SlickConnection::new(&mock_server.uri()).unwrap();
    let mut amqp = AmqpSystemConfiguration::new_configuration();
    amqp.hostname = Some("mq.example.com".to_string());
    amqp.port = Some(5672);

    let created = slick.system_configurations().create(&amqp).await.unwrap();
    assert_eq!(created.port, Some(5672));

    slick.system_configurations().with(&created).remove().await.unwrap();
}
