use std::collections::BTreeSet;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use envgate_client::{BackendHttp, DirectoryClient, CREATE_FAILED};
use envgate_core::{ComponentCategory, EnvgateConfig, EnvgateError, EnvironmentDirectory};

const API: &str = "/api/method/sentra_core.sentra_core.doctype.erp_environment.erp_environment";

fn endpoint(name: &str) -> String {
    format!("{}.{}", API, name)
}

fn client_for(base: &str) -> DirectoryClient {
    let config = EnvgateConfig {
        backend_url: Url::parse(base).unwrap(),
        session_cookie: Some("abc123".to_string()),
        ..EnvgateConfig::default()
    };
    DirectoryClient::new(BackendHttp::new(&config).unwrap())
}

#[tokio::test]
async fn test_list_reads_message_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("get_active_environments")))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [
                {
                    "name": "env-1",
                    "display_name": "Acme",
                    "active_blueprints": [{"type": "UI"}, {"blueprint_type": "Database"}]
                },
                {"name": "env-2", "environment_name": "Legacy", "active_blueprints": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let environments = client_for(&server.uri()).list().await.unwrap();
    assert_eq!(environments.len(), 2);
    assert_eq!(environments[0].label(), "Acme");
    assert_eq!(environments[0].component_count(&ComponentCategory::Ui), 1);
    assert_eq!(environments[0].component_count(&ComponentCategory::Database), 1);
    assert_eq!(environments[1].label(), "Legacy");
    assert!(environments[1].active_components.is_empty());
}

#[tokio::test]
async fn test_list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("get_active_environments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "env-1"}])))
        .mount(&server)
        .await;

    let environments = client_for(&server.uri()).list().await.unwrap();
    assert_eq!(environments.len(), 1);
}

#[tokio::test]
async fn test_list_is_repeatable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("get_active_environments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [{"name": "env-1"}, {"name": "env-2"}, {"name": "env-3"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let first: BTreeSet<String> = client.list().await.unwrap().into_iter().map(|e| e.name).collect();
    let second: BTreeSet<String> = client.list().await.unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_non_success_status_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("get_active_environments")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let environments = client_for(&server.uri()).list().await.unwrap();
    assert!(environments.is_empty());
}

#[tokio::test]
async fn test_list_transport_failure_is_error() {
    let err = client_for("http://127.0.0.1:1").list().await.unwrap_err();
    assert!(matches!(err, EnvgateError::Network(_)));
}

#[tokio::test]
async fn test_create_returns_assigned_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("create_environment")))
        .and(body_json(json!({"display_name": "Pet Shop", "description": "ERP"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": true, "environment_name": "env-9"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let name = client_for(&server.uri()).create("Pet Shop", "ERP").await.unwrap();
    assert_eq!(name, "env-9");
}

#[tokio::test]
async fn test_create_logical_failure_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("create_environment")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": false, "message": "Environment limit reached"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).create("Pet Shop", "").await.unwrap_err();
    assert!(matches!(err, EnvgateError::Backend(_)));
    assert_eq!(err.user_message(), "Environment limit reached");
}

#[tokio::test]
async fn test_create_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("create_environment")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": {"success": false}})))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).create("Pet Shop", "").await.unwrap_err();
    assert_eq!(err.user_message(), CREATE_FAILED);
}

#[tokio::test]
async fn test_create_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("create_environment")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).create("Pet Shop", "").await.unwrap_err();
    assert!(matches!(err, EnvgateError::Network(_)));
    assert_eq!(err.user_message(), CREATE_FAILED);
}

#[tokio::test]
async fn test_update_sends_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("update_environment")))
        .and(body_json(json!({
            "environment_name": "env-1",
            "display_name": "Acme Corp",
            "description": "Renamed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server.uri())
        .update("env-1", "Acme Corp", "Renamed")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("delete_environment")))
        .and(body_json(json!({"environment_name": "env-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": false, "message": "Environment has running jobs"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).delete("env-1").await.unwrap_err();
    assert_eq!(err.user_message(), "Environment has running jobs");
}
