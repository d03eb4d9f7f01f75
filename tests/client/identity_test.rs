use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use envgate_client::{BackendHttp, IdentityClient};
use envgate_core::{EnvgateConfig, IdentityBackend};

const CURRENT_USER: &str = "/api/method/crm.api.user_auth.get_current_user";
const LOGOUT: &str = "/api/method/crm.api.user_auth.logout";

fn client_for(base: &str) -> IdentityClient {
    let config = EnvgateConfig {
        backend_url: Url::parse(base).unwrap(),
        ..EnvgateConfig::default()
    };
    IdentityClient::new(BackendHttp::new(&config).unwrap())
}

async fn respond(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_success_shape_authenticates() {
    let server = respond(json!({
        "message": {
            "success": true,
            "user": {"email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"}
        }
    }))
    .await;

    let status = client_for(&server.uri()).current_user().await;
    assert!(status.authenticated);
    let user = status.user.unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.initials(), "AL");
}

#[tokio::test]
async fn test_bare_user_shape_authenticates() {
    let server = respond(json!({"message": {"email": "bob@example.com", "name": "Bob"}})).await;

    let status = client_for(&server.uri()).current_user().await;
    assert!(status.authenticated);
    assert_eq!(status.user.unwrap().full_name, "Bob");
}

#[tokio::test]
async fn test_guest_payload_is_anonymous() {
    let server = respond(json!({"message": "Guest"})).await;
    assert!(!client_for(&server.uri()).current_user().await.authenticated);
}

#[tokio::test]
async fn test_unauthorized_status_is_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": {"success": true, "user": {"email": "ada@example.com"}}
        })))
        .mount(&server)
        .await;

    assert!(!client_for(&server.uri()).current_user().await.authenticated);
}

#[tokio::test]
async fn test_unreadable_body_is_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    assert!(!client_for(&server.uri()).current_user().await.authenticated);
}

#[tokio::test]
async fn test_transport_failure_is_anonymous() {
    let status = client_for("http://127.0.0.1:1").current_user().await;
    assert!(!status.authenticated);
    assert!(status.user.is_none());
}

#[tokio::test]
async fn test_logout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server.uri()).logout().await);
    assert!(!client_for("http://127.0.0.1:1").logout().await);
}
