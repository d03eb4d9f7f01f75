use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_USER: &str = "/api/method/crm.api.user_auth.get_current_user";
const LOGOUT: &str = "/api/method/crm.api.user_auth.logout";
const ENVIRONMENT_API: &str =
    "/api/method/sentra_core.sentra_core.doctype.erp_environment.erp_environment";

fn envgate(home: &Path, selection_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envgate").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("ENVGATE_SELECTION_FILE", selection_file)
        .env("ENVGATE_BACKEND_URL", "http://127.0.0.1:1")
        .env_remove("ENVGATE_SESSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_current_without_selection() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    envgate(dir.path(), &selection)
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("No environment selected"));
}

#[test]
fn test_current_prints_stored_name() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-42").unwrap();

    envgate(dir.path(), &selection)
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("env-42"));
}

#[test]
fn test_clear_removes_selection() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-42").unwrap();

    envgate(dir.path(), &selection)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));
    assert!(!selection.exists());

    envgate(dir.path(), &selection)
        .arg("clear")
        .assert()
        .success();
}

#[test]
fn test_edit_requires_a_change() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    envgate(dir.path(), &selection)
        .args(["edit", "env-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    envgate(dir.path(), &selection)
        .args(["--config", "/nonexistent/envgate.toml", "current"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_backend_override_fails() {
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    envgate(dir.path(), &selection)
        .env("ENVGATE_BACKEND_URL", "not a url")
        .arg("current")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("envgate")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("select"))
        .stdout(predicate::str::contains("browse"));
}

/// Backend that knows the user and serves two environments
async fn signed_in_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {
                "success": true,
                "user": {"email": "ada@example.com", "full_name": "Ada Lovelace"}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}.get_active_environments", ENVIRONMENT_API)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [
                {"name": "env-1", "display_name": "Acme"},
                {"name": "env-2", "display_name": "Bakery"}
            ]
        })))
        .mount(&server)
        .await;
    server
}

fn against(cmd: &mut Command, server: &MockServer) {
    cmd.env("ENVGATE_BACKEND_URL", server.uri())
        .env("ENVGATE_HANDOFF_URL", "http://localhost:8080")
        .env("ENVGATE_LOGIN_URL", "http://localhost:8080/login");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_no_open_prints_handoff_and_stores_selection() {
    let server = signed_in_backend().await;
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-1").unwrap();

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.args(["select", "env-2", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://localhost:8080/crm/builder?env=env-2",
        ))
        .stdout(predicate::str::contains("Switched to Bakery"));

    assert_eq!(fs::read_to_string(&selection).unwrap(), "env-2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_unknown_environment_keeps_selection() {
    let server = signed_in_backend().await;
    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-1").unwrap();

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.args(["select", "env-404", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Environment not found: env-404"));

    assert_eq!(fs::read_to_string(&selection).unwrap(), "env-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_guarded_command_fails_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Guest"})))
        .mount(&server)
        .await;
    Mock::given(path_regex("erp_environment"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.args(["select", "env-1", "--no-open"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("http://localhost:8080/login"))
        .stderr(predicate::str::contains("Not signed in"));

    assert!(!selection.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_selection_after_acknowledgement() {
    let server = signed_in_backend().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-1").unwrap();

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    assert!(!selection.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_logout_keeps_selection() {
    let server = signed_in_backend().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");
    fs::write(&selection, "env-1").unwrap();

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.arg("logout").assert().failure();

    assert_eq!(fs::read_to_string(&selection).unwrap(), "env-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_skips_prompt() {
    let server = signed_in_backend().await;
    Mock::given(method("POST"))
        .and(path(format!("{}.delete_environment", ENVIRONMENT_API)))
        .and(body_json(json!({"environment_name": "env-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.args(["delete", "env-2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted environment env-2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_rejection_keeps_its_category() {
    let server = signed_in_backend().await;
    Mock::given(method("POST"))
        .and(path(format!("{}.update_environment", ENVIRONMENT_API)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": false, "message": "Permission denied"}
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let selection = dir.path().join("current-environment");

    let mut cmd = envgate(dir.path(), &selection);
    against(&mut cmd, &server);
    cmd.args(["edit", "env-1", "--description", "Bread"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backend error: Permission denied"));
}
