use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the caller's environment and saved session
fn opendrive(config_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("opendrive");
    cmd.env_remove("OPENDRIVE_TOKEN")
        .env_remove("OPENDRIVE_API_URL")
        .env_remove("OPENDRIVE_PASSWORD")
        .env_remove("RUST_LOG")
        .env("OPENDRIVE_CONFIG_DIR", config_dir.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_missing_token() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .arg("storage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"))
        .stderr(predicate::str::contains("opendrive auth login"));
}

#[test]
fn test_help_output() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("A command-line client for OpenDrive cloud storage"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("files"))
        .stdout(predicate::str::contains("storage"));
}

#[test]
fn test_version_output() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("opendrive"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_files_command_help() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .args(["files", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload a local file"))
        .stdout(predicate::str::contains("Move a file to the trash"))
        .stdout(predicate::str::contains("Permanently delete a file"));
}

#[test]
fn test_invalid_command() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_rename_missing_argument() {
    let config_dir = TempDir::new().unwrap();
    opendrive(&config_dir)
        .args(["files", "rename", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_storage_json() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let mock = server
        .mock("GET", "/storage/")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"used": 1536, "quota": 5368709120, "percentage": 0.00003}"#)
        .create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "--token", "test-token", "--format", "json", "storage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"used\": 1536"));

    mock.assert();
}

#[test]
fn test_storage_human() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let _mock = server
        .mock("GET", "/storage/")
        .with_status(200)
        .with_body(r#"{"used": 1536, "quota": 5368709120, "percentage": 0.00003}"#)
        .create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "--token", "t", "--no-color", "storage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.5 KB of 5 GB used"));
}

#[test]
fn test_server_error_is_surfaced() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let _mock = server
        .mock("GET", "/storage/")
        .with_status(500)
        .create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "--token", "t", "storage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ Failed to load storage info"))
        .stderr(predicate::str::contains("500"));
}

#[test]
fn test_blank_rename_makes_no_request() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let mock = server.mock("PUT", "/files/7/rename/").expect(0).create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "--token", "t", "files", "rename", "7", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name is empty"));

    mock.assert();
}

#[test]
fn test_declined_delete_makes_no_request() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let mock = server.mock("DELETE", "/files/7/").expect(0).create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "--token", "t", "files", "delete", "7"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("permanently delete file #7"))
        .stdout(predicate::str::contains("Cancelled"));

    mock.assert();
}

#[test]
fn test_login_then_whoami_uses_saved_session() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let _login = server
        .mock("POST", "/login/")
        .with_status(200)
        .with_body(r#"{"token": "saved-token", "user": {"id": 1, "username": "alice", "email": "alice@example.com", "first_name": "", "last_name": ""}}"#)
        .create();
    let whoami = server
        .mock("GET", "/user/")
        .match_header("authorization", "Bearer saved-token")
        .with_status(200)
        .with_body(r#"{"id": 1, "username": "alice", "email": "alice@example.com", "first_name": "", "last_name": ""}"#)
        .create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "auth", "login", "-u", "alice", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));

    assert!(config_dir.path().join("session.json").exists());

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as alice"));

    whoami.assert();
}

#[test]
fn test_rejected_login_reports_server_message() {
    let config_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let url = server.url();
    let _login = server
        .mock("POST", "/login/")
        .with_status(401)
        .with_body(r#"{"error": "Invalid credentials"}"#)
        .create();

    opendrive(&config_dir)
        .args(["--api-url", url.as_str(), "auth", "login", "-u", "alice", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to log in"))
        .stderr(predicate::str::contains("Invalid credentials"))
        .stderr(predicate::str::contains("Log in again").not());

    assert!(!config_dir.path().join("session.json").exists());
}
