//! End-to-end tests for the `cl` binary: exit codes and user-facing
//! messages, with HOME pointed at a temp dir and the API mocked.

use mockito::Server;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cl_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cl"));
    cmd.env("HOME", home)
        .env_remove("CLICKUP_API_TOKEN")
        .env_remove("CLICKUP_API_URL");
    cmd
}

fn write_config(home: &Path, body: &str) {
    let dir = home.join(".clickup-cli");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), body).unwrap();
}

fn setup_home() -> TempDir {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "api_token: pk_test_token\nuser_id: 183\nworkspace_id: '9001'\n",
    );
    home
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_missing_config_exits_with_one() {
    let home = TempDir::new().unwrap();
    cl_cmd(home.path())
        .args(["space", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cl config init"));
}

#[test]
fn test_verbose_logs_the_failure_chain() {
    let home = TempDir::new().unwrap();
    cl_cmd(home.path())
        .args(["-v", "space", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command failed: Config not found"));
}

#[test]
fn test_quiet_run_skips_debug_records() {
    let home = TempDir::new().unwrap();
    cl_cmd(home.path())
        .args(["space", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command failed").not());
}

#[test]
fn test_config_without_token_is_rejected() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "workspace_id: '9001'\n");
    cl_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("api_token"));
}

#[test]
fn test_config_show_masks_token() {
    let home = setup_home();
    cl_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pk_test_..."))
        .stdout(predicate::str::contains("pk_test_token").not());
}

// =============================================================================
// Aliases
// =============================================================================

#[test]
fn test_alias_round_trip() {
    let home = setup_home();

    cl_cmd(home.path())
        .args(["alias", "set", "name", "--folder-id", "123"])
        .assert()
        .success();

    cl_cmd(home.path())
        .args(["alias", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@name"))
        .stdout(predicate::str::contains("folder"))
        .stdout(predicate::str::contains("123"));

    cl_cmd(home.path())
        .args(["alias", "remove", "name"])
        .assert()
        .success();

    cl_cmd(home.path())
        .args(["folder", "list", "-s", "@name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'@name' not found"));
}

#[test]
fn test_alias_set_needs_exactly_one_id() {
    let home = setup_home();
    cl_cmd(home.path())
        .args(["alias", "set", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exactly one"));
    cl_cmd(home.path())
        .args(["alias", "set", "x", "-s", "1", "-l", "2"])
        .assert()
        .code(1);
}

#[test]
fn test_alias_of_wrong_type() {
    let home = setup_home();
    cl_cmd(home.path())
        .args(["alias", "set", "sprint", "--space-id", "999"])
        .assert()
        .success();
    cl_cmd(home.path())
        .args(["task", "list", "-l", "@sprint"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("space"))
        .stderr(predicate::str::contains("list"));
}

// =============================================================================
// API errors
// =============================================================================

#[test]
fn test_not_found_message_includes_path() {
    let home = setup_home();
    let mut server = Server::new();
    server.mock("GET", "/task/ghost").with_status(404).create();

    cl_cmd(home.path())
        .env("CLICKUP_API_URL", server.url())
        .args(["task", "view", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/task/ghost"));
}

#[test]
fn test_unauthorized_asks_for_reauth() {
    let home = setup_home();
    let mut server = Server::new();
    server.mock("GET", "/team/9001/space").with_status(401).create();

    cl_cmd(home.path())
        .env("CLICKUP_API_URL", server.url())
        .args(["space", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cl config init"));
}

#[test]
fn test_space_list_prints_table() {
    let home = setup_home();
    let mut server = Server::new();
    server
        .mock("GET", "/team/9001/space")
        .match_header("authorization", "pk_test_token")
        .with_status(200)
        .with_body(r#"{"spaces": [{"id": "s1", "name": "Engineering"}]}"#)
        .create();

    cl_cmd(home.path())
        .env("CLICKUP_API_URL", server.url())
        .args(["space", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spaces"))
        .stdout(predicate::str::contains("Engineering"));
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn test_bad_time_estimate_is_rejected() {
    let home = setup_home();
    cl_cmd(home.path())
        .args(["task", "create", "-l", "901", "-n", "x", "-T", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid time estimate 'abc'"));
}
