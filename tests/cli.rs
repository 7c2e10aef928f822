//! Binary smoke tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bridge(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ollama-bridge").unwrap();
    cmd.env("BRIDGE_CONFIG", config_dir.path().join("config.json"))
        .env_remove("BRIDGE_ENGINE_URL")
        .env_remove("BRIDGE_MODEL")
        .env_remove("BRIDGE_POLICY")
        .env_remove("BRIDGE_TIMEOUT_SECS");
    cmd
}

fn write_config(dir: &TempDir, body: &str) {
    std::fs::write(dir.path().join("config.json"), body).unwrap();
}

#[test]
fn help_lists_commands() {
    let mut cmd = Command::cargo_bin("ollama-bridge").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn config_merges_file_and_flags() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{"engine": {"model": "llama3:8b"}, "policy": "refusal"}"#);

    bridge(&dir)
        .args(["--engine-url", "http://gpu-box:11434", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"llama3:8b\""))
        .stdout(predicate::str::contains("http://gpu-box:11434"))
        .stdout(predicate::str::contains("\"policy\": \"refusal\""));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    bridge(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn generate_reports_unreachable_engine() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "{}");

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    bridge(&dir)
        .args([
            "--engine-url",
            &format!("http://{addr}"),
            "--timeout-secs",
            "2",
            "generate",
            "What is 2+2?",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backend unavailable"));
}

#[test]
fn invalid_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "{}");

    bridge(&dir)
        .args(["--timeout-secs", "0", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn hosted_chat_requires_api_key() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "{}");

    bridge(&dir)
        .current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .args(["chat", "--hosted"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY is not set"));
}

#[test]
fn listen_address_is_only_checked_when_serving() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{"server": {"host": "not a host"}}"#);

    bridge(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not a host"));

    bridge(&dir)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid listen address"));
}
