//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Run webdisplay in `dir` with HOME pointed there, so only test config is read.
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_webdisplay"))
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("WEBDISPLAY_LOG")
        .args(args)
        .output()
        .expect("Failed to execute webdisplay")
}

fn write_project_config(dir: &Path, contents: &str) {
    let config_dir = dir.join(".webdisplay");
    fs::create_dir_all(&config_dir).expect("Failed to create .webdisplay dir");
    fs::write(config_dir.join("config.toml"), contents).expect("Failed to write config");
}

#[test]
fn test_help_lists_subcommands() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["bind", "show", "halt", "config"] {
        assert!(
            stdout.contains(subcommand),
            "help should list '{}', got: {}",
            subcommand,
            stdout
        );
    }
}

#[test]
fn test_halt_non_pid_record_is_noop() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["halt", "notapid"]);

    assert!(
        output.status.success(),
        "halt notapid failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Halt processed for 'notapid'"));
}

#[test]
fn test_default_mode_is_quiet() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["halt", "pid:-1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_mode_logs_json_to_stderr() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["-v", "halt", "notapid"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(r#""event":"cli.halt_started""#),
        "verbose mode should log events, got: {}",
        stderr
    );
}

#[test]
fn test_config_json_shows_defaults() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["config", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("config --json should print JSON");
    assert_eq!(value["http"]["port_min"], 8800);
    assert_eq!(value["http"]["port_max"], 9800);
    assert_eq!(value["http"]["cert"], "rootserver.pem");
}

#[test]
fn test_config_project_overrides() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_project_config(
        temp_dir.path(),
        r#"
[http]
loopback = true

[browsers.firefox]
binary = "/opt/firefox/firefox"
"#,
    );

    let output = run_in(temp_dir.path(), &["config", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["http"]["loopback"], true);
    assert_eq!(value["browsers"]["firefox"]["binary"], "/opt/firefox/firefox");
}

#[test]
fn test_config_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_project_config(temp_dir.path(), "invalid toml [[[");

    let output = run_in(temp_dir.path(), &["config"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("Tip: Check"));
}

#[test]
fn test_bind_negative_port_refused() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["bind", "--port", "-1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Not allowed to create real HTTP server"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_bind_json_prints_address() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_project_config(temp_dir.path(), "[http]\nloopback = true\n");

    let output = run_in(temp_dir.path(), &["bind", "--json"]);
    assert!(
        output.status.success(),
        "bind failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let address = value["address"].as_str().unwrap();
    assert!(address.starts_with("http://localhost:"), "got {}", address);
}

#[cfg(unix)]
#[test]
fn test_show_with_command_template() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_project_config(temp_dir.path(), "[http]\nloopback = true\n");

    let output = run_in(temp_dir.path(), &["show", "echo CLIENT $url"]);
    assert!(
        output.status.success(),
        "show failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("CLIENT http://localhost:"),
        "template output missing, got: {}",
        stdout
    );
    assert!(stdout.contains("/web7gui/win1/?key="));
    assert!(stdout.contains("Window 1 shown"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_show_without_wait_leaves_forked_client_running() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_project_config(temp_dir.path(), "[http]\nloopback = true\n");

    let output = run_in(temp_dir.path(), &["show", "fork:sleep 5"]);
    assert!(
        output.status.success(),
        "show failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let record = stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Client: "))
        .expect("show should print the client record")
        .to_string();
    let pid = record.strip_prefix("pid:").expect("fork launch records a pid");
    assert!(
        Path::new(&format!("/proc/{}", pid)).exists(),
        "client {} should outlive show",
        record
    );
    assert!(stdout.contains("webdisplay halt pid:"));

    let halt = run_in(temp_dir.path(), &["halt", &record]);
    assert!(halt.status.success());
}

#[test]
fn test_show_batch_rejects_default_browser() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_in(temp_dir.path(), &["show", "browser", "--batch"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot show a batch-mode window"), "got: {}", stderr);
}
