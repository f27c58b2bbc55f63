//! CLI integration tests for the `lyra` binary.
//!
//! These tests run the compiled binary via `std::process::Command`. Each
//! test spawns a fresh process with `LYRA_CONFIG` pointing at a nonexistent
//! path so the loader falls back to the built-in rule table, and with the
//! working directory set to an empty temp dir so no real project state
//! leaks in.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Build a `Command` pointing at the compiled `lyra` binary.
fn lyra_bin(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lyra"));
    cmd.env("LYRA_CONFIG", "/tmp/.lyra-test-nonexistent-config.json");
    // Suppress tracing output so test assertions only match program output.
    cmd.env("RUST_LOG", "off");
    cmd.current_dir(cwd);
    cmd
}

/// Run `lyra route` with `stdin` piped in.
fn route(cwd: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = lyra_bin(cwd)
        .arg("route")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn lyra");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for lyra")
}

fn prompt(text: &str) -> String {
    serde_json::json!({ "prompt": text }).to_string()
}

fn managed_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let planning = dir.path().join(".planning");
    fs::create_dir_all(&planning).unwrap();
    fs::write(planning.join("STATE.md"), "# State\nphase: 3\n").unwrap();
    dir
}

// ── 1. Version and help ─────────────────────────────────────────────────

#[test]
fn version_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lyra"), "got: {stdout}");
}

#[test]
fn help_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Lexical prompt router"), "got: {stdout}");
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).arg("nope").output().unwrap();
    assert!(!output.status.success());
}

// ── 2. Route hook ───────────────────────────────────────────────────────

#[test]
fn route_prints_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = route(dir.path(), &[], &prompt("build a dashboard for tracking expenses"));
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Lyra -> /gsd:new-project\n"
    );
}

#[test]
fn route_none_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    for stdin in [
        String::new(),
        "not json at all".to_string(),
        "{}".to_string(),
        prompt("ok"),
        prompt("please don't build a new dashboard, just explain how one would work"),
        prompt("git push origin main --force-with-lease please"),
    ] {
        let output = route(dir.path(), &[], &stdin);
        assert!(output.status.success(), "exit code for {stdin:?}");
        assert!(output.stdout.is_empty(), "stdout for {stdin:?}");
    }
}

#[test]
fn route_detects_managed_project_from_cwd() {
    let dir = managed_dir();
    let output = route(
        dir.path(),
        &[],
        &prompt("build a new reporting module for this app"),
    );
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Lyra -> /gsd:plan-phase\n"
    );
}

#[test]
fn route_project_dir_flag() {
    let project = managed_dir();
    let elsewhere = tempfile::tempdir().unwrap();
    let output = route(
        elsewhere.path(),
        &["--project-dir", project.path().to_str().unwrap()],
        &prompt("build a new reporting module for this app"),
    );
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Lyra -> /gsd:plan-phase\n"
    );
}

#[test]
fn route_managed_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = route(
        dir.path(),
        &["--managed-project"],
        &prompt("build a new reporting module for this app"),
    );
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Lyra -> /gsd:plan-phase\n"
    );
}

#[test]
fn route_missing_config_still_routes() {
    let dir = tempfile::tempdir().unwrap();
    let output = route(
        dir.path(),
        &["--config", "/nonexistent/lyra-config.json"],
        &prompt("the checkout page shows an error and then the whole app crashes"),
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Lyra -> /gsd:debug\n"
    );
}

#[test]
fn route_invalid_config_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lyra-config.toml");
    fs::write(
        &config,
        r#"
prefix = "Try:"
managedRedirect = "off"

[[categories]]
id = "docs"
route = "/docs"

[[categories.signals]]
weight = 3
pattern = { phrase = "readme" }
"#,
    )
    .unwrap();

    let mut cmd = lyra_bin(dir.path());
    cmd.env("LYRA_CONFIG", &config);
    let mut child = cmd
        .arg("route")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(prompt("please update the readme with the new install steps").as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    // `managedRedirect = "off"` is not a valid redirect table, so the whole
    // file is rejected and the built-in rules are used instead.
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn route_uses_valid_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lyra-config.toml");
    fs::write(
        &config,
        r#"
prefix = "Try:"

[[categories]]
id = "new-project"
route = "/scaffold"

[[categories.signals]]
weight = 3
pattern = { phrase = "readme" }

[[categories]]
id = "plan-phase"
route = "/plan"
"#,
    )
    .unwrap();

    let output = route(
        dir.path(),
        &["--config", config.to_str().unwrap()],
        &prompt("please update the readme with the new install steps"),
    );
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Try: /scaffold\n");
}

// ── 3. Context hook ─────────────────────────────────────────────────────

#[test]
fn context_empty_dir_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).arg("context").output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn context_prints_state_and_stack() {
    let dir = managed_dir();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "react": "18" }, "devDependencies": { "typescript": "5" } }"#,
    )
    .unwrap();

    let output = lyra_bin(dir.path()).arg("context").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("[GSD Project State]\n# State\nphase: 3"));
    assert!(stdout.contains("[Stack: React, TypeScript]"));
}

// ── 4. Operator commands ────────────────────────────────────────────────

#[test]
fn explain_shows_decision() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path())
        .args(["explain", "build a dashboard for tracking expenses"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("decision: new-project (score 4)"), "got: {stdout}");
}

#[test]
fn explain_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path())
        .args(["explain", "--json", "ok"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["fast_exit"], "too_short");
    assert!(value["decision"]["category"].is_null());
}

#[test]
fn categories_lists_routes() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).arg("categories").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/gsd:debug"));
    assert!(stdout.contains("confidence floor: 3"));
}

#[test]
fn config_show_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path()).args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["confidence_floor"], 3);
    assert_eq!(value["categories"].as_array().unwrap().len(), 6);
}

#[test]
fn config_show_missing_override_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = lyra_bin(dir.path())
        .args(["config", "show", "--config", "/nonexistent/lyra.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
