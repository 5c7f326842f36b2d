//! Integration tests for `kiln doctor`

#![cfg(unix)]

mod common;

use common::TestProject;
use std::process::{Command, Output};

fn fake_jdk(project: &TestProject, tools: &[&str]) {
    for tool in tools {
        project.create_script(
            &format!("jdk/bin/{tool}"),
            &format!("#!/bin/sh\necho {tool} 21.0.2\nexit 0\n"),
        );
    }
}

fn run_doctor(project: &TestProject, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kiln"));
    cmd.current_dir(project.path());
    cmd.env("JAVA_HOME", project.path().join("jdk"));
    // Pin PATH so the host's real JVM tools can't leak into the checks.
    cmd.env("PATH", "/nonexistent");
    cmd.arg("doctor");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute kiln doctor")
}

#[test]
fn test_doctor_passes_with_required_tools() {
    let project = TestProject::new();
    fake_jdk(&project, &["java", "javac", "javadoc"]);

    let output = run_doctor(&project, &[]);

    assert!(output.status.success(), "doctor failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("java"));
    assert!(stdout.contains("javac"));
    assert!(stdout.contains("v21.0.2"));
    // kotlinc is optional, so its absence is a warning at most.
    assert!(stdout.contains("kotlinc"));
}

#[test]
fn test_doctor_fails_without_javac() {
    let project = TestProject::new();
    fake_jdk(&project, &["java"]);

    let output = run_doctor(&project, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required JVM tools"));
}

#[test]
fn test_doctor_json_output_is_parseable() {
    let project = TestProject::new();
    fake_jdk(&project, &["java", "javac", "javadoc"]);

    let output = run_doctor(&project, &["--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json must emit valid JSON");

    assert_eq!(report["total_count"], 4);
    let checks = report["checks"].as_array().unwrap();
    let javac = checks.iter().find(|c| c["name"] == "javac").unwrap();
    assert_eq!(javac["passed"], true);
    assert_eq!(javac["version"], "21.0.2");
}

#[test]
fn test_doctor_quiet_mode_reports_only_missing_required() {
    let project = TestProject::new();
    fake_jdk(&project, &["java"]);

    let output = run_doctor(&project, &["--quiet"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("javac"));
}
