//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file or directory exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Install an executable script inside the test project (unix only)
    #[allow(dead_code)]
    #[cfg(unix)]
    pub fn create_script(&self, name: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.create_file(name, content);
        let path = self.dir.path().join(name);
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat script")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample manifest TOML for testing
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "demo-app"
version = "1.0.0"
description = "A test project"
"#;

/// Fake javac that records its argument vector and fabricates a test
/// class file in the requested output directory
#[allow(dead_code)]
#[cfg(unix)]
pub const FAKE_JAVAC_OK: &str = r#"#!/bin/sh
echo "$@" >> javac-args.log
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-d" ]; then out="$a"; fi
  prev="$a"
done
if [ -n "$out" ]; then
  mkdir -p "$out/com/demo"
  touch "$out/com/demo/AppTest.class"
fi
exit 0
"#;

/// Fake javac that records its argument vector and fails
#[allow(dead_code)]
#[cfg(unix)]
pub const FAKE_JAVAC_FAIL: &str = r#"#!/bin/sh
echo "$@" >> javac-args.log
exit 1
"#;

/// Fake java runtime that records its argument vector
#[allow(dead_code)]
#[cfg(unix)]
pub const FAKE_JAVA_OK: &str = r#"#!/bin/sh
echo "$@" >> java-args.log
exit 0
"#;
