//! Toolchain health checks
//!
//! Verifies that the JVM tools kiln spawns are actually present before a
//! build trips over them, and reports versions where the tools admit one.

use std::path::Path;

use crate::error::ToolchainError;
use crate::infra::process::CommandRunner;
use crate::infra::toolchain::JvmToolchain;

/// Result of a single toolchain check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Tool name
    pub name: String,
    /// Whether the tool was found
    pub passed: bool,
    /// Whether a build can work without it
    pub required: bool,
    /// Detected version, when the probe produced one
    pub version: Option<String>,
    /// Failure detail
    pub error: Option<String>,
    /// Remediation hint
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// A passing check
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            required,
            version,
            error: None,
            suggestion: None,
        }
    }

    /// A failing check
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            required,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(ToString::to_string),
        }
    }
}

/// Aggregated doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Whether all required checks passed
    pub fn required_ok(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Whether every check passed, optional ones included
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Run every toolchain check
pub fn run_doctor(toolchain: &JvmToolchain) -> DoctorReport {
    DoctorReport {
        checks: vec![
            check_tool(toolchain.java(), "java", true, "Install a JDK and set JAVA_HOME"),
            check_tool(toolchain.javac(), "javac", true, "Install a JDK (a JRE has no compiler)"),
            check_tool(
                toolchain.javadoc(),
                "javadoc",
                false,
                "Install a full JDK to generate documentation",
            ),
            check_tool(
                toolchain.kotlinc(),
                "kotlinc",
                false,
                "Install the Kotlin compiler from https://kotlinlang.org",
            ),
        ],
    }
}

fn check_tool(
    lookup: Result<std::path::PathBuf, ToolchainError>,
    name: &str,
    required: bool,
    suggestion: &str,
) -> CheckResult {
    match lookup {
        Ok(path) => CheckResult::pass(name, probe_version(&path), required),
        Err(e) => CheckResult::fail(name, &e.to_string(), Some(suggestion), required),
    }
}

/// Ask a tool for its version banner and extract a version number
///
/// kotlinc and pre-9 JDKs print the banner to stderr, so the error-side
/// lines are scanned too.
pub fn probe_version(executable: &Path) -> Option<String> {
    let banner = std::cell::RefCell::new(Vec::new());
    CommandRunner::new(executable)
        .run(
            &["--version".to_string()],
            |lines| *banner.borrow_mut() = lines,
            |lines| *banner.borrow_mut() = lines,
        )
        .ok()?;
    let banner = banner.into_inner();
    extract_version(&banner.join(" "))
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    // Version patterns like "21.0.2" or "v1.9.22"
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_version_from_javac_banner() {
        assert_eq!(extract_version("javac 21.0.2"), Some("21.0.2".to_string()));
    }

    #[test]
    fn test_extract_version_from_kotlinc_banner() {
        assert_eq!(
            extract_version("info: kotlinc-jvm 1.9.22 (JRE 21.0.2+13)"),
            Some("1.9.22".to_string())
        );
    }

    #[test]
    fn test_extract_version_absent() {
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_doctor_reports_fake_jdk() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        for tool in ["java", "javac", "javadoc"] {
            let path = bin.join(tool);
            std::fs::write(&path, format!("#!/bin/sh\necho {tool} 21.0.2\n")).unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
        }

        let toolchain = JvmToolchain::new(Some(home.path().to_path_buf()));
        let report = run_doctor(&toolchain);

        assert!(report.required_ok());
        let javac = report.checks.iter().find(|c| c.name == "javac").unwrap();
        assert!(javac.passed);
        assert_eq!(javac.version.as_deref(), Some("21.0.2"));
    }

    #[test]
    fn test_report_counts_failed_required() {
        let report = DoctorReport {
            checks: vec![
                CheckResult::pass("java", None, true),
                CheckResult::fail("javac", "not found", None, true),
                CheckResult::fail("kotlinc", "not found", None, false),
            ],
        };

        assert!(!report.required_ok());
        assert!(!report.all_passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_required().len(), 1);
        assert_eq!(report.failed_required()[0].name, "javac");
    }
}
