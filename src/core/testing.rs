//! Test execution
//!
//! Discovers compiled test classes under the test-classes directory and
//! launches them in a JVM subprocess. Launcher variants (TestNG, JUnit,
//! custom) differ only in main class and leading arguments, so the runner
//! is one concrete type parameterized by a [`LauncherConfig`].

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::{CLASS_FILE_EXTENSION, TEST_CLASS_SUFFIX};
use crate::core::compiler::TaskResult;
use crate::core::dependency::{join_classpath, ResolvedDependency};
use crate::core::project::ProjectDescriptor;
use crate::error::{FilesystemError, KilnError};
use crate::infra::process::{run_inherited, ProcessSpec};

/// What a test launcher needs beyond the classpath
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Fully qualified launcher main class
    pub main_class: String,
    /// Launcher arguments, placed before the discovered class names
    pub args: Vec<String>,
}

/// Discover fully qualified test class names under `scan_root`
///
/// A compiled class qualifies when its file name ends with
/// `Test.class`. `com/foo/BarTest.class` becomes `com.foo.BarTest`;
/// `com/foo/BarHelper.class` is excluded.
pub fn find_test_classes(scan_root: &Path) -> Result<Vec<String>, FilesystemError> {
    if !scan_root.is_dir() {
        return Ok(Vec::new());
    }

    let wanted = format!("{TEST_CLASS_SUFFIX}{CLASS_FILE_EXTENSION}");
    let mut result = Vec::new();

    for entry in WalkDir::new(scan_root).sort_by_file_name() {
        let entry = entry.map_err(|e| FilesystemError::Walk {
            path: scan_root.to_path_buf(),
            error: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&wanted));
        if !matches {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(scan_root)
            .unwrap_or_else(|_| entry.path());
        let qualified = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".");
        result.push(qualified);
    }

    Ok(result)
}

/// Argument vector for the test launcher JVM
///
/// Shape: `[-classpath, joined, mainClass, ...launcherArgs, ...classes]`
/// (the java executable itself is the program, not an argument).
pub fn launcher_args(
    launcher: &LauncherConfig,
    classpath: &[ResolvedDependency],
    classes: &[String],
) -> Vec<String> {
    let mut args = vec![
        "-classpath".to_string(),
        join_classpath(classpath),
        launcher.main_class.clone(),
    ];
    args.extend(launcher.args.iter().cloned());
    args.extend(classes.iter().cloned());
    args
}

/// Runs compiled tests in a JVM subprocess
#[derive(Debug)]
pub struct TestRunner {
    java: PathBuf,
    launcher: LauncherConfig,
}

impl TestRunner {
    /// Create a runner around a resolved java executable
    pub fn new(java: PathBuf, launcher: LauncherConfig) -> Self {
        Self { java, launcher }
    }

    /// Discover and run the project's test classes
    ///
    /// Inherited I/O, project root as working directory, unbounded wait.
    /// Test failures come back as a failed [`TaskResult`]; no per-test
    /// detail is extracted at this layer.
    pub fn run_tests(
        &self,
        project: &ProjectDescriptor,
        classpath: &[ResolvedDependency],
    ) -> Result<TaskResult, KilnError> {
        let classes = find_test_classes(&project.test_classes_dir())?;
        if classes.is_empty() {
            tracing::info!("No test classes found in {}", project.test_classes_dir().display());
            return Ok(TaskResult::ok("No test classes found"));
        }

        tracing::info!("Running tests with classpath size {}", classpath.len());

        let spec = ProcessSpec::new(&self.java)
            .with_args(launcher_args(&self.launcher, classpath, &classes))
            .with_directory(&project.root);
        tracing::debug!("Launching {}", spec.command_line());

        let status = run_inherited(&spec)?;

        if status.success() {
            tracing::info!("All tests passed");
            Ok(TaskResult::ok("All tests passed"))
        } else {
            tracing::info!("Test failures");
            Ok(TaskResult::error("Test failures"))
        }
    }
}
