//! Source file discovery
//!
//! Recursively scans declared source directories for files matching a
//! suffix filter. Paths come back relative to the project root so callers
//! can log them compactly and absolutize them for the compiler invocation.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Find files under `directories` (relative to `root`) whose name ends
/// with `suffix`
///
/// Missing directories are skipped. Results are project-relative and
/// sorted for deterministic compiler invocations.
pub fn find_recursively(
    root: &Path,
    directories: &[PathBuf],
    suffix: &str,
) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut result = Vec::new();

    for directory in directories {
        let base = root.join(directory);
        if !base.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| FilesystemError::Walk {
                path: base.clone(),
                error: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix));
            if matches {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or_else(|_| entry.path());
                result.push(relative.to_path_buf());
            }
        }
    }

    Ok(result)
}

/// Resolve project-relative paths against the project root
pub fn absolutize(root: &Path, relative: &[PathBuf]) -> Vec<PathBuf> {
    relative.iter().map(|p| root.join(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_finds_only_matching_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main/java/com/foo/App.java");
        touch(dir.path(), "src/main/java/com/foo/notes.txt");
        touch(dir.path(), "src/main/java/com/foo/bar/Deep.java");

        let found = find_recursively(
            dir.path(),
            &[PathBuf::from("src/main/java")],
            ".java",
        )
        .unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("src/main/java/com/foo/App.java"),
                PathBuf::from("src/main/java/com/foo/bar/Deep.java"),
            ]
        );
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();

        let found =
            find_recursively(dir.path(), &[PathBuf::from("src/main/kotlin")], ".kt").unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn test_results_are_project_relative() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/test/java/FooTest.java");

        let found =
            find_recursively(dir.path(), &[PathBuf::from("src/test/java")], ".java").unwrap();

        assert_eq!(found, vec![PathBuf::from("src/test/java/FooTest.java")]);

        let absolute = absolutize(dir.path(), &found);
        assert_eq!(absolute, vec![dir.path().join("src/test/java/FooTest.java")]);
    }

    #[test]
    fn test_multiple_source_directories_are_combined() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main/java/A.java");
        touch(dir.path(), "generated/java/B.java");

        let found = find_recursively(
            dir.path(),
            &[PathBuf::from("src/main/java"), PathBuf::from("generated/java")],
            ".java",
        )
        .unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("src/main/java/A.java"),
                PathBuf::from("generated/java/B.java"),
            ]
        );
    }
}
