//! Clean logic
//!
//! Removes the project's build output directory tree.

use std::path::PathBuf;

use crate::core::project::ProjectDescriptor;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Remove the build directory of a project
pub fn clean_project(project: &ProjectDescriptor) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();
    let build_dir = project.build_dir.clone();

    if build_dir.exists() {
        filesystem::remove_dir_all(&build_dir)?;
        result.removed.push(build_dir);
    } else {
        result.skipped.push(build_dir);
    }

    Ok(result)
}

/// Check whether a project has build artifacts to remove
pub fn has_build_artifacts(project: &ProjectDescriptor) -> bool {
    project.build_dir.exists()
}
