//! CLI implementation for `kiln clean`
//!
//! Removes the project's build output directory.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::print_success;
use crate::core::clean::{clean_project, has_build_artifacts};
use crate::core::project::{ProjectDescriptor, ProjectManifest};

/// Execute the clean command
pub fn execute(project_dir: &Path) -> Result<()> {
    let manifest = ProjectManifest::load(project_dir)?;
    let project = ProjectDescriptor::from_manifest(project_dir, &manifest);

    if !has_build_artifacts(&project) {
        print_success("Nothing to clean");
        return Ok(());
    }

    let result = clean_project(&project).with_context(|| "Failed to clean build artifacts")?;

    if result.removed.is_empty() {
        print_success("Nothing to clean");
    } else {
        print_success("Cleaned build artifacts:");
        for dir in &result.removed {
            println!("  Removed {}", dir.display());
        }
    }

    Ok(())
}
