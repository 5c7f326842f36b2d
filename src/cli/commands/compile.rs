//! Compile command implementation
//!
//! Implements `kiln compile`: only the main-source compile step, without
//! test compilation or execution.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::commands::build::select_action;
use crate::cli::output::print_success;
use crate::core::pipeline::BuildTaskPipeline;
use crate::core::project::{ProjectDescriptor, ProjectManifest};
use crate::infra::toolchain::JvmToolchain;

/// Execute the compile command
pub fn execute(project_dir: &Path) -> Result<()> {
    let manifest = ProjectManifest::load(project_dir)?;
    let project = ProjectDescriptor::from_manifest(project_dir, &manifest);

    let toolchain = JvmToolchain::from_env();
    let action = select_action(&toolchain, project.language)?;

    let result = BuildTaskPipeline::new(&project, action).compile()?;

    if result.success {
        print_success(&result.message);
        Ok(())
    } else {
        bail!("{}", result.message)
    }
}
