//! Doc command implementation
//!
//! Implements `kiln doc`: runs javadoc over the main source set into the
//! build's doc directory.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::compiler::{CompilationOrchestrator, CompilationRequest, JavadocAction};
use crate::core::dependency::unique_dependencies;
use crate::core::project::{ProjectDescriptor, ProjectManifest};
use crate::core::sources::{absolutize, find_recursively};
use crate::infra::toolchain::JvmToolchain;

/// Execute the doc command
pub fn execute(project_dir: &Path) -> Result<()> {
    let manifest = ProjectManifest::load(project_dir)?;
    let project = ProjectDescriptor::from_manifest(project_dir, &manifest);

    let toolchain = JvmToolchain::from_env();
    let action = JavadocAction::new(toolchain.javadoc()?);

    let relative = find_recursively(
        &project.root,
        &project.source_dirs,
        project.language.source_suffix(),
    )?;
    let request = CompilationRequest {
        directory: None,
        dependencies: unique_dependencies([
            project.compile_deps.as_slice(),
            project.provided_deps.as_slice(),
        ]),
        source_files: absolutize(&project.root, &relative),
        output_dir: project.doc_dir(),
        compiler_args: Vec::new(),
    };

    let result = CompilationOrchestrator::new().compile(&action, &request)?;

    if result.success {
        print_success("Documentation generated");
        print_detail(&format!("Output: {}", project.doc_dir().display()));
        Ok(())
    } else {
        bail!("{}", result.message)
    }
}
