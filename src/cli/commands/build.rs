//! Build command implementation
//!
//! Implements `kiln build`: the full pipeline of compiling main sources,
//! compiling test sources, and running tests, stopping at the first
//! failed step.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::compiler::{CompilerAction, JavacAction, KotlincAction};
use crate::core::pipeline::BuildTaskPipeline;
use crate::core::project::{Language, ProjectDescriptor, ProjectManifest};
use crate::core::testing::TestRunner;
use crate::error::ToolchainError;
use crate::infra::toolchain::JvmToolchain;

/// Build options
pub struct BuildOptions {
    /// Stop after compiling tests instead of running them
    pub skip_tests: bool,
}

/// Select the compiler action for a project's language
///
/// The lookup is checked here, before any step runs, so a missing
/// compiler aborts the build with a clear error instead of a failed
/// spawn halfway through.
pub fn select_action(
    toolchain: &JvmToolchain,
    language: Language,
) -> Result<Box<dyn CompilerAction>, ToolchainError> {
    match language {
        Language::Java => Ok(Box::new(JavacAction::new(toolchain.javac()?))),
        Language::Kotlin => Ok(Box::new(KotlincAction::new(toolchain.kotlinc()?))),
    }
}

/// Execute the build command
pub fn execute(project_dir: &Path, options: BuildOptions) -> Result<()> {
    let manifest = ProjectManifest::load(project_dir)?;
    let project = ProjectDescriptor::from_manifest(project_dir, &manifest);

    tracing::info!("Building project: {}", project.name);

    let toolchain = JvmToolchain::from_env();
    let action = select_action(&toolchain, project.language)?;

    let mut pipeline = BuildTaskPipeline::new(&project, action);
    if !options.skip_tests {
        let runner = TestRunner::new(toolchain.java()?, project.test_launcher.clone());
        pipeline = pipeline.with_test_runner(runner);
    }

    let outcome = pipeline.run()?;

    for step in &outcome.steps {
        print_detail(&format!("{}: {}", step.step, step.result.message));
    }

    match outcome.failed_step() {
        None => {
            print_success("Build complete!");
            Ok(())
        }
        Some(failed) => bail!("Build failed at {}: {}", failed.step, failed.result.message),
    }
}
