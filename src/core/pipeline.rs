//! Build step sequencing
//!
//! Declares the ordered build steps - compile main sources, compile test
//! sources, run tests - and assembles each step's classpath and source
//! list. A step with a failed prerequisite is skipped and the pipeline
//! reports overall failure; no dependent step starts before its
//! prerequisite's result is known.

use crate::core::compiler::{
    CompilationOrchestrator, CompilationRequest, CompilerAction, TaskResult,
};
use crate::core::dependency::{unique_dependencies, ResolvedDependency};
use crate::core::project::ProjectDescriptor;
use crate::core::sources::{absolutize, find_recursively};
use crate::core::testing::TestRunner;
use crate::error::KilnError;
use crate::infra::filesystem;

/// Name of the main compile step
pub const STEP_COMPILE: &str = "compile";
/// Name of the test compile step, runs after compile
pub const STEP_COMPILE_TEST: &str = "compileTest";
/// Name of the test execution step, runs after compileTest
pub const STEP_TEST: &str = "test";

/// One executed step and its result
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Step name
    pub step: &'static str,
    /// The step's result
    pub result: TaskResult,
}

/// Results of a pipeline run, in execution order
///
/// Skipped steps do not appear; the last entry of a failed run is the
/// step that failed.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// Executed steps
    pub steps: Vec<StepOutcome>,
}

impl PipelineOutcome {
    /// Whether every executed step succeeded
    pub fn success(&self) -> bool {
        self.steps.iter().all(|s| s.result.success)
    }

    /// The step that failed, if any
    pub fn failed_step(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| !s.result.success)
    }
}

/// Ordered build steps for one project
///
/// The compiler action is selected by the caller, so the pipeline stays
/// independent of which compiler technology is in play. Without a test
/// runner attached, the run stops after `compileTest`.
pub struct BuildTaskPipeline<'a> {
    project: &'a ProjectDescriptor,
    orchestrator: CompilationOrchestrator,
    action: Box<dyn CompilerAction>,
    test_runner: Option<TestRunner>,
}

impl<'a> BuildTaskPipeline<'a> {
    /// Create a pipeline around a project and a selected compiler action
    pub fn new(project: &'a ProjectDescriptor, action: Box<dyn CompilerAction>) -> Self {
        Self {
            project,
            orchestrator: CompilationOrchestrator::new(),
            action,
            test_runner: None,
        }
    }

    /// Attach a test runner as the terminal step
    #[must_use]
    pub fn with_test_runner(mut self, runner: TestRunner) -> Self {
        self.test_runner = Some(runner);
        self
    }

    /// Run the declared steps in order, gating each on its prerequisite
    pub fn run(&self) -> Result<PipelineOutcome, KilnError> {
        let mut outcome = PipelineOutcome::default();

        let compile = self.compile()?;
        let compiled = compile.success;
        outcome.steps.push(StepOutcome {
            step: STEP_COMPILE,
            result: compile,
        });
        if !compiled {
            tracing::warn!("{STEP_COMPILE} failed, skipping dependent steps");
            return Ok(outcome);
        }

        let compile_test = self.compile_test()?;
        let tests_compiled = compile_test.success;
        outcome.steps.push(StepOutcome {
            step: STEP_COMPILE_TEST,
            result: compile_test,
        });
        if !tests_compiled {
            tracing::warn!("{STEP_COMPILE_TEST} failed, skipping {STEP_TEST}");
            return Ok(outcome);
        }

        if let Some(runner) = &self.test_runner {
            let classpath = self.test_classpath();
            let test = runner.run_tests(self.project, &classpath)?;
            outcome.steps.push(StepOutcome {
                step: STEP_TEST,
                result: test,
            });
        }

        Ok(outcome)
    }

    /// Compile the main source set
    ///
    /// Copies main resources, assembles the compile classpath (compile +
    /// provided scope), discovers sources by suffix, and dispatches to
    /// the orchestrator.
    pub fn compile(&self) -> Result<TaskResult, KilnError> {
        let project = self.project;
        tracing::info!("{}: {STEP_COMPILE}", project.name);

        self.copy_resources(&project.resource_dirs, &project.classes_dir())?;

        let classpath = unique_dependencies([
            project.compile_deps.as_slice(),
            project.provided_deps.as_slice(),
        ]);
        let request = self.request(&project.source_dirs, classpath, project.classes_dir())?;

        Ok(self.orchestrator.compile(self.action.as_ref(), &request)?)
    }

    /// Compile the test source set
    ///
    /// Analogous to [`Self::compile`] over the test directories and test
    /// dependencies; the main classes directory joins the classpath.
    pub fn compile_test(&self) -> Result<TaskResult, KilnError> {
        let project = self.project;
        tracing::info!("{}: {STEP_COMPILE_TEST}", project.name);

        self.copy_resources(&project.test_resource_dirs, &project.test_classes_dir())?;

        let main_classes = [ResolvedDependency::local(project.classes_dir())];
        let classpath = unique_dependencies([
            main_classes.as_slice(),
            project.compile_deps.as_slice(),
            project.provided_deps.as_slice(),
            project.test_deps.as_slice(),
        ]);
        let request =
            self.request(&project.test_source_dirs, classpath, project.test_classes_dir())?;

        Ok(self.orchestrator.compile(self.action.as_ref(), &request)?)
    }

    /// Classpath for the test execution step
    fn test_classpath(&self) -> Vec<ResolvedDependency> {
        let project = self.project;
        let class_dirs = [
            ResolvedDependency::local(project.test_classes_dir()),
            ResolvedDependency::local(project.classes_dir()),
        ];
        unique_dependencies([
            class_dirs.as_slice(),
            project.compile_deps.as_slice(),
            project.provided_deps.as_slice(),
            project.test_deps.as_slice(),
        ])
    }

    fn request(
        &self,
        source_dirs: &[std::path::PathBuf],
        dependencies: Vec<ResolvedDependency>,
        output_dir: std::path::PathBuf,
    ) -> Result<CompilationRequest, KilnError> {
        let project = self.project;
        let relative = find_recursively(
            &project.root,
            source_dirs,
            project.language.source_suffix(),
        )?;
        Ok(CompilationRequest {
            directory: None,
            dependencies,
            source_files: absolutize(&project.root, &relative),
            output_dir,
            compiler_args: project.compiler_args.clone(),
        })
    }

    fn copy_resources(
        &self,
        resource_dirs: &[std::path::PathBuf],
        dest: &std::path::Path,
    ) -> Result<(), KilnError> {
        for dir in resource_dirs {
            filesystem::copy_tree(&self.project.root.join(dir), dest)?;
        }
        Ok(())
    }
}
