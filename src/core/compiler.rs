//! Compiler invocation
//!
//! One [`CompilerAction`] knows how to invoke exactly one compiler
//! executable behind a uniform request/result contract. The
//! [`CompilationOrchestrator`] prepares the output directory and delegates
//! to whichever action the caller selected, so adding a JVM language means
//! adding an action, not touching the pipeline.

use std::path::{Path, PathBuf};

use crate::core::dependency::{join_classpath, ResolvedDependency};
use crate::error::{KilnError, ProcessError};
use crate::infra::filesystem;
use crate::infra::process::{run_inherited, ProcessSpec};

/// Success flag plus a human-readable message for one build step
///
/// Immutable and terminal: produced once, passed upward, never mutated.
/// This is the sole channel by which compile and test failures propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Whether the step succeeded
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
}

impl TaskResult {
    /// A successful result
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Everything a compiler action needs for one invocation
///
/// Created per build step and discarded once its [`TaskResult`] exists.
/// Dependencies are referenced, not owned; their order fixes the
/// classpath string order.
#[derive(Debug, Clone)]
pub struct CompilationRequest {
    /// Working directory for the compiler process, when it matters
    pub directory: Option<PathBuf>,
    /// Resolved dependencies, unique, in classpath order
    pub dependencies: Vec<ResolvedDependency>,
    /// Absolute source file paths, in invocation order
    pub source_files: Vec<PathBuf>,
    /// Output directory for compiled artifacts
    pub output_dir: PathBuf,
    /// Raw extra compiler arguments
    pub compiler_args: Vec<String>,
}

/// Build the full argument vector for a compile invocation
///
/// Shape: `[executable, -d, outputDir, (-classpath, joined)?, ...extra,
/// ...sources]`. The classpath flag pair is omitted entirely when the
/// dependency list is empty.
pub fn command_line(executable: &Path, request: &CompilationRequest) -> Vec<String> {
    let mut args = vec![
        executable.display().to_string(),
        "-d".to_string(),
        request.output_dir.display().to_string(),
    ];
    if !request.dependencies.is_empty() {
        args.push("-classpath".to_string());
        args.push(join_classpath(&request.dependencies));
    }
    args.extend(request.compiler_args.iter().cloned());
    args.extend(request.source_files.iter().map(|p| p.display().to_string()));
    args
}

/// A unit of work that invokes one specific compiler
pub trait CompilerAction {
    /// Short name for logging ("javac", "javadoc", "kotlinc")
    fn name(&self) -> &'static str;

    /// Run the compiler over the request
    ///
    /// Compile errors come back as a failed [`TaskResult`]; only a process
    /// that could not be launched is an `Err`.
    fn compile(&self, request: &CompilationRequest) -> Result<TaskResult, ProcessError>;
}

/// Spawn the compiler with live stdio and map its exit code
///
/// The argument-vector shape and the exit-code contract are shared by
/// every action variant.
fn run_compiler(
    name: &str,
    executable: &Path,
    request: &CompilationRequest,
) -> Result<TaskResult, ProcessError> {
    let args = command_line(executable, request);

    tracing::info!(
        "  Compiling {} files with classpath size {}",
        request.source_files.len(),
        request.dependencies.len()
    );
    tracing::debug!("  {} invocation: {}", name, args.join(" "));

    let mut spec = ProcessSpec::new(executable).with_args(args.into_iter().skip(1));
    if let Some(directory) = &request.directory {
        spec = spec.with_directory(directory);
    }

    let status = run_inherited(&spec)?;

    if status.success() {
        Ok(TaskResult::ok("Compilation succeeded"))
    } else {
        Ok(TaskResult::error("There were errors"))
    }
}

/// Java source compilation via javac
#[derive(Debug)]
pub struct JavacAction {
    executable: PathBuf,
}

impl JavacAction {
    /// Create an action around a resolved javac executable
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }
}

impl CompilerAction for JavacAction {
    fn name(&self) -> &'static str {
        "javac"
    }

    fn compile(&self, request: &CompilationRequest) -> Result<TaskResult, ProcessError> {
        run_compiler(self.name(), &self.executable, request)
    }
}

/// Javadoc generation
///
/// javadoc takes the same `-d`/`-classpath` surface as javac, writing
/// HTML instead of class files.
#[derive(Debug)]
pub struct JavadocAction {
    executable: PathBuf,
}

impl JavadocAction {
    /// Create an action around a resolved javadoc executable
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }
}

impl CompilerAction for JavadocAction {
    fn name(&self) -> &'static str {
        "javadoc"
    }

    fn compile(&self, request: &CompilationRequest) -> Result<TaskResult, ProcessError> {
        run_compiler(self.name(), &self.executable, request)
    }
}

/// Kotlin source compilation via kotlinc
#[derive(Debug)]
pub struct KotlincAction {
    executable: PathBuf,
}

impl KotlincAction {
    /// Create an action around a resolved kotlinc executable
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }
}

impl CompilerAction for KotlincAction {
    fn name(&self) -> &'static str {
        "kotlinc"
    }

    fn compile(&self, request: &CompilationRequest) -> Result<TaskResult, ProcessError> {
        run_compiler(self.name(), &self.executable, request)
    }
}

/// Owns the request-to-result contract independent of compiler technology
#[derive(Debug, Default)]
pub struct CompilationOrchestrator;

impl CompilationOrchestrator {
    /// Create an orchestrator
    pub fn new() -> Self {
        Self
    }

    /// Prepare the output directory and dispatch to the selected action
    ///
    /// An empty source list is a legal no-op compile, not an error; the
    /// output directory still gets created.
    pub fn compile(
        &self,
        action: &dyn CompilerAction,
        request: &CompilationRequest,
    ) -> Result<TaskResult, KilnError> {
        filesystem::create_dir_all(&request.output_dir)?;

        if request.source_files.is_empty() {
            tracing::info!("  No source files for {}, skipping", action.name());
            return Ok(TaskResult::ok("No source files to compile"));
        }

        Ok(action.compile(request)?)
    }
}
