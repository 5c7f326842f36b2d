//! External process execution
//!
//! Two spawning disciplines live here. [`CommandRunner`] buffers stdout and
//! stderr and enforces a bounded wait, delivering captured output to
//! callbacks after completion. [`run_inherited`] passes stdio through to
//! the invoking terminal and waits without a bound - the discipline used
//! for compiler and test-launcher processes whose output the user should
//! see live.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::defaults::COMMAND_TIMEOUT_SECS;
use crate::error::ProcessError;

/// Specification for one external process invocation
///
/// Constructed fresh per invocation and never reused across processes.
/// The environment overlay is applied on top of the inherited environment;
/// the overlay wins on key collision.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    /// Executable path
    pub program: PathBuf,
    /// Ordered argument vector
    pub args: Vec<String>,
    /// Working directory (inherited from the invoker when None)
    pub directory: Option<PathBuf>,
    /// Environment overlay
    pub env: HashMap<String, String>,
}

impl ProcessSpec {
    /// Create a spec for the given executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            directory: None,
            env: HashMap::new(),
        }
    }

    /// Append arguments
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Add an environment overlay entry
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Full command line for logging
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Spawn a process with inherited stdio and wait without a bound
pub fn run_inherited(spec: &ProcessSpec) -> Result<ExitStatus, ProcessError> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .envs(&spec.env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(directory) = &spec.directory {
        command.current_dir(directory);
    }

    tracing::debug!("Launching {}", spec.command_line());

    let mut child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
        command: spec.program.display().to_string(),
        error: e.to_string(),
    })?;

    child.wait().map_err(|e| ProcessError::WaitFailed {
        command: spec.program.display().to_string(),
        error: e.to_string(),
    })
}

/// Bounded-wait external command executor with captured output
///
/// Waits up to the configured bound (30 seconds by default). Within the
/// bound, the exit code decides success: `on_success` receives the
/// captured stdout lines, `on_error` receives `"<command> failed"`
/// followed by the captured stderr lines. Past the bound the run counts
/// as failed, but the child is not confirmed killed - callers must not
/// assume the process has terminated.
#[derive(Debug)]
pub struct CommandRunner {
    command: PathBuf,
    directory: PathBuf,
    env: HashMap<String, String>,
    timeout: Duration,
}

impl CommandRunner {
    /// Create a runner for the given command
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            directory: PathBuf::from("."),
            env: HashMap::new(),
            timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
        }
    }

    /// Set the working directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Add an environment overlay entry
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Override the wait bound
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the command and report the outcome through the callbacks
    ///
    /// Returns 0 on success and 1 on any failure, including timeout. A
    /// process that could not be launched at all is a [`ProcessError`],
    /// not a failed run.
    pub fn run(
        &self,
        args: &[String],
        on_success: impl FnOnce(Vec<String>),
        on_error: impl FnOnce(Vec<String>),
    ) -> Result<i32, ProcessError> {
        tracing::debug!(
            "Running command: {} {}\n      Current directory: {}",
            self.command.display(),
            args.join(" "),
            self.directory.display()
        );

        let mut child = Command::new(&self.command)
            .args(args)
            .current_dir(&self.directory)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                command: self.command.display().to_string(),
                error: e.to_string(),
            })?;

        // Drain both pipes off-thread so a chatty child cannot fill the
        // pipe buffer and stall before the wait loop sees it exit.
        let stdout = capture_lines(child.stdout.take());
        let stderr = capture_lines(child.stderr.take());

        let status = self.wait_with_deadline(&mut child)?;

        match status {
            Some(status) if status.success() => {
                on_success(collect_lines(stdout));
                Ok(0)
            }
            completed => {
                let mut lines = vec![format!("{} failed", self.command.display())];
                if completed.is_some() {
                    lines.extend(collect_lines(stderr));
                }
                on_error(lines);
                Ok(1)
            }
        }
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<Option<ExitStatus>, ProcessError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        // The child keeps running past the bound; only the
                        // wait gives up.
                        return Ok(None);
                    }
                    thread::sleep(Duration::from_millis(25));
                }
                Err(e) => {
                    return Err(ProcessError::WaitFailed {
                        command: self.command.display().to_string(),
                        error: e.to_string(),
                    })
                }
            }
        }
    }
}

fn capture_lines<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<Vec<String>>> {
    stream.map(|stream| {
        thread::spawn(move || {
            BufReader::new(stream)
                .lines()
                .map_while(Result::ok)
                .collect()
        })
    })
}

fn collect_lines(handle: Option<JoinHandle<Vec<String>>>) -> Vec<String> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn shell() -> CommandRunner {
        CommandRunner::new("/bin/sh")
    }

    #[cfg(unix)]
    fn sh_args(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    #[cfg(unix)]
    fn test_success_delivers_stdout_lines() {
        let mut captured = Vec::new();
        let status = shell()
            .run(
                &sh_args("echo one; echo two"),
                |lines| captured = lines,
                |_| panic!("error callback must not fire"),
            )
            .unwrap();

        assert_eq!(status, 0);
        assert_eq!(captured, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    #[cfg(unix)]
    fn test_nonzero_exit_delivers_failed_line_and_stderr() {
        let mut captured = Vec::new();
        let status = shell()
            .run(
                &sh_args("echo oops >&2; exit 3"),
                |_| panic!("success callback must not fire"),
                |lines| captured = lines,
            )
            .unwrap();

        assert_eq!(status, 1);
        assert_eq!(captured[0], "/bin/sh failed");
        assert_eq!(captured[1], "oops");
    }

    #[test]
    #[cfg(unix)]
    fn test_timeout_counts_as_failure() {
        let mut captured = Vec::new();
        let status = shell()
            .with_timeout(Duration::from_millis(100))
            .run(
                &sh_args("sleep 5"),
                |_| panic!("success callback must not fire"),
                |lines| captured = lines,
            )
            .unwrap();

        assert_eq!(status, 1);
        assert_eq!(captured[0], "/bin/sh failed");
    }

    #[test]
    #[cfg(unix)]
    fn test_env_overlay_is_visible_to_child() {
        let mut captured = Vec::new();
        shell()
            .with_env("KILN_PROBE", "overlay-wins")
            .run(
                &sh_args("echo $KILN_PROBE"),
                |lines| captured = lines,
                |_| panic!("error callback must not fire"),
            )
            .unwrap();

        assert_eq!(captured, vec!["overlay-wins".to_string()]);
    }

    #[test]
    fn test_spawn_failure_is_a_process_error() {
        let result = CommandRunner::new("/no/such/executable").run(
            &[],
            |_| panic!("success callback must not fire"),
            |_| panic!("error callback must not fire"),
        );

        assert!(matches!(result, Err(ProcessError::SpawnFailed { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_run_inherited_reports_exit_status() {
        let ok = ProcessSpec::new("/bin/sh").with_args(["-c", "exit 0"]);
        let failed = ProcessSpec::new("/bin/sh").with_args(["-c", "exit 1"]);

        assert!(run_inherited(&ok).unwrap().success());
        assert!(!run_inherited(&failed).unwrap().success());
    }

    #[test]
    fn test_command_line_joins_program_and_args() {
        let spec = ProcessSpec::new("javac").with_args(["-d", "build/classes"]);
        assert_eq!(spec.command_line(), "javac -d build/classes");
    }
}
