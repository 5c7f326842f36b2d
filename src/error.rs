//! Error types for kiln
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Toolchain lookup errors
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Executable not found in JAVA_HOME or PATH
    #[error("'{tool}' not found in JAVA_HOME or PATH. Install a JDK or set JAVA_HOME")]
    ToolNotFound { tool: String },
}

/// External process errors
///
/// These indicate a misconfigured environment (missing executable,
/// permissions), not an ordinary compile or test failure. Ordinary
/// failures travel as [`crate::core::compiler::TaskResult`] values.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The executable could not be launched
    #[error("Failed to launch '{command}': {error}")]
    SpawnFailed { command: String, error: String },

    /// Waiting on the child process failed
    #[error("Failed to wait for '{command}': {error}")]
    WaitFailed { command: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to walk a directory tree
    #[error("Failed to scan directory '{path}': {error}")]
    Walk { path: PathBuf, error: String },
}

/// Top-level kiln error type
#[derive(Error, Debug)]
pub enum KilnError {
    /// Manifest not found
    #[error("No kiln.toml found at '{path}'")]
    ManifestNotFound { path: String },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    ManifestParse { source: toml::de::Error },

    /// Toolchain error
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),

    /// Process error
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
