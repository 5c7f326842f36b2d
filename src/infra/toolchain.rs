//! JVM toolchain lookup
//!
//! Resolves java, javac, javadoc, and kotlinc executables. JAVA_HOME/bin
//! is preferred when set; otherwise the PATH is searched.

use std::env;
use std::path::PathBuf;

use crate::error::ToolchainError;

/// JVM toolchain resolver
///
/// Lookup is fallible by design: every accessor returns a Result that the
/// caller must check before spawning, so a missing JDK surfaces as a
/// [`ToolchainError::ToolNotFound`] instead of a failed exec.
#[derive(Debug, Clone, Default)]
pub struct JvmToolchain {
    /// JAVA_HOME directory, when configured
    java_home: Option<PathBuf>,
}

impl JvmToolchain {
    /// Create a toolchain rooted at an explicit JAVA_HOME
    pub fn new(java_home: Option<PathBuf>) -> Self {
        Self { java_home }
    }

    /// Create a toolchain from the JAVA_HOME environment variable
    pub fn from_env() -> Self {
        Self::new(env::var_os("JAVA_HOME").map(PathBuf::from))
    }

    /// Locate the java runtime executable
    pub fn java(&self) -> Result<PathBuf, ToolchainError> {
        self.find("java")
    }

    /// Locate the javac compiler executable
    pub fn javac(&self) -> Result<PathBuf, ToolchainError> {
        self.find("javac")
    }

    /// Locate the javadoc executable
    pub fn javadoc(&self) -> Result<PathBuf, ToolchainError> {
        self.find("javadoc")
    }

    /// Locate the Kotlin compiler executable
    ///
    /// kotlinc is distributed separately from the JDK, so only the PATH is
    /// searched when JAVA_HOME does not carry it.
    pub fn kotlinc(&self) -> Result<PathBuf, ToolchainError> {
        self.find("kotlinc")
    }

    fn find(&self, tool: &str) -> Result<PathBuf, ToolchainError> {
        let file_name = format!("{tool}{}", env::consts::EXE_SUFFIX);

        if let Some(home) = &self.java_home {
            let candidate = home.join("bin").join(&file_name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        which::which(&file_name).map_err(|_| ToolchainError::ToolNotFound {
            tool: tool.to_string(),
        })
    }
}
