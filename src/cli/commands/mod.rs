//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod compile;
pub mod doc;
pub mod doctor;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile sources, compile tests, and run tests
    Build {
        /// Compile tests but don't run them
        #[arg(long)]
        skip_tests: bool,
    },

    /// Compile main sources only
    Compile,

    /// Generate javadoc for the main sources
    Doc,

    /// Remove build artifacts
    Clean,

    /// Check JVM toolchain availability
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Build { skip_tests } => {
                let current_dir = std::env::current_dir()?;
                let options = build::BuildOptions { skip_tests };
                build::execute(&current_dir, options)
            }
            Self::Compile => {
                let current_dir = std::env::current_dir()?;
                compile::execute(&current_dir)
            }
            Self::Doc => {
                let current_dir = std::env::current_dir()?;
                doc::execute(&current_dir)
            }
            Self::Clean => {
                let current_dir = std::env::current_dir()?;
                clean::execute(&current_dir)
            }
            Self::Doctor => doctor::execute(),
        }
    }
}
