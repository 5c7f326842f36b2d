//! Project manifest (kiln.toml) parsing and the project descriptor
//!
//! The manifest declares the project layout, the compiled language, and
//! the dependency jar paths. Resolving coordinates to jars is someone
//! else's job; entries here are paths to artifacts already on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::dependency::ResolvedDependency;
use crate::core::testing::LauncherConfig;
use crate::error::{FilesystemError, KilnError};

/// Manifest file name
pub const MANIFEST_FILE: &str = "kiln.toml";

/// Compiled language of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Java sources, compiled with javac
    #[default]
    Java,
    /// Kotlin sources, compiled with kotlinc
    Kotlin,
}

impl Language {
    /// File-name suffix of this language's source files
    pub fn source_suffix(self) -> &'static str {
        match self {
            Self::Java => ".java",
            Self::Kotlin => ".kt",
        }
    }

    /// Conventional main source directories
    pub fn default_source_dirs(self) -> Vec<String> {
        match self {
            Self::Java => vec!["src/main/java".to_string()],
            Self::Kotlin => vec!["src/main/kotlin".to_string()],
        }
    }

    /// Conventional test source directories
    pub fn default_test_source_dirs(self) -> Vec<String> {
        match self {
            Self::Java => vec!["src/test/java".to_string()],
            Self::Kotlin => vec!["src/test/kotlin".to_string()],
        }
    }
}

/// The main project manifest (kiln.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectManifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// Directory layout
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Compiler configuration
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Dependency jar paths by scope
    #[serde(default)]
    pub dependencies: DependencyConfig,

    /// Test launcher configuration
    #[serde(default)]
    pub test: TestLauncherConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Directory layout configuration
///
/// Source directory lists default to the conventional layout of the
/// configured language when left empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Build output directory, relative to the project root
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Main source directories
    #[serde(default)]
    pub source_dirs: Vec<String>,

    /// Test source directories
    #[serde(default)]
    pub test_source_dirs: Vec<String>,

    /// Main resource directories
    #[serde(default = "default_resource_dirs")]
    pub resource_dirs: Vec<String>,

    /// Test resource directories
    #[serde(default = "default_test_resource_dirs")]
    pub test_resource_dirs: Vec<String>,
}

fn default_build_dir() -> String {
    defaults::DEFAULT_BUILD_DIR.to_string()
}

fn default_resource_dirs() -> Vec<String> {
    vec!["src/main/resources".to_string()]
}

fn default_test_resource_dirs() -> Vec<String> {
    vec!["src/test/resources".to_string()]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            source_dirs: Vec::new(),
            test_source_dirs: Vec::new(),
            resource_dirs: default_resource_dirs(),
            test_resource_dirs: default_test_resource_dirs(),
        }
    }
}

/// Compiler configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompilerConfig {
    /// Compiled language
    #[serde(default)]
    pub language: Language,

    /// Extra compiler arguments, passed through verbatim
    #[serde(default)]
    pub args: Vec<String>,
}

/// Dependency jar paths by scope
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DependencyConfig {
    /// Compile-scope jars
    #[serde(default)]
    pub compile: Vec<String>,

    /// Provided-scope jars (on the compile classpath, not packaged)
    #[serde(default)]
    pub provided: Vec<String>,

    /// Test-scope jars
    #[serde(default)]
    pub test: Vec<String>,
}

/// Test launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestLauncherConfig {
    /// Launcher main class
    #[serde(default = "default_test_main_class")]
    pub main_class: String,

    /// Launcher arguments, placed before the discovered class names
    #[serde(default = "default_test_launcher_args")]
    pub args: Vec<String>,
}

fn default_test_main_class() -> String {
    defaults::DEFAULT_TEST_MAIN_CLASS.to_string()
}

fn default_test_launcher_args() -> Vec<String> {
    defaults::DEFAULT_TEST_LAUNCHER_ARGS
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for TestLauncherConfig {
    fn default() -> Self {
        Self {
            main_class: default_test_main_class(),
            args: default_test_launcher_args(),
        }
    }
}

impl ProjectManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self, KilnError> {
        toml::from_str(content).map_err(|source| KilnError::ManifestParse { source })
    }

    /// Serialize the manifest to TOML text
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, KilnError> {
        let path = project_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(KilnError::ManifestNotFound {
                path: project_dir.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| FilesystemError::ReadFile {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }
}

/// Immutable view of one project for the duration of a build step
///
/// Owned by the caller; the compilation layer never mutates it.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Project name
    pub name: String,
    /// Project version
    pub version: String,
    /// Absolute project root
    pub root: PathBuf,
    /// Absolute build output directory
    pub build_dir: PathBuf,
    /// Main source directories, relative to the root
    pub source_dirs: Vec<PathBuf>,
    /// Test source directories, relative to the root
    pub test_source_dirs: Vec<PathBuf>,
    /// Main resource directories, relative to the root
    pub resource_dirs: Vec<PathBuf>,
    /// Test resource directories, relative to the root
    pub test_resource_dirs: Vec<PathBuf>,
    /// Compiled language
    pub language: Language,
    /// Extra compiler arguments
    pub compiler_args: Vec<String>,
    /// Compile-scope dependencies
    pub compile_deps: Vec<ResolvedDependency>,
    /// Provided-scope dependencies
    pub provided_deps: Vec<ResolvedDependency>,
    /// Test-scope dependencies
    pub test_deps: Vec<ResolvedDependency>,
    /// Test launcher capability
    pub test_launcher: LauncherConfig,
}

impl ProjectDescriptor {
    /// Build a descriptor from a parsed manifest
    pub fn from_manifest(root: &Path, manifest: &ProjectManifest) -> Self {
        let language = manifest.compiler.language;

        let source_dirs = dirs_or(&manifest.layout.source_dirs, language.default_source_dirs());
        let test_source_dirs = dirs_or(
            &manifest.layout.test_source_dirs,
            language.default_test_source_dirs(),
        );

        Self {
            name: manifest.project.name.clone(),
            version: manifest.project.version.clone(),
            root: root.to_path_buf(),
            build_dir: root.join(&manifest.layout.build_dir),
            source_dirs,
            test_source_dirs,
            resource_dirs: manifest.layout.resource_dirs.iter().map(PathBuf::from).collect(),
            test_resource_dirs: manifest
                .layout
                .test_resource_dirs
                .iter()
                .map(PathBuf::from)
                .collect(),
            language,
            compiler_args: manifest.compiler.args.clone(),
            compile_deps: resolve_jars(root, &manifest.dependencies.compile),
            provided_deps: resolve_jars(root, &manifest.dependencies.provided),
            test_deps: resolve_jars(root, &manifest.dependencies.test),
            test_launcher: LauncherConfig {
                main_class: manifest.test.main_class.clone(),
                args: manifest.test.args.clone(),
            },
        }
    }

    /// Output directory for compiled main classes
    pub fn classes_dir(&self) -> PathBuf {
        self.build_dir.join(defaults::CLASSES_DIR)
    }

    /// Output directory for compiled test classes
    pub fn test_classes_dir(&self) -> PathBuf {
        self.build_dir.join(defaults::TEST_CLASSES_DIR)
    }

    /// Output directory for generated documentation
    pub fn doc_dir(&self) -> PathBuf {
        self.build_dir.join(defaults::DOC_DIR)
    }
}

fn dirs_or(configured: &[String], fallback: Vec<String>) -> Vec<PathBuf> {
    let dirs = if configured.is_empty() {
        fallback
    } else {
        configured.to_vec()
    };
    dirs.into_iter().map(PathBuf::from).collect()
}

fn resolve_jars(root: &Path, entries: &[String]) -> Vec<ResolvedDependency> {
    entries
        .iter()
        .map(|entry| {
            let path = Path::new(entry);
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            ResolvedDependency::new(entry.clone(), absolute)
        })
        .collect()
}
