//! Default configuration values

/// Default build output directory, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Subdirectory of the build directory for main classes
pub const CLASSES_DIR: &str = "classes";

/// Subdirectory of the build directory for test classes
pub const TEST_CLASSES_DIR: &str = "test-classes";

/// Subdirectory of the build directory for generated documentation
pub const DOC_DIR: &str = "doc";

/// Bounded wait for captured command runs (seconds)
pub const COMMAND_TIMEOUT_SECS: u64 = 30;

/// Suffix a compiled test class file must carry to be picked up
pub const TEST_CLASS_SUFFIX: &str = "Test";

/// Extension of compiled JVM class files
pub const CLASS_FILE_EXTENSION: &str = ".class";

/// Default test launcher main class
pub const DEFAULT_TEST_MAIN_CLASS: &str = "org.testng.TestNG";

/// Default arguments passed to the test launcher before the class names
pub const DEFAULT_TEST_LAUNCHER_ARGS: &[&str] = &["-testclass"];

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
