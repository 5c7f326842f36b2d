//! Resolved dependencies and classpath assembly
//!
//! A resolved dependency pairs a logical coordinate with the absolute path
//! of its artifact on disk. Resolution itself (registry lookup, download)
//! happens outside this crate; the build core only reads the paths.

use std::path::{Path, PathBuf};

/// Platform path-list separator used to join classpath entries
#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: &str = ";";
/// Platform path-list separator used to join classpath entries
#[cfg(not(windows))]
pub const CLASSPATH_SEPARATOR: &str = ":";

/// A dependency whose artifact has been materialized on disk
///
/// Owned by the pipeline; the compilation layer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Logical coordinate (e.g. `org.testng:testng:7.10.2`, or a path for
    /// local entries)
    coordinate: String,
    /// Absolute path to the artifact file or class directory
    artifact: PathBuf,
}

impl ResolvedDependency {
    /// Create a dependency from a coordinate and its artifact path
    pub fn new(coordinate: impl Into<String>, artifact: impl Into<PathBuf>) -> Self {
        Self {
            coordinate: coordinate.into(),
            artifact: artifact.into(),
        }
    }

    /// Create a dependency for a local file or directory
    ///
    /// The path doubles as the coordinate. Used for project class
    /// directories on the test classpath.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            coordinate: path.display().to_string(),
            artifact: path,
        }
    }

    /// The logical coordinate
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    /// Absolute path to the artifact
    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }
}

/// Join dependency artifact paths into a classpath string
///
/// Entries appear in input order, separated by the platform path-list
/// separator.
pub fn join_classpath(dependencies: &[ResolvedDependency]) -> String {
    dependencies
        .iter()
        .map(|d| d.artifact_path().display().to_string())
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEPARATOR)
}

/// Concatenate dependency lists, dropping repeated artifacts
///
/// First occurrence wins, so the classpath order follows declaration
/// order.
pub fn unique_dependencies<'a, I>(lists: I) -> Vec<ResolvedDependency>
where
    I: IntoIterator<Item = &'a [ResolvedDependency]>,
{
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for list in lists {
        for dependency in list {
            if seen.insert(dependency.artifact_path().to_path_buf()) {
                result.push(dependency.clone());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use proptest::prelude::*;

    #[test]
    fn test_join_preserves_input_order() {
        let deps = vec![
            ResolvedDependency::new("a", "/libs/A.jar"),
            ResolvedDependency::new("b", "/libs/B.jar"),
        ];

        assert_eq!(
            join_classpath(&deps),
            format!("/libs/A.jar{CLASSPATH_SEPARATOR}/libs/B.jar")
        );
    }

    #[test]
    fn test_join_of_empty_list_is_empty() {
        assert_eq!(join_classpath(&[]), "");
    }

    #[test]
    fn test_unique_dependencies_keeps_first_occurrence() {
        let compile = vec![
            ResolvedDependency::new("a", "/libs/A.jar"),
            ResolvedDependency::new("b", "/libs/B.jar"),
        ];
        let test = vec![
            ResolvedDependency::new("a-again", "/libs/A.jar"),
            ResolvedDependency::new("c", "/libs/C.jar"),
        ];

        let merged = unique_dependencies([compile.as_slice(), test.as_slice()]);

        let coordinates: Vec<_> = merged.iter().map(ResolvedDependency::coordinate).collect();
        assert_eq!(coordinates, vec!["a", "b", "c"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        /// Joining never reorders entries, whatever the input.
        #[test]
        fn prop_join_order_matches_input(names in proptest::collection::vec("[a-z]{1,8}", 1..8)) {
            let deps: Vec<_> = names
                .iter()
                .map(|n| ResolvedDependency::new(n.clone(), format!("/libs/{n}.jar")))
                .collect();

            let joined = join_classpath(&deps);
            let entries: Vec<_> = joined.split(CLASSPATH_SEPARATOR).collect();

            let expected: Vec<_> = names.iter().map(|n| format!("/libs/{n}.jar")).collect();
            prop_assert_eq!(entries, expected);
        }

        /// Deduplication is idempotent and never invents entries.
        #[test]
        fn prop_unique_is_idempotent(names in proptest::collection::vec("[a-z]{1,8}", 0..8)) {
            let deps: Vec<_> = names
                .iter()
                .map(|n| ResolvedDependency::new(n.clone(), format!("/libs/{n}.jar")))
                .collect();

            let once = unique_dependencies([deps.as_slice()]);
            let twice = unique_dependencies([once.as_slice()]);

            prop_assert_eq!(&once, &twice);
            prop_assert!(once.len() <= deps.len());
        }
    }
}
