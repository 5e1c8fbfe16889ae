//! Backend abstraction for conda operations.
//!
//! The [`Backend`] trait defines the interface for interacting with conda,
//! allowing for different implementations (real CLI, mock for testing).

pub mod conda;

use crate::error::Result;
use crate::types::{CondaConfig, PackageRecord};

/// Backend trait for conda operations.
///
/// This trait abstracts the underlying conda implementation, enabling:
/// - Real CLI execution via the `conda` command
/// - Mock implementations for testing
pub trait Backend: Send + Sync {
    /// Check if conda is available.
    fn is_available(&self) -> bool;

    /// Environments known to conda, in directory-listing order.
    fn list_environments(&self) -> Result<Vec<String>>;

    /// Installed packages in one scope (`None` = the global/default scope).
    ///
    /// Records from a named environment carry that environment.
    fn list_installed(&self, environment: Option<&str>) -> Result<Vec<PackageRecord>>;

    /// Candidate versions for a package, already filtered to the configured
    /// interpreter build tag.
    fn search_versions(
        &self,
        package: &str,
        environment: Option<&str>,
        channel: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Install a rendered package spec (`pkg` or `pkg==version`).
    fn install(&self, spec: &str, environment: Option<&str>, channel: Option<&str>) -> Result<()>;

    /// Remove a package.
    fn remove(&self, package: &str, environment: Option<&str>) -> Result<()>;
}

/// Get the default backend (real conda CLI).
pub fn default_backend(config: CondaConfig) -> Result<conda::CondaCli> {
    conda::CondaCli::new(config)
}

#[cfg(test)]
pub(crate) mod mock {
    //! A scriptable backend for engine and inventory tests.

    use super::Backend;
    use crate::error::Result;
    use crate::parse;
    use crate::types::PackageRecord;
    use std::sync::Mutex;

    /// Backend fed from canned data, recording every mutating call.
    #[derive(Default)]
    pub struct MockBackend {
        pub environments: Vec<String>,
        pub global: Vec<PackageRecord>,
        pub per_env: Vec<(String, Vec<PackageRecord>)>,
        /// Raw `conda search --canonical` output lines
        pub search_lines: Vec<String>,
        pub python_tag: String,
        pub installs: Mutex<Vec<String>>,
        pub removals: Mutex<Vec<String>>,
    }

    impl Backend for MockBackend {
        fn is_available(&self) -> bool {
            true
        }

        fn list_environments(&self) -> Result<Vec<String>> {
            Ok(self.environments.clone())
        }

        fn list_installed(&self, environment: Option<&str>) -> Result<Vec<PackageRecord>> {
            match environment {
                None => Ok(self.global.clone()),
                Some(env) => Ok(self
                    .per_env
                    .iter()
                    .find(|(name, _)| name == env)
                    .map(|(_, records)| records.clone())
                    .unwrap_or_default()),
            }
        }

        fn search_versions(
            &self,
            _package: &str,
            _environment: Option<&str>,
            _channel: Option<&str>,
        ) -> Result<Vec<String>> {
            Ok(self
                .search_lines
                .iter()
                .filter_map(|line| parse::parse_search_line(line, &self.python_tag))
                .collect())
        }

        fn install(&self, spec: &str, environment: Option<&str>, _channel: Option<&str>) -> Result<()> {
            let scoped = match environment {
                Some(env) => format!("{env}::{spec}"),
                None => spec.to_string(),
            };
            self.installs.lock().unwrap().push(scoped);
            Ok(())
        }

        fn remove(&self, package: &str, environment: Option<&str>) -> Result<()> {
            let scoped = match environment {
                Some(env) => format!("{env}::{package}"),
                None => package.to_string(),
            };
            self.removals.lock().unwrap().push(scoped);
            Ok(())
        }
    }

    // Tests hold an Arc to the mock so recorded calls stay inspectable
    // after the client takes ownership of its backend box.
    impl Backend for std::sync::Arc<MockBackend> {
        fn is_available(&self) -> bool {
            self.as_ref().is_available()
        }

        fn list_environments(&self) -> Result<Vec<String>> {
            self.as_ref().list_environments()
        }

        fn list_installed(&self, environment: Option<&str>) -> Result<Vec<PackageRecord>> {
            self.as_ref().list_installed(environment)
        }

        fn search_versions(
            &self,
            package: &str,
            environment: Option<&str>,
            channel: Option<&str>,
        ) -> Result<Vec<String>> {
            self.as_ref().search_versions(package, environment, channel)
        }

        fn install(&self, spec: &str, environment: Option<&str>, channel: Option<&str>) -> Result<()> {
            self.as_ref().install(spec, environment, channel)
        }

        fn remove(&self, package: &str, environment: Option<&str>) -> Result<()> {
            self.as_ref().remove(package, environment)
        }
    }
}
