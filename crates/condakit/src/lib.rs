//! # condakit
//!
//! Pure Rust library for reconciling conda package state.
//!
//! This crate provides functionality for:
//! - Enumerating installed packages across every conda environment
//! - Parsing conda's hyphen-delimited package identifiers
//! - Resolving `env::package` qualified targets
//! - Driving idempotent install / remove / search-latest actions
//!
//! ## Example
//!
//! ```no_run
//! use condakit::{Client, CondaConfig, Ensure, PackageRequest};
//!
//! // Resolve paths at startup (the CLI does this per platform).
//! let config = CondaConfig::new("/opt/anaconda/bin/conda", "/opt/anaconda/envs");
//! let client = Client::new(config).expect("conda not available");
//!
//! // Query current state across all environments.
//! if let Some(record) = client.query("science::numpy").expect("query failed") {
//!     println!("{} {}", record.qualified_name(), record.version);
//! }
//!
//! // Converge on a pinned version.
//! let request = PackageRequest::new("science::numpy")
//!     .with_ensure(Ensure::Version("1.7.1".to_string()));
//! client.install(&request).expect("install failed");
//! ```
//!
//! ## Failure semantics
//!
//! Every operation re-derives current state from conda: nothing is cached
//! between calls, so re-running an operation with the same desired state is
//! always safe. Failures are fatal to the operation in which they occur;
//! there are no retries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod inventory;
pub mod parse;
pub mod types;
pub mod version;

pub use error::{Error, ErrorCategory, Result};
pub use types::{CondaConfig, Ensure, PackageRecord, PackageRequest, QualifiedTarget};
pub use version::LooseVersion;

use backend::{Backend, conda::CondaCli};

/// High-level client for conda reconciliation.
///
/// The client wraps a backend and exposes the desired-state operations:
/// query, install, update, uninstall, and latest-version discovery.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new client with the default backend.
    ///
    /// Returns an error if the configured conda executable does not exist.
    pub fn new(config: CondaConfig) -> Result<Self> {
        let backend = CondaCli::new(config)?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Check if conda is available.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    // =========================================================================
    // Query Operations
    // =========================================================================

    /// Find the installed record matching a possibly-qualified name.
    ///
    /// Scans the full machine inventory and returns the first record whose
    /// visible identity matches case-insensitively — a deliberate tolerance
    /// for conda's capitalization inconsistencies. `None` means absent.
    pub fn query(&self, name: &str) -> Result<Option<PackageRecord>> {
        let wanted = name.to_lowercase();
        Ok(inventory::collect_all(self.backend.as_ref())?
            .into_iter()
            .find(|record| record.qualified_name().to_lowercase() == wanted))
    }

    /// List installed packages in one scope (`None` = global).
    pub fn list_installed(&self, environment: Option<&str>) -> Result<Vec<PackageRecord>> {
        inventory::collect(self.backend.as_ref(), environment)
    }

    /// List the full machine inventory, global scope first.
    pub fn list_all(&self) -> Result<Vec<PackageRecord>> {
        inventory::collect_all(self.backend.as_ref())
    }

    /// List environments known to conda, in directory-listing order.
    pub fn list_environments(&self) -> Result<Vec<String>> {
        self.backend.list_environments()
    }

    // =========================================================================
    // State-Changing Operations
    // =========================================================================

    /// Install a package according to its desired state.
    ///
    /// A scoped target requires its environment to already exist (validated
    /// by re-enumerating environments, exact match); a missing environment
    /// is fatal and no install subcommand runs. Environments are never
    /// created implicitly.
    pub fn install(&self, request: &PackageRequest) -> Result<()> {
        let target = request.target();
        if let Some(environment) = target.environment.as_deref() {
            self.ensure_environment_exists(environment, request)?;
        }
        let spec = request.ensure.install_spec(&target.package);
        self.backend
            .install(&spec, target.environment.as_deref(), request.channel.as_deref())
    }

    /// Re-assert desired state for a package.
    ///
    /// Update is install re-run: conda's own "satisfy this spec" behavior
    /// makes the call idempotent, and an upgrade is just convergence toward
    /// the currently desired state.
    pub fn update(&self, request: &PackageRequest) -> Result<()> {
        self.install(request)
    }

    /// Remove a package.
    ///
    /// No existence pre-check: removal of an already-absent package is
    /// delegated to conda's own tolerance.
    pub fn uninstall(&self, request: &PackageRequest) -> Result<()> {
        let target = request.target();
        self.backend
            .remove(&target.package, target.environment.as_deref())
    }

    /// Find the newest version conda can see for a package.
    ///
    /// Searches with an anchored exact-match pattern, filters to the
    /// configured interpreter build tag, and returns the maximum under loose
    /// version ordering. `None` means no matching version was found — an
    /// absence signal, not an error.
    pub fn latest(&self, request: &PackageRequest) -> Result<Option<String>> {
        let target = request.target();
        let versions = self.backend.search_versions(
            &target.package,
            target.environment.as_deref(),
            request.channel.as_deref(),
        )?;
        Ok(versions
            .into_iter()
            .max_by(|a, b| LooseVersion::parse(a).cmp(&LooseVersion::parse(b))))
    }

    /// Validate that a named environment exists, exactly as spelled.
    fn ensure_environment_exists(&self, environment: &str, request: &PackageRequest) -> Result<()> {
        let known = self.backend.list_environments()?;
        if known.iter().any(|name| name == environment) {
            Ok(())
        } else {
            Err(Error::EnvironmentNotFound {
                package: request.name.clone(),
                ensure: request.ensure.to_string(),
                environment: environment.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn inventory_backend() -> MockBackend {
        MockBackend {
            environments: vec!["science".to_string()],
            global: vec![PackageRecord::new("NumPy", "1.2")],
            per_env: vec![(
                "science".to_string(),
                vec![PackageRecord::new("scipy", "0.12.0").in_environment("science")],
            )],
            ..Default::default()
        }
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let client = Client::with_backend(Box::new(inventory_backend()));
        let record = client.query("numpy").unwrap().expect("should be found");
        assert_eq!(record.name, "NumPy");
        assert_eq!(record.version, "1.2");
    }

    #[test]
    fn test_query_matches_qualified_identity() {
        let client = Client::with_backend(Box::new(inventory_backend()));
        let record = client.query("SCIENCE::scipy").unwrap().expect("found");
        assert_eq!(record.qualified_name(), "science::scipy");

        // The bare name does not match a scoped record.
        assert!(client.query("nosuch").unwrap().is_none());
    }

    #[test]
    fn test_install_missing_environment_is_fatal_before_install() {
        let backend = MockBackend {
            environments: vec!["science".to_string()],
            ..Default::default()
        };
        let client = Client::with_backend(Box::new(backend));

        let request = PackageRequest::new("nosuchenv::numpy")
            .with_ensure(Ensure::Version("1.2.0".to_string()));
        let err = client.install(&request).unwrap_err();

        assert!(matches!(
            err,
            Error::EnvironmentNotFound { ref environment, .. } if environment == "nosuchenv"
        ));
    }

    #[test]
    fn test_install_missing_environment_never_invokes_backend_install() {
        let backend = std::sync::Arc::new(MockBackend::default());
        let client = Client::with_backend(Box::new(backend.clone()));

        let request = PackageRequest::new("nosuchenv::numpy");
        assert!(client.install(&request).is_err());
        assert!(backend.installs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_install_environment_match_is_case_sensitive() {
        let backend = MockBackend {
            environments: vec!["Science".to_string()],
            ..Default::default()
        };
        let client = Client::with_backend(Box::new(backend));

        let request = PackageRequest::new("science::numpy");
        assert!(client.install(&request).is_err());
    }

    #[test]
    fn test_install_renders_pinned_spec() {
        let backend = std::sync::Arc::new(MockBackend {
            environments: vec!["science".to_string()],
            ..Default::default()
        });
        let client = Client::with_backend(Box::new(backend.clone()));

        let request = PackageRequest::new("science::numpy")
            .with_ensure(Ensure::Version("1.7.1".to_string()));
        client.install(&request).unwrap();

        let installs = backend.installs.lock().unwrap();
        assert_eq!(*installs, vec!["science::numpy==1.7.1"]);
    }

    #[test]
    fn test_install_unpinned_spec_is_bare_name() {
        let backend = std::sync::Arc::new(MockBackend::default());
        let client = Client::with_backend(Box::new(backend.clone()));

        let request = PackageRequest::new("numpy").with_ensure(Ensure::Latest);
        client.install(&request).unwrap();

        let installs = backend.installs.lock().unwrap();
        assert_eq!(*installs, vec!["numpy"]);
    }

    #[test]
    fn test_uninstall_has_no_existence_precheck() {
        let backend = std::sync::Arc::new(MockBackend::default());
        let client = Client::with_backend(Box::new(backend.clone()));

        let request = PackageRequest::new("ghost::numpy").with_ensure(Ensure::Absent);
        // The ghost environment is never validated for removal.
        client.uninstall(&request).unwrap();

        let removals = backend.removals.lock().unwrap();
        assert_eq!(*removals, vec!["ghost::numpy"]);
    }

    #[test]
    fn test_latest_filters_tag_and_takes_maximum() {
        let backend = MockBackend {
            search_lines: vec![
                "foo-1.0.0-py27_0".to_string(),
                "foo-1.1.0-py38_0".to_string(),
                "foo-0.9.0-py27_1".to_string(),
            ],
            python_tag: "py27".to_string(),
            ..Default::default()
        };
        let client = Client::with_backend(Box::new(backend));

        let latest = client.latest(&PackageRequest::new("foo")).unwrap();
        assert_eq!(latest.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_latest_with_no_matches_is_absence_not_error() {
        let backend = MockBackend {
            search_lines: vec!["foo-1.1.0-py38_0".to_string()],
            python_tag: "py27".to_string(),
            ..Default::default()
        };
        let client = Client::with_backend(Box::new(backend));

        let latest = client.latest(&PackageRequest::new("foo")).unwrap();
        assert_eq!(latest, None);
    }

    #[test]
    fn test_update_is_install() {
        let backend = MockBackend {
            environments: vec!["science".to_string()],
            ..Default::default()
        };
        let client = Client::with_backend(Box::new(backend));

        let request = PackageRequest::new("science::numpy").with_ensure(Ensure::Latest);
        client.update(&request).unwrap();
    }
}
