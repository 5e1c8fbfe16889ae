//! Core types for conda package reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One installed or discoverable package unit.
///
/// Records are created by parsing one line of conda output and never mutated
/// afterwards. There is no persistent store; every query re-derives the full
/// inventory from conda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name, unique only within its environment
    pub name: String,
    /// Installed version
    pub version: String,
    /// Owning environment, or `None` for the global/default scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl PackageRecord {
    /// Create a record in the global scope.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            environment: None,
        }
    }

    /// Attach the owning environment.
    pub fn in_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// The record's externally visible identity: `env::name` when scoped,
    /// the bare name otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.environment {
            Some(env) => format!("{env}::{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A target identity split into an optional environment and a package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTarget {
    /// Target environment, or `None` for the global/default scope
    pub environment: Option<String>,
    /// Bare package name
    pub package: String,
}

impl QualifiedTarget {
    /// Split a raw target string on the first `::`.
    ///
    /// Overspecified forms are tolerated: `"::pkg"` and `""` both resolve to
    /// the unscoped form rather than failing. Every string is a valid input.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once("::") {
            None => Self {
                environment: None,
                package: raw.to_string(),
            },
            Some(("", package)) => Self {
                environment: None,
                package: package.to_string(),
            },
            Some((environment, package)) => Self {
                environment: Some(environment.to_string()),
                package: package.to_string(),
            },
        }
    }
}

/// Desired state for a package.
///
/// `Latest` and `Present` both install whatever conda resolves, but they are
/// distinct variants so callers can express intent precisely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// Installed at any version
    Present,
    /// Not installed
    Absent,
    /// Installed at the newest version conda resolves
    Latest,
    /// Installed at this exact version
    Version(String),
}

impl Ensure {
    /// Render the package spec passed to `conda install`.
    ///
    /// An explicit version pins with `==`; every other variant defers to
    /// conda's own resolution with a bare name.
    pub fn install_spec(&self, package: &str) -> String {
        match self {
            Ensure::Version(version) => format!("{package}=={version}"),
            _ => package.to_string(),
        }
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ensure::Present => write!(f, "present"),
            Ensure::Absent => write!(f, "absent"),
            Ensure::Latest => write!(f, "latest"),
            Ensure::Version(version) => write!(f, "{version}"),
        }
    }
}

/// A desired-state descriptor, consumed per invocation and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Target identity, optionally `env::package`
    pub name: String,
    /// Desired state
    pub ensure: Ensure,
    /// Optional channel override for install/search
    pub channel: Option<String>,
}

impl PackageRequest {
    /// Create a request with the default desired state (`Present`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ensure: Ensure::Present,
            channel: None,
        }
    }

    /// Set the desired state.
    pub fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }

    /// Set the channel override.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Resolve the request's target into (environment, package) coordinates.
    pub fn target(&self) -> QualifiedTarget {
        QualifiedTarget::parse(&self.name)
    }
}

/// Resolved configuration for talking to a conda installation.
///
/// The core performs no OS detection: callers resolve the executable path,
/// the environments directory, and the directory-listing command once at
/// startup and pass the result in by value.
#[derive(Debug, Clone)]
pub struct CondaConfig {
    /// Path to the conda executable
    pub conda_path: PathBuf,
    /// Directory holding conda's named environments
    pub envs_dir: PathBuf,
    /// Line-oriented directory-listing command, e.g. `["ls", "-1"]`
    pub dir_listing: Vec<String>,
    /// Interpreter build tag used to filter search results (e.g. `"py27"`)
    pub python_tag: String,
}

impl CondaConfig {
    /// Create a config with the default listing command and build tag.
    pub fn new(conda_path: impl Into<PathBuf>, envs_dir: impl Into<PathBuf>) -> Self {
        Self {
            conda_path: conda_path.into(),
            envs_dir: envs_dir.into(),
            dir_listing: vec!["ls".to_string(), "-1".to_string()],
            python_tag: "py27".to_string(),
        }
    }

    /// Override the directory-listing command.
    pub fn with_dir_listing(mut self, dir_listing: Vec<String>) -> Self {
        self.dir_listing = dir_listing;
        self
    }

    /// Override the interpreter build tag used by search.
    pub fn with_python_tag(mut self, python_tag: impl Into<String>) -> Self {
        self.python_tag = python_tag.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_target_bare_name() {
        let target = QualifiedTarget::parse("numpy");
        assert_eq!(target.environment, None);
        assert_eq!(target.package, "numpy");
    }

    #[test]
    fn test_qualified_target_scoped() {
        let target = QualifiedTarget::parse("science::numpy");
        assert_eq!(target.environment.as_deref(), Some("science"));
        assert_eq!(target.package, "numpy");
    }

    #[test]
    fn test_qualified_target_empty_environment() {
        let target = QualifiedTarget::parse("::numpy");
        assert_eq!(target.environment, None);
        assert_eq!(target.package, "numpy");
    }

    #[test]
    fn test_qualified_target_empty_string() {
        let target = QualifiedTarget::parse("");
        assert_eq!(target.environment, None);
        assert_eq!(target.package, "");
    }

    #[test]
    fn test_qualified_target_splits_on_first_delimiter() {
        let target = QualifiedTarget::parse("env::pkg::extra");
        assert_eq!(target.environment.as_deref(), Some("env"));
        assert_eq!(target.package, "pkg::extra");
    }

    #[test]
    fn test_qualified_name() {
        let global = PackageRecord::new("numpy", "1.2");
        assert_eq!(global.qualified_name(), "numpy");

        let scoped = PackageRecord::new("numpy", "1.2").in_environment("science");
        assert_eq!(scoped.qualified_name(), "science::numpy");
    }

    #[test]
    fn test_ensure_install_spec() {
        assert_eq!(
            Ensure::Version("1.2.0".to_string()).install_spec("numpy"),
            "numpy==1.2.0"
        );
        assert_eq!(Ensure::Latest.install_spec("numpy"), "numpy");
        assert_eq!(Ensure::Present.install_spec("numpy"), "numpy");
    }

    #[test]
    fn test_package_request_builder() {
        let request = PackageRequest::new("science::numpy")
            .with_ensure(Ensure::Version("1.2.0".to_string()))
            .with_channel("conda-forge");

        assert_eq!(request.channel.as_deref(), Some("conda-forge"));
        let target = request.target();
        assert_eq!(target.environment.as_deref(), Some("science"));
        assert_eq!(target.package, "numpy");
    }
}
