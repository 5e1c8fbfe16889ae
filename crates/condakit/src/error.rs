//! Error types for conda operations.
//!
//! Errors are categorized so the CLI can give appropriate user feedback.
//! Each error type includes contextual information to help users understand
//! what went wrong and how to fix it. Every failure is fatal to the current
//! operation: re-running with the same desired state is the recovery story,
//! so there is no retry machinery here.

use thiserror::Error;

/// Categories of conda errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (channel unreachable, download failed)
    Network,
    /// Package not found in any channel
    NotFound,
    /// Target environment does not exist
    EnvironmentNotFound,
    /// Permission denied (environment not writable)
    Permission,
    /// conda not found or not configured
    CondaNotFound,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Package not found",
            Self::EnvironmentNotFound => "Environment does not exist",
            Self::Permission => "Permission denied",
            Self::CondaNotFound => "conda not installed",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check your internet connection and channel configuration",
            Self::NotFound => "Verify the package name or add the required channel",
            Self::EnvironmentNotFound => "Create the environment first with `conda create -n <env>`",
            Self::Permission => "Check permissions on the conda installation directory",
            Self::CondaNotFound => "Install Anaconda or Miniconda, or point --conda at the executable",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur during conda operations.
///
/// Each variant includes relevant context to help diagnose and resolve issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error (channel unreachable, download failed)
    #[error("network error: {message}")]
    Network {
        /// Detailed error message from the failed network operation
        message: String,
    },

    /// Package not found in any configured channel
    #[error("package not found: {name}")]
    NotFound {
        /// Name of the package that could not be found
        name: String,
    },

    /// Install targeted an environment that does not exist
    #[error(
        "package {package} ({ensure}) is in an error state: environment {environment} does not exist"
    )]
    EnvironmentNotFound {
        /// Package whose install was requested
        package: String,
        /// Requested desired state (version or sentinel)
        ensure: String,
        /// The missing environment name
        environment: String,
    },

    /// Permission denied
    #[error("permission denied: {message}")]
    Permission {
        /// Details about what permission was denied
        message: String,
    },

    /// conda is not installed or not found at the configured path
    #[error("conda not found. Install Anaconda/Miniconda or configure the executable path")]
    CondaNotFound,

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category for user feedback.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Network { .. } => ErrorCategory::Network,
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::EnvironmentNotFound { .. } => ErrorCategory::EnvironmentNotFound,
            Error::Permission { .. } => ErrorCategory::Permission,
            Error::CondaNotFound => ErrorCategory::CondaNotFound,
            _ => ErrorCategory::Other,
        }
    }

    /// Create an error from conda command output.
    ///
    /// Analyzes stderr to categorize the error appropriately.
    pub fn from_conda_output(stderr: &str, package_name: Option<&str>) -> Self {
        let stderr_lower = stderr.to_lowercase();

        // Network errors
        if stderr_lower.contains("condahttperror")
            || stderr_lower.contains("connectionerror")
            || stderr_lower.contains("could not resolve")
            || stderr_lower.contains("connection refused")
            || stderr_lower.contains("timed out")
            || stderr_lower.contains("sslerror")
            || stderr_lower.contains("http 000")
            || stderr_lower.contains("failed to download")
        {
            return Error::Network {
                message: stderr.trim().to_string(),
            };
        }

        // Not found errors
        if stderr_lower.contains("packagesnotfounderror")
            || stderr_lower.contains("packagenotfounderror")
            || stderr_lower.contains("no match found")
            || stderr_lower.contains("are not available from current channels")
            || stderr_lower.contains("no packages found")
        {
            return Error::NotFound {
                name: package_name.unwrap_or("unknown").to_string(),
            };
        }

        // Permission errors
        if stderr_lower.contains("environmentnotwritableerror")
            || stderr_lower.contains("notwritableerror")
            || stderr_lower.contains("permission denied")
            || stderr_lower.contains("operation not permitted")
        {
            return Error::Permission {
                message: stderr.trim().to_string(),
            };
        }

        // Default to command failed
        Error::CommandFailed {
            message: format!(
                "conda command failed{}",
                package_name
                    .map(|n| format!(" for {n}"))
                    .unwrap_or_default()
            ),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Result type for conda operations.
pub type Result<T> = std::result::Result<T, Error>;
