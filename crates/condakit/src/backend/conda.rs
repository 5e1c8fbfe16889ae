//! Real conda CLI backend using `conda` commands.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::parse;
use crate::types::{CondaConfig, PackageRecord};

/// Backend that executes real `conda` commands.
///
/// Listing and search output is consumed line-by-line as the child process
/// streams it, so memory use stays constant regardless of inventory size.
pub struct CondaCli {
    config: CondaConfig,
}

impl CondaCli {
    /// Create a new CLI backend.
    ///
    /// Returns an error if the configured conda executable does not exist.
    pub fn new(config: CondaConfig) -> Result<Self> {
        if !config.conda_path.exists() {
            return Err(Error::CondaNotFound);
        }
        Ok(Self { config })
    }

    /// The configuration this backend was built with.
    pub fn config(&self) -> &CondaConfig {
        &self.config
    }

    /// Run a conda command to completion and return its output.
    fn run_conda(&self, args: &[&str]) -> Result<std::process::Output> {
        let output = Command::new(&self.config.conda_path)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute conda: {e}"),
                stderr: String::new(),
            })?;
        Ok(output)
    }

    /// Run a conda command and check for success.
    fn run_conda_checked(&self, args: &[&str], package_name: Option<&str>) -> Result<String> {
        let output = self.run_conda(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_conda_output(&stderr, package_name));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Spawn conda and feed each stdout line to `consume` as it arrives.
    ///
    /// stderr is drained on a separate thread so a chatty child can never
    /// fill the pipe while stdout is still being read.
    fn run_conda_lines(&self, args: &[&str], mut consume: impl FnMut(&str)) -> Result<()> {
        let mut child = Command::new(&self.config.conda_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute conda: {e}"),
                stderr: String::new(),
            })?;

        let stderr_reader = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                consume(&line?);
            }
        }

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        let status = child.wait()?;
        if !status.success() {
            return Err(Error::from_conda_output(&stderr, None));
        }
        Ok(())
    }
}

impl Backend for CondaCli {
    fn is_available(&self) -> bool {
        self.run_conda(&["--version"])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn list_environments(&self) -> Result<Vec<String>> {
        let (program, fixed_args) =
            self.config.dir_listing.split_first().ok_or_else(|| {
                Error::Other("directory-listing command is empty".to_string())
            })?;

        let output = Command::new(program)
            .args(fixed_args)
            .arg(&self.config.envs_dir)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {program}: {e}"),
                stderr: String::new(),
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                message: format!(
                    "failed to list environments in {}",
                    self.config.envs_dir.display()
                ),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn list_installed(&self, environment: Option<&str>) -> Result<Vec<PackageRecord>> {
        let mut args = vec!["list", "-c"];
        if let Some(env) = environment {
            args.push("-n");
            args.push(env);
        }

        let mut records = Vec::new();
        self.run_conda_lines(&args, |line| {
            if let Some(record) = parse::parse_list_line(line, environment) {
                records.push(record);
            }
        })?;
        Ok(records)
    }

    fn search_versions(
        &self,
        package: &str,
        environment: Option<&str>,
        channel: Option<&str>,
    ) -> Result<Vec<String>> {
        // Anchored so "numpy" does not also match "numpydoc".
        let pattern = format!("^{package}$");

        let mut args = vec!["search", "--canonical"];
        if let Some(env) = environment {
            args.push("-n");
            args.push(env);
        }
        if let Some(channel) = channel {
            args.push("--channel");
            args.push(channel);
        }
        args.push(&pattern);

        let tag = self.config.python_tag.clone();
        let mut versions = Vec::new();
        self.run_conda_lines(&args, |line| {
            if let Some(version) = parse::parse_search_line(line, &tag) {
                versions.push(version);
            }
        })?;
        Ok(versions)
    }

    fn install(&self, spec: &str, environment: Option<&str>, channel: Option<&str>) -> Result<()> {
        let mut args = vec!["install", "--yes", "--quiet"];
        if let Some(env) = environment {
            args.push("-n");
            args.push(env);
        }
        if let Some(channel) = channel {
            args.push("--channel");
            args.push(channel);
        }
        args.push(spec);

        let package_name = spec.split("==").next().unwrap_or(spec);
        self.run_conda_checked(&args, Some(package_name))?;
        Ok(())
    }

    fn remove(&self, package: &str, environment: Option<&str>) -> Result<()> {
        let mut args = vec!["remove", "--yes"];
        if let Some(env) = environment {
            args.push("-n");
            args.push(env);
        }
        args.push(package);

        self.run_conda_checked(&args, Some(package))?;
        Ok(())
    }
}
