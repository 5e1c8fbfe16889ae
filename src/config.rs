use anyhow::{Context, Result};
use condakit::CondaConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::platform;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("condactl"))
}

/// Optional on-disk overrides for the conda installation.
///
/// Everything is optional; anything absent falls back to platform defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub conda_path: Option<PathBuf>,
    #[serde(default)]
    pub envs_dir: Option<PathBuf>,
    #[serde(default)]
    pub python_tag: Option<String>,
}

impl FileConfig {
    /// Load config.json if present; an absent file is not an error.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("config.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))
    }
}

/// Resolve the effective conda configuration.
///
/// Precedence per field: CLI flag (or its environment variable, handled by
/// clap) > config file > platform default.
pub fn resolve(cli: &Cli) -> Result<CondaConfig> {
    let file = FileConfig::load()?;

    let conda_path = cli
        .conda
        .clone()
        .or(file.conda_path)
        .unwrap_or_else(platform::default_conda_path);

    let envs_dir = cli
        .envs_dir
        .clone()
        .or(file.envs_dir)
        .unwrap_or_else(|| platform::envs_dir_for(&conda_path));

    let mut config = CondaConfig::new(conda_path, envs_dir)
        .with_dir_listing(platform::dir_listing_command());

    if let Some(tag) = cli.python_tag.clone().or(file.python_tag) {
        config = config.with_python_tag(tag);
    }

    log::debug!(
        "resolved conda config: executable {}, envs {}",
        config.conda_path.display(),
        config.envs_dir.display()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_parses_partial_json() {
        let parsed: FileConfig =
            serde_json::from_str(r#"{"python_tag": "py39"}"#).unwrap();
        assert_eq!(parsed.python_tag.as_deref(), Some("py39"));
        assert_eq!(parsed.conda_path, None);
    }
}
