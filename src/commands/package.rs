//! Desired-state package commands backed by condakit.

use anyhow::{Context, Result, anyhow};
use condakit::{Client, CondaConfig, Ensure, PackageRequest};
use log::debug;

use crate::Context as AppContext;
use crate::progress;
use crate::ui;

/// Create a condakit client, mapping setup failures to friendly errors.
pub fn create_client(config: CondaConfig) -> Result<Client> {
    Client::new(config).map_err(|e| match e {
        condakit::Error::CondaNotFound => anyhow!(
            "conda is not installed.\n\n  Install Miniconda or Anaconda, or point condactl at an existing install:\n    condactl --conda /path/to/conda <command>"
        ),
        other => anyhow!("Failed to initialize conda client: {other}"),
    })
}

pub fn query(_ctx: &AppContext, config: CondaConfig, name: &str, json: bool) -> Result<()> {
    let client = create_client(config)?;

    let pb = progress::spinner(&format!("Querying {name}..."));
    let found = client
        .query(name)
        .context("Failed to query installed packages")?;
    progress::finish_clear(&pb);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    match found {
        Some(record) => {
            ui::success(&format!("{} is installed", record.qualified_name()));
            ui::kv("version", &record.version);
            if let Some(env) = &record.environment {
                ui::kv("environment", env);
            }
        }
        None => ui::warn(&format!("{name} is absent")),
    }
    Ok(())
}

pub fn install(
    _ctx: &AppContext,
    config: CondaConfig,
    name: &str,
    version: Option<String>,
    channel: Option<String>,
) -> Result<()> {
    let ensure = match version {
        Some(v) => Ensure::Version(v),
        None => Ensure::Latest,
    };
    let mut request = PackageRequest::new(name).with_ensure(ensure);
    if let Some(channel) = channel {
        request = request.with_channel(channel);
    }

    converge("Installing", name, config, &request)
}

pub fn update(
    _ctx: &AppContext,
    config: CondaConfig,
    name: &str,
    channel: Option<String>,
) -> Result<()> {
    let mut request = PackageRequest::new(name).with_ensure(Ensure::Latest);
    if let Some(channel) = channel {
        request = request.with_channel(channel);
    }

    converge("Updating", name, config, &request)
}

/// Run an install/update convergence and report the outcome.
fn converge(verb: &str, name: &str, config: CondaConfig, request: &PackageRequest) -> Result<()> {
    let client = create_client(config)?;

    debug!("{verb} {name} with ensure {:?}", request.ensure);
    let pb = progress::spinner(&format!("{verb} {name}..."));
    match client.install(request) {
        Ok(()) => {
            progress::finish_success(&pb, &format!("{name} converged to {}", request.ensure));
            Ok(())
        }
        Err(e) => {
            progress::finish_error(&pb, &e.to_string());
            ui::dim(e.category().advice());
            Err(e).with_context(|| format!("Failed to converge {name}"))
        }
    }
}

pub fn remove(_ctx: &AppContext, config: CondaConfig, name: &str) -> Result<()> {
    let client = create_client(config)?;

    let request = PackageRequest::new(name).with_ensure(Ensure::Absent);
    let pb = progress::spinner(&format!("Removing {name}..."));
    match client.uninstall(&request) {
        Ok(()) => {
            progress::finish_success(&pb, &format!("{name} removed"));
            Ok(())
        }
        Err(e) => {
            progress::finish_error(&pb, &e.to_string());
            ui::dim(e.category().advice());
            Err(e).with_context(|| format!("Failed to remove {name}"))
        }
    }
}

pub fn latest(
    _ctx: &AppContext,
    config: CondaConfig,
    name: &str,
    channel: Option<String>,
) -> Result<()> {
    let client = create_client(config)?;

    let mut request = PackageRequest::new(name);
    if let Some(channel) = channel {
        request = request.with_channel(channel);
    }

    let pb = progress::spinner(&format!("Searching for {name}..."));
    let found = client
        .latest(&request)
        .with_context(|| format!("Failed to search for {name}"))?;
    progress::finish_clear(&pb);

    match found {
        Some(version) => {
            ui::success(&format!("{name} latest: {version}"));
        }
        None => ui::warn(&format!("no version found for {name}")),
    }
    Ok(())
}
