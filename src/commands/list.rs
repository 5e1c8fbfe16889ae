//! Inventory and environment listing commands.

use anyhow::{Context, Result};
use colored::Colorize;
use condakit::{CondaConfig, PackageRecord};

use crate::Context as AppContext;
use crate::commands::package::create_client;
use crate::progress;
use crate::ui;

pub fn run(
    _ctx: &AppContext,
    config: CondaConfig,
    env: Option<&str>,
    all: bool,
    json: bool,
) -> Result<()> {
    let client = create_client(config)?;

    let pb = progress::spinner("Collecting inventory...");
    let records = if all {
        client.list_all().context("Failed to collect inventory")?
    } else {
        client
            .list_installed(env)
            .context("Failed to collect inventory")?
    };
    progress::finish_clear(&pb);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        ui::warn("no packages installed");
        return Ok(());
    }

    let scope = match (all, env) {
        (true, _) => "all environments".to_string(),
        (false, Some(env)) => format!("environment {env}"),
        (false, None) => "global scope".to_string(),
    };
    ui::header(&format!("Installed Packages ({scope})"));
    for record in &records {
        print_record(record);
    }
    println!();
    ui::dim(&format!("{} packages", records.len()));
    Ok(())
}

fn print_record(record: &PackageRecord) {
    match &record.environment {
        Some(env) => println!(
            "  {}{}{} {}",
            env.cyan(),
            "::".dimmed(),
            record.name,
            record.version.dimmed()
        ),
        None => println!("  {} {}", record.name, record.version.dimmed()),
    }
}

pub fn envs(_ctx: &AppContext, config: CondaConfig) -> Result<()> {
    let client = create_client(config)?;

    let environments = client
        .list_environments()
        .context("Failed to list environments")?;

    if environments.is_empty() {
        ui::warn("no environments found");
        return Ok(());
    }

    ui::header("Environments");
    for env in &environments {
        println!("  {}", env.cyan());
    }
    Ok(())
}
