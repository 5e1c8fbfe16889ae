use anyhow::Result;
use colored::Colorize;
use condakit::{Client, CondaConfig};

use crate::Context as AppContext;
use crate::ui;

struct Issue {
    category: &'static str,
    summary: String,
    fix: Option<String>,
}

pub fn run(ctx: &AppContext, config: CondaConfig) -> Result<()> {
    ui::header("Conda Health Check");

    let mut issues: Vec<Issue> = Vec::new();

    if !ctx.quiet {
        ui::kv("conda", &config.conda_path.display().to_string());
        ui::kv("envs dir", &config.envs_dir.display().to_string());
        ui::kv("build tag", &config.python_tag);
        if ctx.verbose > 0 {
            ui::kv("dir listing", &config.dir_listing.join(" "));
        }
    }

    if !config.conda_path.exists() {
        issues.push(Issue {
            category: "conda",
            summary: format!("conda executable not found at {}", config.conda_path.display()),
            fix: Some("Install Miniconda/Anaconda, or pass --conda /path/to/conda".to_string()),
        });
    }

    if !config.envs_dir.is_dir() {
        issues.push(Issue {
            category: "environments",
            summary: format!("environments directory missing: {}", config.envs_dir.display()),
            fix: Some("Pass --envs-dir, or create an environment with `conda create -n <env>`".to_string()),
        });
    }

    // Only probe the executable when it exists at all.
    if config.conda_path.exists() {
        match Client::new(config) {
            Ok(client) if client.is_available() => {}
            _ => issues.push(Issue {
                category: "conda",
                summary: "conda did not respond to --version".to_string(),
                fix: Some("Check that the configured path points at a working conda".to_string()),
            }),
        }
    }

    println!();
    if issues.is_empty() {
        ui::success("conda installation is healthy");
        return Ok(());
    }

    let count = issues.len();
    let label = if count == 1 { "Issue" } else { "Issues" };
    ui::header(&format!("{count} {label} Found"));

    for (i, issue) in issues.iter().enumerate() {
        let num = i + 1;
        println!(
            "  {}  {} {}",
            format!("{num}.").bold(),
            issue.summary,
            format!("[{}]", issue.category).dimmed()
        );
        if let Some(fix) = &issue.fix {
            println!("      {} {}", "Fix:".cyan(), fix);
        }
        println!();
    }

    anyhow::bail!("{count} {label} found");
}
