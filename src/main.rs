mod cli;
mod commands;
mod config;
mod platform;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let conda = config::resolve(&cli)?;

    match cli.command {
        Command::Query { name, json } => commands::package::query(&ctx, conda, &name, json),
        Command::Install {
            name,
            version,
            channel,
        } => commands::package::install(&ctx, conda, &name, version, channel),
        Command::Update { name, channel } => {
            commands::package::update(&ctx, conda, &name, channel)
        }
        Command::Remove { name } => commands::package::remove(&ctx, conda, &name),
        Command::Latest { name, channel } => {
            commands::package::latest(&ctx, conda, &name, channel)
        }
        Command::List { env, all, json } => {
            commands::list::run(&ctx, conda, env.as_deref(), all, json)
        }
        Command::Envs => commands::list::envs(&ctx, conda),
        Command::Doctor => commands::doctor::run(&ctx, conda),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
