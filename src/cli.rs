use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "condactl")]
#[command(version)]
#[command(about = "Reconcile conda package state across environments", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the conda executable
    #[arg(long, env = "CONDACTL_CONDA", global = true, value_name = "PATH")]
    pub conda: Option<PathBuf>,

    /// Path to conda's environments directory
    #[arg(long, env = "CONDACTL_ENVS_DIR", global = true, value_name = "PATH")]
    pub envs_dir: Option<PathBuf>,

    /// Interpreter build tag used to filter search results
    #[arg(long, env = "CONDACTL_PYTHON_TAG", global = true, value_name = "TAG")]
    pub python_tag: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the installed state of a package
    Query {
        /// Package name, optionally qualified as "env::package"
        name: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Install a package, optionally pinned to an exact version
    Install {
        /// Package name, optionally qualified as "env::package"
        name: String,

        /// Exact version to install (default: whatever conda resolves)
        #[arg(short = 'V', long)]
        version: Option<String>,

        /// Channel to install from
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Re-assert desired state for a package (converges to latest)
    Update {
        /// Package name, optionally qualified as "env::package"
        name: String,

        /// Channel to install from
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Remove a package
    Remove {
        /// Package name, optionally qualified as "env::package"
        name: String,
    },

    /// Show the newest version conda can see for a package
    Latest {
        /// Package name, optionally qualified as "env::package"
        name: String,

        /// Channel to search in
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// List installed packages
    List {
        /// Limit to one environment
        #[arg(short = 'n', long)]
        env: Option<String>,

        /// Include every environment, global scope first
        #[arg(short, long)]
        all: bool,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List conda environments
    Envs,

    /// Run health checks against the conda installation
    Doctor,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
