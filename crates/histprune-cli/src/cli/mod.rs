//! CLI for histprune.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use histprune_core::config::{self, HistpruneConfig};
use std::path::PathBuf;

use commands::{run_canonicalize, run_config, run_prune, run_same};

/// Top-level CLI for histprune.
#[derive(Debug, Parser)]
#[command(name = "histprune")]
#[command(about = "histprune: remove browser history entries matching a link", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/histprune/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Remove every history entry that denotes the same resource as URL.
    Prune {
        /// Link whose history entries should be removed.
        url: String,
        /// Browser History database (overrides `history_db` in config).
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
        /// Print the URLs that would be deleted without deleting them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the canonical comparison form of each URL.
    Canonicalize {
        /// URLs to canonicalize.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Tell whether two URLs denote the same resource.
    Same {
        a: String,
        b: String,
    },

    /// Show the configuration file path and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Prune { url, db, dry_run } => {
                run_prune(&cfg, &url, db.as_deref(), dry_run).await?
            }
            CliCommand::Canonicalize { urls } => run_canonicalize(&cfg, &urls),
            CliCommand::Same { a, b } => run_same(&cfg, &a, &b),
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<HistpruneConfig> {
    match explicit {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}
