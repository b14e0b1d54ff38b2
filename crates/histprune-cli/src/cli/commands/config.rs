//! `histprune config` – show where the config lives and what it says.

use anyhow::Result;
use histprune_core::config::{self, HistpruneConfig};
use std::path::Path;

pub fn run_config(cfg: &HistpruneConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", config::to_toml(cfg)?);
    Ok(())
}
