use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::canonical::TrackingRules;

/// Candidate and delete limits for one prune (`[prune]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Upper bound on records fetched from the store per request.
    pub max_results: usize,
    /// Maximum delete requests in flight at once.
    pub delete_concurrency: usize,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            max_results: 5000,
            delete_concurrency: 16,
        }
    }
}

/// Global configuration loaded from `~/.config/histprune/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistpruneConfig {
    /// Browser `History` database used when `--db` is not given.
    #[serde(default)]
    pub history_db: Option<PathBuf>,
    #[serde(default)]
    pub prune: PruneConfig,
    /// Tracking parameters ignored when comparing URLs.
    #[serde(default)]
    pub tracking: TrackingRules,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("histprune")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HistpruneConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HistpruneConfig::default();
        write_to(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<HistpruneConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: HistpruneConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Render a configuration as it would be written to disk.
pub fn to_toml(cfg: &HistpruneConfig) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

pub fn write_to(path: &Path, cfg: &HistpruneConfig) -> Result<()> {
    let toml = to_toml(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
    Ok(())
}
