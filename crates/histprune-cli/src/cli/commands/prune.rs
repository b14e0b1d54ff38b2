//! `histprune prune <url>` – delete matching entries from a browser History database.

use anyhow::{bail, Context, Result};
use histprune_core::config::HistpruneConfig;
use histprune_core::{HistoryPruner, PruneReport, SqliteHistory};
use std::path::{Path, PathBuf};

/// Resolves the database (`--db` wins over config), then prunes or, with
/// `dry_run`, only prints the plan. Fails if any delete failed.
pub async fn run_prune(
    cfg: &HistpruneConfig,
    url: &str,
    db: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let path: PathBuf = db
        .map(Path::to_path_buf)
        .or_else(|| cfg.history_db.clone())
        .context("no history database: pass --db or set history_db in config.toml")?;
    if !path.exists() {
        bail!("history database not found: {}", path.display());
    }

    let history = SqliteHistory::open_at(&path)
        .await
        .with_context(|| format!("open history database {}", path.display()))?;
    let pruner = HistoryPruner::from_config(history, cfg);

    if dry_run {
        let plan = pruner.plan(url).await?;
        println!(
            "Would remove {} URL(s) ({} candidate(s) searched for {:?}):",
            plan.urls.len(),
            plan.candidates_seen,
            plan.search_key
        );
        for u in &plan.urls {
            println!("  {u}");
        }
        return Ok(());
    }

    let report = pruner.prune_matching_report(url).await?;
    for f in &report.failed {
        eprintln!("could not remove {}: {}", f.url, f.error);
    }
    println!("{}", summary_line(url, &report));
    if !report.is_complete() {
        bail!(
            "{} of {} delete request(s) failed",
            report.failed.len(),
            report.submitted
        );
    }
    Ok(())
}

/// Reports delete requests issued, failed ones included; those are listed separately.
fn summary_line(url: &str, report: &PruneReport) -> String {
    format!("Removed {} URL(s) from history for {url}", report.submitted)
}
