//! Remove every history entry that denotes the same resource as a clicked link.
//!
//! Flow for one link:
//! 1. canonicalize the link,
//! 2. search the store by the link's host (bounded, best-effort prefilter),
//! 3. keep candidates whose canonical form equals the link's,
//! 4. fall back to the link itself when nothing matched,
//! 5. delete each distinct raw URL, concurrently.
//!
//! Deletes always use raw stored URLs; the canonical form never reaches the store.

mod report;

pub use report::{FailedDelete, PrunePlan, PruneReport};

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use url::Url;

use crate::canonical::Canonicalizer;
use crate::config::{HistpruneConfig, PruneConfig};
use crate::history::{HistoryError, HistoryStore, SearchQuery};

/// Deletes history entries matching a link, modulo tracking parameters and formatting.
pub struct HistoryPruner<S> {
    store: S,
    canonicalizer: Canonicalizer,
    limits: PruneConfig,
}

/// `host[:port]` of `link_url` when it parses and has a host, else the link verbatim.
///
/// The port is only present when it is not the scheme default; the parser has
/// already dropped `:80` on http and `:443` on https.
pub fn search_key(link_url: &str) -> String {
    Url::parse(link_url)
        .ok()
        .and_then(|u| {
            let host = u.host_str().filter(|h| !h.is_empty())?;
            Some(match u.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .unwrap_or_else(|| link_url.to_string())
}

impl<S: HistoryStore> HistoryPruner<S> {
    /// Pruner with default tracking rules and limits.
    pub fn new(store: S) -> Self {
        Self {
            store,
            canonicalizer: Canonicalizer::default(),
            limits: PruneConfig::default(),
        }
    }

    /// Pruner using the limits and tracking rules from `cfg`.
    pub fn from_config(store: S, cfg: &HistpruneConfig) -> Self {
        Self {
            store,
            canonicalizer: Canonicalizer::new(cfg.tracking.clone()),
            limits: cfg.prune.clone(),
        }
    }

    pub fn with_limits(mut self, limits: PruneConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Work out which raw URLs a prune of `link_url` would delete.
    ///
    /// Errors only when the store search fails.
    pub async fn plan(&self, link_url: &str) -> Result<PrunePlan, HistoryError> {
        let target = self.canonicalizer.canonicalize(link_url);
        let key = search_key(link_url);
        let query = SearchQuery::new(key.clone(), self.limits.max_results);

        let records = self.store.search(&query).await?;
        let candidates_seen = records.len();

        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        for record in records {
            if record.url.is_empty() {
                continue;
            }
            if self.canonicalizer.canonicalize(&record.url) != target {
                continue;
            }
            tracing::debug!(url = %record.url, target = %target, "history entry matches link");
            if seen.insert(record.url.clone()) {
                urls.push(record.url);
            }
        }

        let fell_back = urls.is_empty();
        if fell_back {
            tracing::debug!(link_url, candidates_seen, "no canonical match; deleting link verbatim");
            urls.push(link_url.to_string());
        }

        Ok(PrunePlan {
            target,
            search_key: key,
            candidates_seen,
            urls,
            fell_back,
        })
    }

    /// Plan, then issue one delete per planned URL and wait for all of them.
    ///
    /// A failed delete never stops the others; failures are collected in the report.
    pub async fn prune_matching_report(&self, link_url: &str) -> Result<PruneReport, HistoryError> {
        let plan = self.plan(link_url).await?;
        let concurrency = self.limits.delete_concurrency.max(1);

        let failed: Vec<FailedDelete> = stream::iter(plan.urls.iter())
            .map(|url| async move {
                self.store
                    .delete_url(url)
                    .await
                    .map_err(|error| FailedDelete {
                        url: url.clone(),
                        error,
                    })
            })
            .buffer_unordered(concurrency)
            .filter_map(|res| async move { res.err() })
            .collect()
            .await;

        for f in &failed {
            tracing::warn!(url = %f.url, "failed to delete history url: {}", f.error);
        }

        let submitted = plan.urls.len();
        tracing::info!(
            link_url,
            submitted,
            failed = failed.len(),
            "removed {} URL(s) from history",
            submitted
        );

        Ok(PruneReport {
            plan,
            submitted,
            failed,
        })
    }

    /// Delete every stored URL equivalent to `link_url`; returns the number of
    /// delete requests issued. That is not necessarily the number of entries
    /// removed, since deleting an absent URL is a no-op.
    pub async fn prune_matching(&self, link_url: &str) -> Result<usize, HistoryError> {
        Ok(self.prune_matching_report(link_url).await?.submitted)
    }
}
