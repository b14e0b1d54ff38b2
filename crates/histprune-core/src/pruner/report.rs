//! Outcome types for one pruning request.

use crate::history::HistoryError;

/// What would be deleted for one link, before any delete is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunePlan {
    /// Canonical form of the link. Only used for comparison, never deleted.
    pub target: String,
    /// Search key sent to the store.
    pub search_key: String,
    /// Records returned by the store's bounded search.
    pub candidates_seen: usize,
    /// Raw URLs to delete: deduplicated, in first-seen order.
    pub urls: Vec<String>,
    /// True when nothing matched and `urls` holds only the link itself.
    pub fell_back: bool,
}

/// A delete request that the store rejected.
#[derive(Debug)]
pub struct FailedDelete {
    pub url: String,
    pub error: HistoryError,
}

/// Outcome of [`HistoryPruner::prune_matching_report`](super::HistoryPruner::prune_matching_report).
#[derive(Debug)]
pub struct PruneReport {
    pub plan: PrunePlan,
    /// Delete requests issued (one per planned URL).
    pub submitted: usize,
    /// Requests that failed. Their siblings were still issued.
    pub failed: Vec<FailedDelete>,
}

impl PruneReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.submitted - self.failed.len()
    }
}
