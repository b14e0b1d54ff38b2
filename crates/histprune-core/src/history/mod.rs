//! History store seam.
//!
//! The pruner only needs two operations from whatever owns the browsing
//! history: a bounded free-text search and an exact-URL delete. `SqliteHistory`
//! implements them over a Chromium-layout `History` database; tests use
//! in-memory fakes.

pub mod sqlite;
mod types;

pub use sqlite::SqliteHistory;
pub use types::{HistoryError, HistoryRecord, SearchQuery};

use async_trait::async_trait;
use std::sync::Arc;

/// External history collaborator.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Best-effort lookup of at most `query.max_results` records whose URL or
    /// title loosely contains `query.text`, visited at or after `query.start_time`.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Remove every entry whose URL equals `url` exactly. Deleting a URL that
    /// is not present is a no-op, not an error.
    async fn delete_url(&self, url: &str) -> Result<(), HistoryError>;
}

#[async_trait]
impl<T: HistoryStore + ?Sized> HistoryStore for &T {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<HistoryRecord>, HistoryError> {
        (**self).search(query).await
    }

    async fn delete_url(&self, url: &str) -> Result<(), HistoryError> {
        (**self).delete_url(url).await
    }
}

#[async_trait]
impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<HistoryRecord>, HistoryError> {
        (**self).search(query).await
    }

    async fn delete_url(&self, url: &str) -> Result<(), HistoryError> {
        (**self).delete_url(url).await
    }
}
