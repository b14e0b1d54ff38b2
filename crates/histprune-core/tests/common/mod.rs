//! In-memory history store for integration tests.
//!
//! Records every search and delete, can be told to fail searches or specific
//! deletes, and tracks how many deletes were in flight at once.

use async_trait::async_trait;
use histprune_core::history::{HistoryError, HistoryRecord, HistoryStore, SearchQuery};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeStore {
    records: Vec<HistoryRecord>,
    fail_search: bool,
    fail_deletes: HashSet<String>,
    delete_delay: Option<Duration>,
    pub searches: Mutex<Vec<SearchQuery>>,
    pub deleted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeStore {
    /// Store whose search returns `urls` as-is, ignoring the query text.
    pub fn with_urls(urls: &[&str]) -> Self {
        Self::with_records(urls.iter().map(|u| HistoryRecord::new(*u)).collect())
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Default::default()
        }
    }

    pub fn fail_delete_of(mut self, url: &str) -> Self {
        self.fail_deletes.insert(url.to_string());
        self
    }

    pub fn with_delete_delay(mut self, delay: Duration) -> Self {
        self.delete_delay = Some(delay);
        self
    }

    pub fn deleted_sorted(&self) -> Vec<String> {
        let mut out = self.deleted.lock().unwrap().clone();
        out.sort();
        out
    }
}

#[async_trait]
impl HistoryStore for FakeStore {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.searches.lock().unwrap().push(query.clone());
        if self.fail_search {
            return Err(HistoryError::Query("store unavailable".to_string()));
        }
        Ok(self
            .records
            .iter()
            .take(query.max_results)
            .cloned()
            .collect())
    }

    async fn delete_url(&self, url: &str) -> Result<(), HistoryError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delete_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.deleted.lock().unwrap().push(url.to_string());
        if self.fail_deletes.contains(url) {
            return Err(HistoryError::delete(url, "rejected"));
        }
        Ok(())
    }
}
