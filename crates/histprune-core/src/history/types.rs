//! Types exchanged with a history store.

use thiserror::Error;

/// One stored history entry. Owned by the store; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryRecord {
    /// Raw stored URL. May be empty for damaged rows.
    pub url: String,
    pub title: Option<String>,
    pub visit_count: i64,
    /// Store-native timestamp of the latest visit.
    pub last_visit_time: i64,
}

impl HistoryRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Bounded candidate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text matched loosely against URL and title.
    pub text: String,
    pub max_results: usize,
    /// Lower bound on last visit time; `0` searches the whole retained history.
    pub start_time: i64,
}

impl HistoryError {
    /// Wrap a store-specific failure for one URL.
    pub fn delete(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        HistoryError::Delete {
            url: url.into(),
            source: source.into(),
        }
    }
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, max_results: usize) -> Self {
        Self {
            text: text.into(),
            max_results,
            start_time: 0,
        }
    }
}

/// Failure reported by a history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history search failed: {0}")]
    Query(String),

    #[error("could not delete {url} from history: {source}")]
    Delete {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("history database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("history I/O: {0}")]
    Io(#[from] std::io::Error),
}
