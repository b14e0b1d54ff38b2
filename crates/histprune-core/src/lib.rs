//! Remove browser history entries that denote the same resource as a link.
//!
//! - [`canonical`]: raw URL → canonical form used only for equality.
//! - [`pruner`]: candidate search, matching, dedup and concurrent deletes.
//! - [`history`]: the store seam plus a Chromium-layout SQLite adapter.

pub mod canonical;
pub mod config;
pub mod history;
pub mod logging;
pub mod pruner;

pub use canonical::{canonicalize, same_resource, Canonicalizer, TrackingRules};
pub use history::{HistoryError, HistoryRecord, HistoryStore, SearchQuery, SqliteHistory};
pub use pruner::{HistoryPruner, PrunePlan, PruneReport};
