//! Chromium-layout `History` database (SQLite via sqlx).
//!
//! Reads and deletes rows in the `urls` and `visits` tables. The browser keeps
//! the file locked while running, so point this at a closed profile or a copy.

mod db;
mod ops;

pub use db::SqliteHistory;
