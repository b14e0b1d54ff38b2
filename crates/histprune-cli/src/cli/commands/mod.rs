//! CLI command handlers. Each command is in its own file.

mod canonicalize;
mod config;
mod prune;

pub use canonicalize::{run_canonicalize, run_same};
pub use config::run_config;
pub use prune::run_prune;
