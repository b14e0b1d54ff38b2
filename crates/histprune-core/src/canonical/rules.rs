//! Tracking-parameter denylist, kept as data so it can be extended from config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Exact parameter names stripped by default.
const DEFAULT_EXACT: &[&str] = &[
    "fbclid", "gclid", "msclkid", "icid", "spm", "cid", "campaign", "aff", "aff_id", "ref",
    "ref_", "mc_cid", "mc_eid",
];

/// Name prefixes stripped by default.
const DEFAULT_PREFIXES: &[&str] = &["utm_"];

/// Query parameter names that carry tracking state rather than identify a resource.
///
/// Matching is case-insensitive on the parameter name; values are never looked at.
/// Entries are lowercased on construction (including when read from config.toml),
/// so `FBCLID` in a config file behaves the same as `fbclid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RulesFile", into = "RulesFile")]
pub struct TrackingRules {
    exact: BTreeSet<String>,
    prefixes: Vec<String>,
}

/// On-disk shape of the `[tracking]` config section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RulesFile {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl Default for TrackingRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXACT.iter().copied(),
            DEFAULT_PREFIXES.iter().copied(),
        )
    }
}

impl TrackingRules {
    pub fn new<E, P>(exact: E, prefixes: P) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let exact = exact
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let mut out = Self {
            exact,
            prefixes: Vec::new(),
        };
        for p in prefixes {
            out = out.with_prefix(p.as_ref());
        }
        out
    }

    /// Rules that strip nothing. Canonicalization then only folds case, ports, order and slashes.
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<&str>(), std::iter::empty::<&str>())
    }

    /// Add an exact parameter name.
    pub fn with_exact(mut self, name: &str) -> Self {
        let name = name.to_lowercase();
        if !name.is_empty() {
            self.exact.insert(name);
        }
        self
    }

    /// Add a name prefix. An empty prefix would match every parameter and is ignored.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.to_lowercase();
        if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn exact(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Whether a (decoded) query parameter name is a tracking parameter.
    pub fn is_tracking(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.exact.contains(&lower) || self.prefixes.iter().any(|p| lower.starts_with(p.as_str()))
    }
}

impl From<RulesFile> for TrackingRules {
    fn from(file: RulesFile) -> Self {
        TrackingRules::new(file.exact, file.prefixes)
    }
}

impl From<TrackingRules> for RulesFile {
    fn from(rules: TrackingRules) -> Self {
        RulesFile {
            exact: rules.exact.into_iter().collect(),
            prefixes: rules.prefixes,
        }
    }
}
