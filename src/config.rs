//! Crate configuration: override sheet locations and matching
//! thresholds. All structs deserialize with full defaults so an empty
//! config is always valid.

use serde::{Deserialize, Serialize};

const SHEETS_PATTERN: &str = "https://docs.google.com/spreadsheets/d/1EoZJ3w5xsXZ67kmarLE4vfrZSIIIAfj04HXeZVST3eY/pub?gid={}&single=true&output=csv";

fn sheet_url(gid: &str) -> String {
    SHEETS_PATTERN.replace("{}", gid)
}

/// Top-level lexicon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub overrides: OverrideConfig,
    pub matching: MatchConfig,
}

/// Locations of the four community override sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    pub nickname_url: String,
    pub treename_url: String,
    pub pantheon_url: String,
    pub token_alias_url: String,
    /// Per-request timeout for sheet fetches.
    pub request_timeout_secs: u64,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            nickname_url: sheet_url("0"),
            treename_url: sheet_url("2070615818"),
            pantheon_url: sheet_url("959933643"),
            token_alias_url: sheet_url("1229125459"),
            request_timeout_secs: 30,
        }
    }
}

/// Fuzzy-matching thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum similarity for a query token to count as a modifier
    /// (trailing-suffix and leading-modifier passes).
    pub modifier_similarity: f64,
    /// Minimum similarity for a name token to match an index key.
    pub token_similarity: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            modifier_similarity: 0.95,
            token_similarity: 0.8,
        }
    }
}
