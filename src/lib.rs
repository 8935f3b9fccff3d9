//! padlex - fuzzy monster-name query resolution
//!
//! Builds an immutable search lexicon from a monster catalog, its
//! evolution graph and community override sheets, then resolves free
//! form queries ("revo loki equip", "-mp tamadra", "2001") into ranked
//! monster ids.
//!
//! The pipeline: interpret the raw query into modifier and name
//! tokens, resolve name tokens conjunctively against the three-tier
//! token index, filter by modifier tags, expand surviving matches to
//! their evolution lines, and rank by score.

pub mod config;
pub mod core;

pub use config::{LexiconConfig, MatchConfig, OverrideConfig};
pub use core::find::{interpret_query, prefix_similarity, similarity, InterpretedQuery};
pub use core::index::{
    fetch_override_sheets, IndexError, Lexicon, OverrideRow, OverrideSheets, SharedLexicon,
};
pub use core::models::{
    Attribute, EvoStage, EvolutionGraph, GraphNode, Monster, MonsterId, MonsterType, TrueEvoType,
};

/// Crate version, for startup logging.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name, for startup logging.
pub const NAME: &str = env!("CARGO_PKG_NAME");
