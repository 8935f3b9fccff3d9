//! Catalog data model: monster records and the evolution graph.

pub mod graph;
pub mod monster;

pub use graph::{EvoStage, EvolutionGraph, GraphNode, TrueEvoType};
pub use monster::{Attribute, Monster, MonsterId, MonsterType};
