//! Evolution Graph
//!
//! Read-only relation over monster ids: which forms share an evolution
//! line, which form is the base, and how each form is classified. Built
//! once from per-monster rows as an id-keyed arena with an adjacency
//! list per line, so alternate forms never hold pointers to each other.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::monster::MonsterId;

/// Raw evolution stage of a form within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvoStage {
    Base,
    Evolved,
    Ultimate,
    SuperUltimate,
}

/// "True" evolution classification, refining [`EvoStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrueEvoType {
    Normal,
    Reincarnated,
    SuperReincarnated,
    Pixel,
    Assist,
}

/// Per-monster graph row supplied by the catalog provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub monster_id: MonsterId,
    /// Base form of this monster's evolution line (may be itself).
    pub base_id: MonsterId,
    pub stage: EvoStage,
    pub true_type: TrueEvoType,
    /// A transform base is the pre-transform side of a transform pair.
    pub is_transform_base: bool,
    pub is_farmable_evo: bool,
    pub is_mp_evo: bool,
    pub is_rem_evo: bool,
}

/// Id-indexed evolution relation. Pure queries only; never mutated
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct EvolutionGraph {
    nodes: HashMap<MonsterId, GraphNode>,
    /// base_id -> every form on that line (including the base), id-sorted.
    lines: HashMap<MonsterId, Vec<MonsterId>>,
}

impl EvolutionGraph {
    pub fn from_nodes(rows: Vec<GraphNode>) -> Self {
        let mut nodes = HashMap::with_capacity(rows.len());
        let mut lines: HashMap<MonsterId, Vec<MonsterId>> = HashMap::new();
        for row in rows {
            lines.entry(row.base_id).or_default().push(row.monster_id);
            nodes.insert(row.monster_id, row);
        }
        for members in lines.values_mut() {
            members.sort_unstable();
        }
        Self { nodes, lines }
    }

    /// Every form on `id`'s evolution line, the queried form included.
    /// Unknown ids yield an empty slice.
    pub fn alt_forms(&self, id: MonsterId) -> &[MonsterId] {
        self.nodes
            .get(&id)
            .and_then(|n| self.lines.get(&n.base_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Base form of `id`'s line; falls back to `id` for unknown ids.
    pub fn base_id(&self, id: MonsterId) -> MonsterId {
        self.nodes.get(&id).map(|n| n.base_id).unwrap_or(id)
    }

    pub fn current_stage(&self, id: MonsterId) -> EvoStage {
        self.nodes.get(&id).map(|n| n.stage).unwrap_or(EvoStage::Base)
    }

    pub fn true_type(&self, id: MonsterId) -> TrueEvoType {
        self.nodes
            .get(&id)
            .map(|n| n.true_type)
            .unwrap_or(TrueEvoType::Normal)
    }

    pub fn is_base(&self, id: MonsterId) -> bool {
        self.base_id(id) == id
    }

    pub fn is_transform_base(&self, id: MonsterId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_transform_base)
    }

    pub fn is_farmable_evo(&self, id: MonsterId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_farmable_evo)
    }

    pub fn is_mp_evo(&self, id: MonsterId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_mp_evo)
    }

    pub fn is_rem_evo(&self, id: MonsterId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_rem_evo)
    }

    pub fn contains_id(&self, id: MonsterId) -> bool {
        self.nodes.contains_key(&id)
    }
}
