//! Shared fixture catalog for index and matcher tests: two evolution
//! lines (one with an equip, one reincarnated), an MP-shop monster and
//! a region-split pair.

use crate::config::MatchConfig;
use crate::core::models::{
    Attribute, EvoStage, EvolutionGraph, GraphNode, Monster, MonsterId, MonsterType, TrueEvoType,
};

use super::builder::Lexicon;
use super::overrides::{parse_sheet_csv, OverrideSheets};

pub fn monster(id: MonsterId, name_en: &str, rarity: u8) -> Monster {
    Monster {
        monster_id: id,
        name_en: name_en.to_string(),
        name_ja: name_en.to_string(),
        roma_subname: None,
        attr1: Attribute::Dark,
        attr2: Attribute::Fire,
        types: vec![MonsterType::God],
        rarity,
        series_id: 10,
        series_name_en: "Norse Gods".to_string(),
        awakenings: vec![21],
        is_equip: false,
        on_jp: true,
        on_na: true,
    }
}

pub fn node(
    id: MonsterId,
    base: MonsterId,
    stage: EvoStage,
    true_type: TrueEvoType,
) -> GraphNode {
    GraphNode {
        monster_id: id,
        base_id: base,
        stage,
        true_type,
        is_transform_base: false,
        is_farmable_evo: false,
        is_mp_evo: false,
        is_rem_evo: false,
    }
}

pub fn fixture_catalog() -> (Vec<Monster>, EvolutionGraph) {
    let mut catalog = vec![
        monster(1000, "Loki, the Deceiver", 4),
        monster(1001, "Awoken Loki, God of Trickery", 5),
        monster(1002, "Loki's Shadow Blade", 5),
        monster(2000, "Odin", 5),
        monster(2001, "Awoken Deity of the Sky, Odin", 6),
        monster(2002, "Odin's Spear", 6),
        monster(3000, "King Tamadra", 4),
        monster(4000, "Flame Dragon", 3),
        monster(14000, "Flame Dragon", 3),
    ];
    for m in catalog.iter_mut() {
        match m.monster_id {
            1002 | 2002 => {
                m.is_equip = true;
                m.awakenings = vec![49];
            }
            3000 => {
                m.series_id = 20;
                m.series_name_en = "Shop".to_string();
                m.types = vec![MonsterType::Devil];
            }
            4000 => {
                m.series_id = 30;
                m.series_name_en = "Dragons".to_string();
                m.types = vec![MonsterType::Dragon];
                m.on_na = false;
            }
            14000 => {
                m.series_id = 30;
                m.series_name_en = "Dragons".to_string();
                m.types = vec![MonsterType::Dragon];
                m.on_jp = false;
            }
            _ => {}
        }
    }

    let mut nodes = vec![
        node(1000, 1000, EvoStage::Base, TrueEvoType::Normal),
        node(1001, 1000, EvoStage::Ultimate, TrueEvoType::Normal),
        node(1002, 1000, EvoStage::Evolved, TrueEvoType::Assist),
        node(2000, 2000, EvoStage::Base, TrueEvoType::Normal),
        node(2001, 2000, EvoStage::Ultimate, TrueEvoType::Reincarnated),
        node(2002, 2000, EvoStage::Evolved, TrueEvoType::Assist),
        node(3000, 3000, EvoStage::Base, TrueEvoType::Normal),
        node(4000, 4000, EvoStage::Base, TrueEvoType::Normal),
        node(14000, 14000, EvoStage::Base, TrueEvoType::Normal),
    ];
    if let Some(n) = nodes.iter_mut().find(|n| n.monster_id == 3000) {
        n.is_mp_evo = true;
    }

    (catalog, EvolutionGraph::from_nodes(nodes))
}

pub fn fixture_overrides() -> OverrideSheets {
    OverrideSheets {
        nickname: parse_sheet_csv("1000,trickster\n"),
        treename: parse_sheet_csv("1000,loki tree\n"),
        pantheon: parse_sheet_csv(""),
        token_alias: parse_sheet_csv("token,alias\nodin,wodin\n"),
    }
}

pub fn fixture_lexicon() -> Lexicon {
    let (catalog, graph) = fixture_catalog();
    Lexicon::build(catalog, graph, &fixture_overrides(), MatchConfig::default())
}
