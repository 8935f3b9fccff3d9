//! End-to-end query resolution over a small hand-built catalog: one
//! evolution line with an equip, one reincarnated line, override
//! sheets and the full interpret / resolve / filter / expand pipeline.

use padlex::core::index::parse_sheet_csv;
use padlex::{
    Attribute, EvoStage, EvolutionGraph, GraphNode, Lexicon, MatchConfig, Monster, MonsterId,
    MonsterType, OverrideSheets, TrueEvoType,
};

fn monster(
    id: MonsterId,
    name_en: &str,
    series_id: u32,
    series_name: &str,
    rarity: u8,
) -> Monster {
    Monster {
        monster_id: id,
        name_en: name_en.to_string(),
        name_ja: name_en.to_string(),
        roma_subname: None,
        attr1: Attribute::Light,
        attr2: Attribute::Dark,
        types: vec![MonsterType::God],
        rarity,
        series_id,
        series_name_en: series_name.to_string(),
        awakenings: vec![21],
        is_equip: false,
        on_jp: true,
        on_na: true,
    }
}

fn node(id: MonsterId, base: MonsterId, stage: EvoStage, true_type: TrueEvoType) -> GraphNode {
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

fn build_lexicon() -> Lexicon {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut catalog = vec![
        monster(100, "Tyrfing", 1, "Ancient Norse", 5),
        monster(101, "Awoken Tyrfing", 1, "Ancient Norse", 6),
        monster(102, "Tyrfing's Edge", 1, "Ancient Norse", 6),
        monster(200, "Gleipnir", 2, "Bindings", 5),
        monster(201, "Reincarnated Gleipnir", 2, "Bindings", 6),
    ];
    for m in catalog.iter_mut() {
        if m.monster_id == 102 {
            m.is_equip = true;
            m.awakenings = vec![49];
        }
    }

    let graph = EvolutionGraph::from_nodes(vec![
        node(100, 100, EvoStage::Base, TrueEvoType::Normal),
        node(101, 100, EvoStage::Ultimate, TrueEvoType::Normal),
        node(102, 100, EvoStage::Evolved, TrueEvoType::Assist),
        node(200, 200, EvoStage::Base, TrueEvoType::Normal),
        node(201, 200, EvoStage::Ultimate, TrueEvoType::Reincarnated),
    ]);

    let overrides = OverrideSheets {
        nickname: parse_sheet_csv("100,tyr\n"),
        treename: parse_sheet_csv("200,chains\n"),
        pantheon: parse_sheet_csv(""),
        token_alias: parse_sheet_csv("token,alias\n"),
    };

    Lexicon::build(catalog, graph, &overrides, MatchConfig::default())
}

#[test]
fn equip_suffix_ranks_equip_first() {
    let lex = build_lexicon();
    let results = lex.query("tyrfing equip");
    assert_eq!(results[0].0, 102);
    // the rest of the line follows at a discount
    let ids: Vec<MonsterId> = results.iter().map(|r| r.0).collect();
    assert!(ids.contains(&100));
    assert!(ids.contains(&101));
    assert!(results[0].1 > results[1].1);
}

#[test]
fn bare_id_resolves_directly() {
    let lex = build_lexicon();
    let results = lex.query("101");
    assert_eq!(results[0].0, 101);
}

#[test]
fn manual_nickname_beats_prefix_match() {
    let lex = build_lexicon();
    let results = lex.query("tyr");
    // the nickname target outranks the forms reached via prefix keys
    assert_eq!(results[0].0, 100);
    assert!(results[0].1 > 1.0);
}

#[test]
fn treename_covers_whole_line() {
    let lex = build_lexicon();
    let results = lex.query("chains");
    let ids: Vec<MonsterId> = results.iter().map(|r| r.0).collect();
    assert!(ids.contains(&200));
    assert!(ids.contains(&201));
}

#[test]
fn conjunction_narrows_to_single_form() {
    let lex = build_lexicon();
    let results = lex.query("tyrfing edge");
    assert_eq!(results[0].0, 102);
}

#[test]
fn negative_modifier_demotes_form() {
    let lex = build_lexicon();
    let results = lex.query("-revo gleipnir");
    // the reincarnated form is filtered, then re-added by expansion at
    // a discount below the surviving match
    assert_eq!(results[0].0, 200);
    let revo = results.iter().find(|r| r.0 == 201).unwrap();
    assert!(revo.1 < results[0].1);
}

#[test]
fn leading_pantheon_modifier_with_merge() {
    let lex = build_lexicon();
    // "ancient norse" merges to the collapsed series nickname and acts
    // as a positive modifier over the whole line
    let results = lex.query("ancient norse tyrfing");
    let ids: Vec<MonsterId> = results.iter().map(|r| r.0).collect();
    assert!(ids.contains(&100));
    assert!(ids.contains(&101));
    assert!(ids.contains(&102));
    assert!(!ids.contains(&200));
}

#[test]
fn prefix_query_matches_completions() {
    let lex = build_lexicon();
    let results = lex.query("gleip");
    assert!(!results.is_empty());
    assert_eq!(results[0].0, 200);
    assert!(results[0].1 > 0.99);
}

#[test]
fn unknown_name_is_empty() {
    let lex = build_lexicon();
    assert!(lex.query("qqqqzzzz").is_empty());
}
