//! Modifier Shorthand Tables
//!
//! Community shorthand for every closed modifier vocabulary: element
//! colors (plus sub-attribute and dual-color variants), type tags,
//! evolution classes, awoken skills and misc flags. Each enum maps to
//! a fixed tuple of tokens; the derived sub/dual color tables are built
//! once on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::core::models::{Attribute, MonsterType};

/// Plain color tokens per attribute.
pub fn color_tokens(attr: Attribute) -> &'static [&'static str] {
    match attr {
        Attribute::Fire => &["r", "red", "fire"],
        Attribute::Water => &["b", "blue", "water"],
        Attribute::Wood => &["g", "green", "wood"],
        Attribute::Light => &["l", "light", "yellow"],
        Attribute::Dark => &["d", "dark", "purple"],
        Attribute::Nil => &["nil", "x", "none", "null", "white"],
    }
}

/// Type shorthand per type tag.
pub fn type_tokens(t: MonsterType) -> &'static [&'static str] {
    match t {
        MonsterType::Evolve => &["evolve"],
        MonsterType::Balance => &["balanced", "bal"],
        MonsterType::Physical => &["physical", "phys"],
        MonsterType::Healer => &["healer"],
        MonsterType::Dragon => &["dragon", "dra"],
        MonsterType::God => &["god"],
        MonsterType::Attacker => &["attacker", "atk"],
        MonsterType::Devil => &["devil", "dv"],
        MonsterType::Machine => &["machine", "mech"],
        MonsterType::Awoken => &["awoken"],
        MonsterType::Enhance => &["enhance", "fodder", "enh"],
        MonsterType::Vendor => &["vendor", "redeemable"],
    }
}

/// Evolution-class tags an index entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvoClass {
    Base,
    Evo,
    Uvo,
    Uuvo,
    Trans,
    Awoken,
    Mega,
    Revo,
    Srevo,
    Pixel,
    NonPixel,
}

/// Evolution-class shorthand.
pub fn evo_tokens(class: EvoClass) -> &'static [&'static str] {
    match class {
        EvoClass::Base => &["base"],
        EvoClass::Evo => &["evo", "evolved"],
        EvoClass::Uvo => &["uvo", "ult", "ultimate", "uevo"],
        EvoClass::Uuvo => &["uuvo", "uult", "uultimate", "uuevo", "suvo"],
        EvoClass::Trans => &["transform", "trans", "transformed"],
        EvoClass::Awoken => &["awoken", "awo", "a"],
        EvoClass::Mega => &["mega", "mawoken", "mawo", "ma", "megaawoken"],
        EvoClass::Revo => &["revo", "reincarnated", "rv"],
        EvoClass::Srevo => &["srevo", "super", "sr", "superreincarnated"],
        EvoClass::Pixel => &["pixel", "p", "dot", "px"],
        EvoClass::NonPixel => &["nonpixel", "np"],
    }
}

/// Misc modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiscTag {
    Chibi,
    Farmable,
    Rem,
    Mp,
    InJp,
    OnlyJp,
    InNa,
    OnlyNa,
}

/// Misc-flag shorthand.
pub fn misc_tokens(tag: MiscTag) -> &'static [&'static str] {
    match tag {
        MiscTag::Chibi => &["chibi", "mini"],
        MiscTag::Farmable => &["farmable"],
        MiscTag::Rem => &["rem"],
        MiscTag::Mp => &["mp"],
        MiscTag::InJp => &["injp"],
        MiscTag::OnlyJp => &["onlyjp", "jp"],
        MiscTag::InNa => &["inna"],
        MiscTag::OnlyNa => &["onlyna", "na"],
    }
}

/// Shorthand tokens for an awoken-skill id (1..=77 upstream skill
/// table). Unknown ids map to no tokens.
pub fn awakening_tokens(skill_id: u8) -> &'static [&'static str] {
    match skill_id {
        1 => &["hp+", "hp"],
        2 => &["atk+", "atk"],
        3 => &["rcv+", "rcv"],
        4 => &["elresr", "elres"],
        5 => &["elresb", "elres"],
        6 => &["elresg", "elres"],
        7 => &["elresl", "elres"],
        8 => &["elresd", "elres"],
        9 => &["autoheal"],
        10 => &["unbindable"],
        11 => &["resb"],
        12 => &["resj"],
        13 => &["resp"],
        14 => &["oer", "oe"],
        15 => &["oeb", "oe"],
        16 => &["oeg", "oe"],
        17 => &["oel", "oe"],
        18 => &["oed", "oe"],
        19 => &["te", "finger"],
        20 => &["bindrcv"],
        21 => &["sb"],
        22 => &["rowr", "row"],
        23 => &["rowb", "row"],
        24 => &["rowg", "row"],
        25 => &["rowl", "row"],
        26 => &["rowd", "row"],
        27 => &["tpa", "pronged"],
        28 => &["sbr"],
        29 => &["htpa", "oeh"],
        30 => &["multi", "mb"],
        31 => &["dk", "drk", "killer"],
        32 => &["gk", "gok", "killer"],
        33 => &["vk", "dek", "killer"],
        34 => &["mk", "mak", "killer"],
        35 => &["bk", "bak", "killer"],
        36 => &["ak", "aak", "killer"],
        37 => &["pk", "phk", "killer"],
        38 => &["hk", "hek", "killer"],
        39 => &["evok", "a2killer"],
        40 => &["awok", "a2killer"],
        41 => &["enhk", "a2killer"],
        42 => &["vendork", "a2killer"],
        43 => &["7c"],
        44 => &["gb"],
        45 => &["fua"],
        46 => &["teamhp", "thp"],
        47 => &["teamrcv", "trcv"],
        48 => &["vdp"],
        49 => &["equip", "assist", "eq"],
        50 => &["sfua"],
        51 => &["rainbowhaste", "skillcharge", "hasteawo"],
        52 => &["unbindable"],
        53 => &["te+", "finger+"],
        54 => &["cloudres"],
        55 => &["taperes"],
        56 => &["sb+"],
        57 => &[">80", "highhp"],
        58 => &["<50", "lowhp"],
        59 => &["elshield", "elh", "hel"],
        60 => &["el"],
        61 => &["10c"],
        62 => &["co", "corb"],
        63 => &["voice"],
        64 => &["dgbonus", "dgboost"],
        65 => &["hp-"],
        66 => &["atk-"],
        67 => &["rcv-"],
        68 => &["resb+", "b+"],
        69 => &["resj+", "j+"],
        70 => &["resp+", "p+"],
        71 => &["jblessing", "sfj", "jsurge"],
        72 => &["pblessing", "sfp", "psurge"],
        73 => &["ccr"],
        74 => &["ccb"],
        75 => &["ccg"],
        76 => &["ccl"],
        77 => &["ccd"],
        _ => &[],
    }
}

/// Multi-word phrases that always collapse into one token.
pub const MULTI_WORD_BUILTINS: &[&[&str]] = &[&["super", "reincarnated"], &["mega", "awoken"]];

/// Equip-style tags eligible for trailing-position fuzzy matching.
pub const LEGAL_END_TOKENS: &[&str] = &["equip", "assist", "eq"];

/// Name tokens that must never trigger modifier-group absorption.
pub const HAZARDOUS_IN_NAME_PREFIXES: &[&str] = &["reincarnated"];

const ALL_EVO_CLASSES: [EvoClass; 11] = [
    EvoClass::Base,
    EvoClass::Evo,
    EvoClass::Uvo,
    EvoClass::Uuvo,
    EvoClass::Trans,
    EvoClass::Awoken,
    EvoClass::Mega,
    EvoClass::Revo,
    EvoClass::Srevo,
    EvoClass::Pixel,
    EvoClass::NonPixel,
];

const ALL_MISC_TAGS: [MiscTag; 8] = [
    MiscTag::Chibi,
    MiscTag::Farmable,
    MiscTag::Rem,
    MiscTag::Mp,
    MiscTag::InJp,
    MiscTag::OnlyJp,
    MiscTag::InNa,
    MiscTag::OnlyNa,
];

const ALL_TYPES: [MonsterType; 12] = [
    MonsterType::Evolve,
    MonsterType::Balance,
    MonsterType::Physical,
    MonsterType::Healer,
    MonsterType::Dragon,
    MonsterType::God,
    MonsterType::Attacker,
    MonsterType::Devil,
    MonsterType::Machine,
    MonsterType::Awoken,
    MonsterType::Enhance,
    MonsterType::Vendor,
];

/// Derived token tables built once on first use: sub-attribute colors,
/// the full dual-color grid, and the flat group list used for
/// name-token modifier absorption.
pub struct TokenMaps {
    sub_color: HashMap<Attribute, Vec<String>>,
    dual_color: HashMap<(Attribute, Attribute), Vec<String>>,
    /// Every shorthand group (colors, sub, dual, types, awakenings,
    /// evo classes, misc), for "token appears in a group" lookups.
    groups: Vec<Vec<String>>,
}

impl TokenMaps {
    fn new() -> Self {
        let mut sub_color = HashMap::new();
        for attr in Attribute::ALL {
            let toks: Vec<String> = color_tokens(attr)
                .iter()
                .filter(|t| **t != "white")
                .map(|t| format!("?{t}"))
                .collect();
            sub_color.insert(attr, toks);
        }

        let mut dual_color = HashMap::new();
        for a1 in Attribute::ALL {
            for a2 in Attribute::ALL {
                let mut toks = Vec::new();
                for t1 in color_tokens(a1) {
                    for t2 in color_tokens(a2) {
                        if *t2 == "white" {
                            continue;
                        }
                        if t1.len() + t2.len() == 2 {
                            toks.push(format!("{t1}{t2}"));
                        }
                        if (t1.len() == 1) == (t2.len() == 1) {
                            toks.push(format!("{t1}/{t2}"));
                        }
                    }
                }
                dual_color.insert((a1, a2), toks);
            }
        }

        let mut groups: Vec<Vec<String>> = Vec::new();
        let owned = |ts: &'static [&'static str]| ts.iter().map(|t| t.to_string()).collect();
        for attr in Attribute::ALL {
            groups.push(owned(color_tokens(attr)));
            groups.push(sub_color[&attr].clone());
        }
        for key in dual_color.keys() {
            groups.push(dual_color[key].clone());
        }
        for t in ALL_TYPES {
            groups.push(owned(type_tokens(t)));
        }
        for id in 1..=77u8 {
            groups.push(owned(awakening_tokens(id)));
        }
        for class in ALL_EVO_CLASSES {
            groups.push(owned(evo_tokens(class)));
        }
        for tag in ALL_MISC_TAGS {
            groups.push(owned(misc_tokens(tag)));
        }

        Self {
            sub_color,
            dual_color,
            groups,
        }
    }

    pub fn sub_color_tokens(&self, attr: Attribute) -> &[String] {
        &self.sub_color[&attr]
    }

    pub fn dual_color_tokens(&self, a1: Attribute, a2: Attribute) -> &[String] {
        &self.dual_color[&(a1, a2)]
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }
}

static TOKEN_MAPS: OnceLock<TokenMaps> = OnceLock::new();

pub fn token_maps() -> &'static TokenMaps {
    TOKEN_MAPS.get_or_init(TokenMaps::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_color_skips_white() {
        let maps = token_maps();
        let nil = maps.sub_color_tokens(Attribute::Nil);
        assert!(nil.contains(&"?nil".to_string()));
        assert!(!nil.iter().any(|t| t.contains("white")));
    }

    #[test]
    fn test_dual_color_short_and_slashed_forms() {
        let maps = token_maps();
        let rb = maps.dual_color_tokens(Attribute::Fire, Attribute::Water);
        assert!(rb.contains(&"rb".to_string()));
        assert!(rb.contains(&"r/b".to_string()));
        assert!(rb.contains(&"red/blue".to_string()));
        // mixed single/word pairs get no slashed form
        assert!(!rb.contains(&"r/blue".to_string()));
    }

    #[test]
    fn test_equip_awakening_tokens() {
        assert_eq!(awakening_tokens(49), &["equip", "assist", "eq"]);
        assert!(awakening_tokens(200).is_empty());
    }

    #[test]
    fn test_groups_contain_type_shorthand() {
        let maps = token_maps();
        assert!(maps
            .groups()
            .iter()
            .any(|g| g.contains(&"dragon".to_string()) && g.contains(&"dra".to_string())));
    }
}
