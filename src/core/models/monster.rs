//! Monster Record
//!
//! Immutable catalog entry supplied by the catalog provider. The index
//! only ever borrows these; it never mutates them after build.

use serde::{Deserialize, Serialize};

/// Numeric monster identifier. NA-region variants carry a +10000 offset.
pub type MonsterId = u32;

/// Element attribute of a monster (primary or secondary slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Fire,
    Water,
    Wood,
    Light,
    Dark,
    /// The "no element" sentinel. Its color tokens include "white".
    Nil,
}

impl Attribute {
    /// All attributes, in canonical order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Fire,
        Attribute::Water,
        Attribute::Wood,
        Attribute::Light,
        Attribute::Dark,
        Attribute::Nil,
    ];
}

/// Category type tag carried by a monster. A monster has one to three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterType {
    Evolve,
    Balance,
    Physical,
    Healer,
    Dragon,
    God,
    Attacker,
    Devil,
    Machine,
    Awoken,
    Enhance,
    Vendor,
}

/// One catalog entry. Field names follow the upstream data dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub monster_id: MonsterId,
    /// English (NA) display name.
    pub name_en: String,
    /// Japanese display name.
    pub name_ja: String,
    /// Romanized reading for monsters whose EN name is untranslated.
    pub roma_subname: Option<String>,
    pub attr1: Attribute,
    pub attr2: Attribute,
    /// Non-empty, ordered list of type tags.
    pub types: Vec<MonsterType>,
    pub rarity: u8,
    pub series_id: u32,
    /// English series name; drives automatic pantheon nicknames.
    pub series_name_en: String,
    /// Awoken-skill ids this monster carries, in slot order.
    pub awakenings: Vec<u8>,
    pub is_equip: bool,
    pub on_jp: bool,
    pub on_na: bool,
}
