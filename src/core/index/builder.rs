//! Lexicon Builder
//!
//! Consumes the catalog snapshot, the evolution graph and the override
//! sheets once at startup and produces the immutable search index:
//! the three-tier token index (manual / name / fluff), the per-monster
//! modifier-tag sets, the multi-word token dictionary and the token
//! alias map. After `build` returns, nothing in here is ever mutated;
//! a catalog refresh means building a fresh lexicon.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use log::{debug, info, warn};
use regex::Regex;

use crate::config::{LexiconConfig, MatchConfig};
use crate::core::models::{
    Attribute, EvoStage, EvolutionGraph, Monster, MonsterId, TrueEvoType,
};
use crate::core::tokens::{
    awakening_tokens, color_tokens, evo_tokens, misc_tokens, token_maps, type_tokens, EvoClass,
    MiscTag, HAZARDOUS_IN_NAME_PREFIXES, LEGAL_END_TOKENS, MULTI_WORD_BUILTINS,
};

use super::overrides::{fetch_override_sheets, OverrideSheets};
use super::tokenize::{important_tokens, name_to_tokens};

/// Id offset between the JP and NA catalog regions.
const REGION_ID_DELTA: MonsterId = 10000;

/// One tier of the token index.
type TokenTier = HashMap<String, HashSet<MonsterId>>;

fn possessive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+)'s").expect("static regex"))
}

fn collapse(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// The immutable search index. Built once; safe to share behind an
/// `Arc` for unlimited concurrent queries.
pub struct Lexicon {
    /// Combined manual tier (nickname + tree-nickname overrides).
    manual: TokenTier,
    name_tokens: TokenTier,
    fluff_tokens: TokenTier,
    /// Every key across the three tiers, sorted.
    all_name_tokens: Vec<String>,
    modifiers: HashMap<MonsterId, HashSet<String>>,
    all_modifiers: HashSet<String>,
    /// Modifier tags longer than 8 chars, for the interpreter's
    /// long-modifier fuzzy pass.
    long_modifiers: Vec<String>,
    /// Pre-sorted: longest tuple first, then longest concatenation.
    multi_word_tokens: Vec<Vec<String>>,
    suffixes: Vec<String>,
    monsters: HashMap<MonsterId, Monster>,
    graph: EvolutionGraph,
    config: MatchConfig,
}

impl Lexicon {
    /// Build the lexicon from an in-memory catalog snapshot and
    /// already-fetched override rows. Pure and synchronous.
    pub fn build(
        monsters: Vec<Monster>,
        graph: EvolutionGraph,
        overrides: &OverrideSheets,
        config: MatchConfig,
    ) -> Lexicon {
        Builder::new(monsters, graph, config).run(overrides)
    }

    /// Fetch the override sheets and build. A totally unreachable
    /// override source degrades to a derived-tokens-only lexicon
    /// instead of failing: name, fluff and modifier tiers are
    /// self-sufficient for most queries.
    pub async fn build_with_remote(
        monsters: Vec<Monster>,
        graph: EvolutionGraph,
        config: &LexiconConfig,
    ) -> Lexicon {
        let sheets = match fetch_override_sheets(&config.overrides).await {
            Ok(sheets) => sheets,
            Err(e) => {
                warn!("building degraded lexicon without overrides: {e}");
                OverrideSheets::empty()
            }
        };
        Self::build(monsters, graph, &sheets, config.matching)
    }

    pub fn manual_monsters(&self, token: &str) -> Option<&HashSet<MonsterId>> {
        self.manual.get(token)
    }

    pub fn name_monsters(&self, token: &str) -> Option<&HashSet<MonsterId>> {
        self.name_tokens.get(token)
    }

    pub fn fluff_monsters(&self, token: &str) -> Option<&HashSet<MonsterId>> {
        self.fluff_tokens.get(token)
    }

    /// Whether `token` is a key in any of the three tiers.
    pub fn is_name_token(&self, token: &str) -> bool {
        self.manual.contains_key(token)
            || self.name_tokens.contains_key(token)
            || self.fluff_tokens.contains_key(token)
    }

    pub fn all_name_tokens(&self) -> &[String] {
        &self.all_name_tokens
    }

    pub fn modifier_set(&self, id: MonsterId) -> Option<&HashSet<String>> {
        self.modifiers.get(&id)
    }

    pub fn is_modifier(&self, token: &str) -> bool {
        self.all_modifiers.contains(token)
    }

    pub fn long_modifiers(&self) -> &[String] {
        &self.long_modifiers
    }

    pub fn multi_word_tokens(&self) -> &[Vec<String>] {
        &self.multi_word_tokens
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(&id)
    }

    pub fn graph(&self) -> &EvolutionGraph {
        &self.graph
    }

    pub fn match_config(&self) -> MatchConfig {
        self.config
    }
}

/// Build-time state. Dissolves into a [`Lexicon`] when done.
struct Builder {
    monsters: HashMap<MonsterId, Monster>,
    graph: EvolutionGraph,
    config: MatchConfig,

    manual_nick: TokenTier,
    manual_tree: TokenTier,
    name_tokens: TokenTier,
    fluff_tokens: TokenTier,
    modifiers: HashMap<MonsterId, HashSet<String>>,

    pantheon: HashMap<u32, BTreeSet<String>>,
    multi_word: HashSet<Vec<String>>,
    replacements: HashMap<String, BTreeSet<String>>,
    nickname_overrides: HashMap<MonsterId, BTreeSet<String>>,
    nametoken_overrides: HashMap<MonsterId, BTreeSet<String>>,
    treename_overrides: HashMap<MonsterId, BTreeSet<String>>,
    /// Modifier shorthand groups, including pantheon nickname sets,
    /// for name-token absorption.
    absorb_groups: Vec<Vec<String>>,
}

impl Builder {
    fn new(monsters: Vec<Monster>, graph: EvolutionGraph, config: MatchConfig) -> Self {
        let monsters: HashMap<MonsterId, Monster> =
            monsters.into_iter().map(|m| (m.monster_id, m)).collect();

        // Every series auto-registers its collapsed EN name as a
        // pantheon nickname; spaced series names seed multi-word merging.
        let mut pantheon: HashMap<u32, BTreeSet<String>> = HashMap::new();
        let mut multi_word: HashSet<Vec<String>> = MULTI_WORD_BUILTINS
            .iter()
            .map(|mwt| mwt.iter().map(|t| t.to_string()).collect())
            .collect();
        for m in monsters.values() {
            pantheon
                .entry(m.series_id)
                .or_default()
                .insert(collapse(&m.series_name_en));
            if m.series_name_en.contains(' ') {
                multi_word.insert(
                    m.series_name_en
                        .to_lowercase()
                        .split_whitespace()
                        .map(str::to_string)
                        .collect(),
                );
            }
        }

        Self {
            monsters,
            graph,
            config,
            manual_nick: TokenTier::new(),
            manual_tree: TokenTier::new(),
            name_tokens: TokenTier::new(),
            fluff_tokens: TokenTier::new(),
            modifiers: HashMap::new(),
            pantheon,
            multi_word,
            replacements: HashMap::new(),
            nickname_overrides: HashMap::new(),
            nametoken_overrides: HashMap::new(),
            treename_overrides: HashMap::new(),
            absorb_groups: Vec::new(),
        }
    }

    fn run(mut self, overrides: &OverrideSheets) -> Lexicon {
        self.ingest_overrides(overrides);

        self.absorb_groups = token_maps().groups().to_vec();
        self.absorb_groups
            .extend(self.pantheon.values().map(|s| s.iter().cloned().collect::<Vec<String>>()));

        let mut ids: Vec<MonsterId> = self.monsters.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            self.index_monster(id);
        }

        self.finish()
    }

    /// Fold the four override row sets into build-time lookup tables.
    /// Rows failing shape validation are skipped, never fatal.
    fn ingest_overrides(&mut self, overrides: &OverrideSheets) {
        for row in &overrides.nickname {
            let Some(id) = row.numeric_key() else {
                debug!("nickname row with non-numeric key skipped: {:?}", row.key);
                continue;
            };
            if row.is_ignored() {
                continue;
            }
            if row.is_literal_tokens() {
                self.nametoken_overrides
                    .entry(id)
                    .or_default()
                    .extend(name_to_tokens(&row.name));
            } else {
                self.register_spaced(&row.name);
                self.nickname_overrides
                    .entry(id)
                    .or_default()
                    .insert(collapse(&row.name));
            }
        }

        for row in &overrides.treename {
            let Some(id) = row.numeric_key() else {
                debug!("treename row with non-numeric key skipped: {:?}", row.key);
                continue;
            };
            if row.is_ignored() {
                continue;
            }
            self.register_spaced(&row.name);
            self.treename_overrides
                .entry(id)
                .or_default()
                .insert(collapse(&row.name));
        }

        for row in &overrides.pantheon {
            let Some(sid) = row.numeric_key() else {
                continue;
            };
            self.register_spaced(&row.name);
            self.pantheon
                .entry(sid)
                .or_default()
                .insert(collapse(&row.name));
        }

        // first alias row is the sheet heading
        for row in overrides.token_alias.iter().skip(1) {
            self.replacements
                .entry(row.key.to_lowercase())
                .or_default()
                .insert(row.name.trim().to_lowercase());
        }
    }

    fn register_spaced(&mut self, name: &str) {
        if name.contains(' ') {
            self.multi_word.insert(
                name.to_lowercase()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            );
        }
    }

    fn index_monster(&mut self, id: MonsterId) {
        let m = self.monsters[&id].clone();
        let alts: Vec<MonsterId> = self.graph.alt_forms(id).to_vec();
        let mut mods = self.compute_modifiers(&m);

        // bare numeric queries resolve directly
        self.name_tokens.entry(id.to_string()).or_default().insert(id);
        self.name_tokens
            .entry((id % REGION_ID_DELTA).to_string())
            .or_default()
            .insert(id);

        let derived = name_to_tokens(&m.name_en);

        // Manual literal-token overrides recorded against any form of
        // the line apply here only if this form independently derives
        // the same token (cross-form agreement).
        for &alt in &alts {
            if let Some(tokens) = self.nametoken_overrides.get(&alt).cloned() {
                for t in &tokens {
                    if derived.contains(t) {
                        self.promote_to_name(t, id);
                    }
                }
            }
        }

        let mut important = important_tokens(&m.name_en);
        if let Some(roma) = &m.roma_subname {
            important.extend(name_to_tokens(roma));
        }

        if m.is_equip {
            // "X's" equips lend the possessive token to every form
            // whose name literally contains it.
            let lower = m.name_en.to_lowercase();
            for cap in possessive_re().captures_iter(&lower) {
                let owner = cap[1].to_string();
                for &alt in &alts {
                    let named = self
                        .monsters
                        .get(&alt)
                        .is_some_and(|me| me.name_en.to_lowercase().contains(&owner));
                    if named {
                        self.promote_to_name(&owner, alt);
                    }
                }
            }
        }

        for token in &important {
            self.insert_with_aliases(Tier::Name, token, id);
            if !m.is_equip {
                // plain-name tokens propagate to siblings that derive
                // the same token from their own name
                for &alt in &alts {
                    if alt == id {
                        continue;
                    }
                    let shared = self
                        .monsters
                        .get(&alt)
                        .is_some_and(|me| name_to_tokens(&me.name_en).contains(token));
                    if shared {
                        self.insert_with_aliases(Tier::Name, token, alt);
                    }
                }
            }
            if !HAZARDOUS_IN_NAME_PREFIXES.contains(&token.as_str()) {
                self.absorb_modifier_groups(token, &mut mods);
            }
        }

        // whatever the name derives beyond the name tier is fluff
        for token in &derived {
            if self
                .name_tokens
                .get(token)
                .is_some_and(|set| set.contains(&id))
            {
                continue;
            }
            self.insert_with_aliases(Tier::Fluff, token, id);
            self.absorb_modifier_groups(token, &mut mods);
        }

        if let Some(nicks) = self.nickname_overrides.get(&id).cloned() {
            for nick in &nicks {
                self.manual_nick.entry(nick.clone()).or_default().insert(id);
                self.absorb_modifier_groups(nick, &mut mods);
            }
        }

        let base = self.graph.base_id(id);
        if let Some(nicks) = self.treename_overrides.get(&base).cloned() {
            for nick in &nicks {
                self.manual_tree.entry(nick.clone()).or_default().insert(id);
                self.absorb_modifier_groups(nick, &mut mods);
            }
        }

        self.modifiers.insert(id, mods);
    }

    fn insert_with_aliases(&mut self, tier: Tier, token: &str, id: MonsterId) {
        let aliases: Vec<String> = self
            .replacements
            .get(token)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        match tier {
            Tier::Name => {
                self.promote_to_name(token, id);
                for alias in &aliases {
                    self.promote_to_name(alias, id);
                }
            }
            Tier::Fluff => {
                self.fluff_tokens.entry(token.to_string()).or_default().insert(id);
                for alias in &aliases {
                    self.fluff_tokens.entry(alias.clone()).or_default().insert(id);
                }
            }
        }
    }

    /// Insert a name-tier entry. A (token, monster) pair lives in one
    /// tier only, so any fluff entry written by an earlier pass is
    /// withdrawn here.
    fn promote_to_name(&mut self, token: &str, id: MonsterId) {
        self.name_tokens.entry(token.to_string()).or_default().insert(id);
        if let Some(set) = self.fluff_tokens.get_mut(token) {
            set.remove(&id);
            if set.is_empty() {
                self.fluff_tokens.remove(token);
            }
        }
    }

    /// A name token that coincides with modifier shorthand pulls that
    /// whole shorthand group into the monster's tag set.
    fn absorb_modifier_groups(&self, token: &str, mods: &mut HashSet<String>) {
        for group in &self.absorb_groups {
            if group.iter().any(|t| t == token) {
                mods.extend(group.iter().cloned());
            }
        }
    }

    /// Evaluate every modifier rule independently; a monster may
    /// accumulate any number of tags.
    fn compute_modifiers(&self, m: &Monster) -> HashSet<String> {
        let maps = token_maps();
        let id = m.monster_id;
        let mut mods: HashSet<String> = HashSet::new();
        let mut add = |mods: &mut HashSet<String>, tokens: &[&str]| {
            mods.extend(tokens.iter().map(|t| t.to_string()));
        };

        // colors
        add(&mut mods, color_tokens(m.attr1));
        mods.extend(maps.sub_color_tokens(m.attr2).iter().cloned());
        if m.attr1 == Attribute::Nil {
            add(&mut mods, color_tokens(m.attr2));
        }
        mods.extend(maps.dual_color_tokens(m.attr1, m.attr2).iter().cloned());

        for t in &m.types {
            add(&mut mods, type_tokens(*t));
        }

        if let Some(names) = self.pantheon.get(&m.series_id) {
            mods.extend(names.iter().cloned());
        }

        // rarity of this form and of the line's base form
        mods.insert(format!("{}*", m.rarity));
        let base_rarity = self
            .monsters
            .get(&self.graph.base_id(id))
            .map(|b| b.rarity)
            .unwrap_or(m.rarity);
        mods.insert(format!("{base_rarity}*b"));

        if self.graph.is_base(id) {
            add(&mut mods, evo_tokens(EvoClass::Base));
        }

        let en = m.name_en.to_lowercase();
        let true_type = self.graph.true_type(id);
        // awakened/reincarnated/mega forms are exempt from the plain
        // evo/uvo/uuvo stage tags
        let special_evo = m.name_ja.contains("覚醒")
            || en.contains("awoken")
            || m.name_ja.contains("転生")
            || en.contains("reincarnated")
            || true_type == TrueEvoType::Reincarnated
            || true_type == TrueEvoType::SuperReincarnated
            || m.is_equip
            || m.name_ja.contains("極醒");

        if !special_evo {
            match self.graph.current_stage(id) {
                EvoStage::Evolved => add(&mut mods, evo_tokens(EvoClass::Evo)),
                EvoStage::Ultimate => add(&mut mods, evo_tokens(EvoClass::Uvo)),
                EvoStage::SuperUltimate => add(&mut mods, evo_tokens(EvoClass::Uuvo)),
                EvoStage::Base => {}
            }
        }

        if !self.graph.is_transform_base(id) {
            add(&mut mods, evo_tokens(EvoClass::Trans));
        }

        if m.name_ja.contains("覚醒") || en.contains("awoken") {
            add(&mut mods, evo_tokens(EvoClass::Awoken));
        }
        if m.name_ja.contains("極醒") || en.contains("mega awoken") {
            add(&mut mods, evo_tokens(EvoClass::Mega));
        }
        if true_type == TrueEvoType::Reincarnated {
            add(&mut mods, evo_tokens(EvoClass::Revo));
        }
        if m.name_ja.contains("超転生") || true_type == TrueEvoType::SuperReincarnated {
            add(&mut mods, evo_tokens(EvoClass::Srevo));
        }

        // exactly one of pixel / nonpixel always applies
        if m.name_ja.starts_with("ドット")
            || en.starts_with("pixel")
            || true_type == TrueEvoType::Pixel
        {
            add(&mut mods, evo_tokens(EvoClass::Pixel));
        } else {
            add(&mut mods, evo_tokens(EvoClass::NonPixel));
        }

        for &skill in &m.awakenings {
            add(&mut mods, awakening_tokens(skill));
        }

        let chibi = (m.name_en == en && m.name_en != m.name_ja)
            || m.name_ja.contains("ミニ")
            || en.contains("(chibi)");
        if chibi {
            add(&mut mods, misc_tokens(MiscTag::Chibi));
        }

        if self.graph.is_farmable_evo(id) || self.graph.is_mp_evo(id) {
            add(&mut mods, misc_tokens(MiscTag::Farmable));
        }
        if self.graph.is_mp_evo(id) {
            add(&mut mods, misc_tokens(MiscTag::Mp));
        }
        if self.graph.is_rem_evo(id) {
            add(&mut mods, misc_tokens(MiscTag::Rem));
        }

        if m.on_jp {
            add(&mut mods, misc_tokens(MiscTag::InJp));
            if !m.on_na {
                add(&mut mods, misc_tokens(MiscTag::OnlyJp));
            }
        }
        if m.on_na {
            add(&mut mods, misc_tokens(MiscTag::InNa));
            if !m.on_jp {
                add(&mut mods, misc_tokens(MiscTag::OnlyNa));
            }
        }
        if self.graph.contains_id(id + REGION_ID_DELTA) {
            mods.insert("idjp".to_string());
        }
        if id > REGION_ID_DELTA {
            mods.insert("idna".to_string());
        }

        mods
    }

    fn finish(self) -> Lexicon {
        let mut manual = self.manual_nick;
        for (token, set) in self.manual_tree {
            manual.entry(token).or_default().extend(set);
        }

        let mut all_name_tokens: BTreeSet<String> = BTreeSet::new();
        all_name_tokens.extend(manual.keys().cloned());
        all_name_tokens.extend(self.name_tokens.keys().cloned());
        all_name_tokens.extend(self.fluff_tokens.keys().cloned());
        let all_name_tokens: Vec<String> = all_name_tokens.into_iter().collect();

        let all_modifiers: HashSet<String> = self
            .modifiers
            .values()
            .flat_map(|set| set.iter().cloned())
            .collect();
        let mut long_modifiers: Vec<String> = all_modifiers
            .iter()
            .filter(|t| t.chars().count() > 8)
            .cloned()
            .collect();
        long_modifiers.sort_unstable();

        let mut multi_word_tokens: Vec<Vec<String>> = self.multi_word.into_iter().collect();
        multi_word_tokens.sort_by(|a, b| {
            let ka = (a.len(), a.iter().map(String::len).sum::<usize>());
            let kb = (b.len(), b.iter().map(String::len).sum::<usize>());
            kb.cmp(&ka).then_with(|| a.cmp(b))
        });

        info!(
            "lexicon built: {} monsters, {} name keys, {} manual keys, {} fluff keys, {} modifiers",
            self.monsters.len(),
            self.name_tokens.len(),
            manual.len(),
            self.fluff_tokens.len(),
            all_modifiers.len(),
        );

        Lexicon {
            manual,
            name_tokens: self.name_tokens,
            fluff_tokens: self.fluff_tokens,
            all_name_tokens,
            modifiers: self.modifiers,
            all_modifiers,
            long_modifiers,
            multi_word_tokens,
            suffixes: LEGAL_END_TOKENS.iter().map(|s| s.to_string()).collect(),
            monsters: self.monsters,
            graph: self.graph,
            config: self.config,
        }
    }
}

enum Tier {
    Name,
    Fluff,
}
