//! Matching & Scoring Engine
//!
//! Resolves interpreted name tokens against the three-tier token index
//! (conjunctively across tokens), filters by modifier tags, then
//! expands every surviving candidate to its full evolution line with a
//! deterministic score discount.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::index::Lexicon;
use crate::core::models::MonsterId;

use super::interpret::{interpret_query, InterpretedQuery};
use super::similarity::{prefix_similarity, similarity};

/// Score bonus that ranks manual-tier hits above name-tier ones.
const MANUAL_BONUS: f64 = 0.001;
/// Score discount applied to evolution-line siblings of a match.
const EVO_DISCOUNT: f64 = 0.003;

/// Resolve name tokens into a candidate set and running scores.
/// Conjunctive: every token must match; an empty candidate set at any
/// point is a definitive no-match.
pub fn resolve_name_tokens(
    lexicon: &Lexicon,
    tokens: &BTreeSet<String>,
) -> Option<(HashSet<MonsterId>, HashMap<MonsterId, f64>)> {
    let threshold = lexicon.match_config().token_similarity;
    let mut scores: HashMap<MonsterId, f64> = HashMap::new();
    let mut candidates: Option<HashSet<MonsterId>> = None;

    for token in tokens {
        // fuzzy keys best-first, then literal-prefix keys (kept even
        // below the fuzzy threshold)
        let mut fuzzy: Vec<(&String, f64)> = lexicon
            .all_name_tokens()
            .iter()
            .filter_map(|key| {
                let s = similarity(token, key);
                (s >= threshold).then_some((key, s))
            })
            .collect();
        fuzzy.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        let mut keys: Vec<&String> = fuzzy.into_iter().map(|(key, _)| key).collect();
        keys.extend(
            lexicon
                .all_name_tokens()
                .iter()
                .filter(|key| key.starts_with(token.as_str())),
        );
        if keys.is_empty() {
            return None;
        }

        // first (best) key to mention a monster claims its score for
        // this token; tiers are visited manual > name > fluff
        let mut valid: HashSet<MonsterId> = HashSet::new();
        for key in keys {
            if let Some(set) = lexicon.manual_monsters(key) {
                for &m in set {
                    if valid.insert(m) {
                        *scores.entry(m).or_default() +=
                            prefix_similarity(token, key) + MANUAL_BONUS;
                    }
                }
            }
            if let Some(set) = lexicon.name_monsters(key) {
                for &m in set {
                    if valid.insert(m) {
                        *scores.entry(m).or_default() += prefix_similarity(token, key);
                    }
                }
            }
            if let Some(set) = lexicon.fluff_monsters(key) {
                for &m in set {
                    if valid.insert(m) {
                        *scores.entry(m).or_default() += prefix_similarity(token, key) / 2.0;
                    }
                }
            }
        }

        match candidates.as_mut() {
            Some(set) => {
                set.retain(|m| valid.contains(m));
                if set.is_empty() {
                    return None;
                }
            }
            None => candidates = Some(valid),
        }
    }

    candidates.map(|set| (set, scores))
}

/// Score contribution of `token` against a monster's tag set, or
/// `None` when the tag is absent. Short tokens must match exactly;
/// 6+ char tokens may match fuzzily.
fn modifier_match(lexicon: &Lexicon, id: MonsterId, token: &str) -> Option<f64> {
    let mods = lexicon.modifier_set(id)?;
    if token.chars().count() < 6 {
        mods.contains(token).then_some(1.0)
    } else {
        let threshold = lexicon.match_config().token_similarity;
        let closest = mods
            .iter()
            .map(|m| similarity(m, token))
            .fold(0.0_f64, f64::max);
        (closest > threshold).then_some(closest)
    }
}

/// Apply positive then negative modifier filters. Only positive
/// matches contribute score. Empty after any filter is a definitive
/// no-match.
pub fn filter_modifiers(
    lexicon: &Lexicon,
    mut candidates: HashSet<MonsterId>,
    query: &InterpretedQuery,
    scores: &mut HashMap<MonsterId, f64>,
) -> Option<HashSet<MonsterId>> {
    for token in &query.positive {
        candidates.retain(|&m| match modifier_match(lexicon, m, token) {
            Some(bonus) => {
                *scores.entry(m).or_default() += bonus;
                true
            }
            None => false,
        });
        if candidates.is_empty() {
            return None;
        }
    }
    for token in &query.negative {
        candidates.retain(|&m| modifier_match(lexicon, m, token).is_none());
        if candidates.is_empty() {
            return None;
        }
    }
    Some(candidates)
}

/// Extend the scored set to each candidate's full evolution line.
/// Candidates are processed best-first; a sibling gets the candidate's
/// score minus the discount, and an existing equal-or-higher score is
/// never lowered.
pub fn expand_evolutions(
    lexicon: &Lexicon,
    candidates: &HashSet<MonsterId>,
    scores: &mut HashMap<MonsterId, f64>,
) -> HashSet<MonsterId> {
    let mut ordered: Vec<MonsterId> = candidates.iter().copied().collect();
    ordered.sort_by(|a, b| {
        let sa = scores.get(a).copied().unwrap_or(0.0);
        let sb = scores.get(b).copied().unwrap_or(0.0);
        sb.partial_cmp(&sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(b))
    });

    let mut result: HashSet<MonsterId> = HashSet::new();
    for m in ordered {
        result.insert(m);
        let discounted = scores.get(&m).copied().unwrap_or(0.0) - EVO_DISCOUNT;
        for &evo in lexicon.graph().alt_forms(m) {
            result.insert(evo);
            let entry = scores.entry(evo).or_insert(0.0);
            if *entry < discounted {
                *entry = discounted;
            }
        }
    }
    result
}

impl Lexicon {
    /// Resolve a raw query into monsters ranked by descending score
    /// (ties broken by id). Empty on no-match.
    pub fn query(&self, raw_query: &str) -> Vec<(MonsterId, f64)> {
        let interpreted = interpret_query(self, raw_query);
        let Some((candidates, mut scores)) = resolve_name_tokens(self, &interpreted.name_tokens)
        else {
            return Vec::new();
        };
        let Some(filtered) = filter_modifiers(self, candidates, &interpreted, &mut scores) else {
            return Vec::new();
        };
        // only survivors carry score into expansion
        scores.retain(|id, _| filtered.contains(id));
        let expanded = expand_evolutions(self, &filtered, &mut scores);

        let mut results: Vec<(MonsterId, f64)> = expanded
            .into_iter()
            .map(|m| (m, scores.get(&m).copied().unwrap_or(0.0)))
            .collect();
        results.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::test_fixture::fixture_lexicon;

    fn token_set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_conjunction_narrows() {
        let lex = fixture_lexicon();
        let (both, _) = resolve_name_tokens(&lex, &token_set(&["flame", "dragon"])).unwrap();
        let (flame_only, _) = resolve_name_tokens(&lex, &token_set(&["flame"])).unwrap();
        let (dragon_only, _) = resolve_name_tokens(&lex, &token_set(&["dragon"])).unwrap();
        assert!(both.is_subset(&flame_only));
        assert!(both.is_subset(&dragon_only));
    }

    #[test]
    fn test_empty_intersection_is_no_match() {
        let lex = fixture_lexicon();
        // "tamadra" must resolve to the king alone, no fuzzy or prefix
        // collision with any other index key
        let (only, _) = resolve_name_tokens(&lex, &token_set(&["tamadra"])).unwrap();
        assert_eq!(only, [3000].into_iter().collect());
        assert!(resolve_name_tokens(&lex, &token_set(&["loki", "tamadra"])).is_none());
        assert!(resolve_name_tokens(&lex, &token_set(&["zzzzqqq"])).is_none());
    }

    #[test]
    fn test_manual_tier_outscores_name_tier() {
        let lex = fixture_lexicon();
        let (_, scores) = resolve_name_tokens(&lex, &token_set(&["trickster"])).unwrap();
        // manual hit carries the +0.001 bonus
        assert!((scores[&1000] - 1.001).abs() < 1e-9);
    }

    #[test]
    fn test_name_tier_outscores_fluff_tier() {
        let lex = fixture_lexicon();
        let (_, scores) = resolve_name_tokens(&lex, &token_set(&["odin"])).unwrap();
        // "odin" is name tier for the Odin line
        assert!((scores[&2000] - 1.0).abs() < 1e-9);
        let (_, scores) = resolve_name_tokens(&lex, &token_set(&["deity"])).unwrap();
        // "deity" is fluff for 2001: half score
        assert!((scores[&2001] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_query_resolves_directly() {
        let lex = fixture_lexicon();
        let results = lex.query("2001");
        assert_eq!(results[0].0, 2001);
    }

    #[test]
    fn test_positive_modifier_filters_and_boosts() {
        let lex = fixture_lexicon();
        let (candidates, mut scores) =
            resolve_name_tokens(&lex, &token_set(&["odin"])).unwrap();
        let q = InterpretedQuery {
            positive: token_set(&["equip"]),
            ..Default::default()
        };
        let filtered = filter_modifiers(&lex, candidates, &q, &mut scores).unwrap();
        assert_eq!(filtered, [2002].into_iter().collect());
        // short modifier: exact match adds a flat 1.0
        assert!((scores[&2002] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsatisfiable_modifier_is_no_match() {
        let lex = fixture_lexicon();
        let (candidates, mut scores) =
            resolve_name_tokens(&lex, &token_set(&["tamadra"])).unwrap();
        let q = InterpretedQuery {
            positive: token_set(&["equip"]),
            ..Default::default()
        };
        assert!(filter_modifiers(&lex, candidates, &q, &mut scores).is_none());
    }

    #[test]
    fn test_negative_modifier_excludes_sole_match() {
        let lex = fixture_lexicon();
        let results = lex.query("-mp tamadra");
        assert!(results.is_empty());
    }

    #[test]
    fn test_negative_filter_awards_no_score() {
        let lex = fixture_lexicon();
        let (candidates, mut scores) =
            resolve_name_tokens(&lex, &token_set(&["odin"])).unwrap();
        let before = scores.clone();
        let q = InterpretedQuery {
            negative: token_set(&["revo"]),
            ..Default::default()
        };
        let filtered = filter_modifiers(&lex, candidates, &q, &mut scores).unwrap();
        assert!(!filtered.contains(&2001));
        // a filtered-out form keeps its resolution score untouched, so
        // later expansion cannot resurrect it above the survivors
        assert_eq!(scores, before);
    }

    #[test]
    fn test_expansion_covers_line_below_direct_match() {
        let lex = fixture_lexicon();
        let results = lex.query("deceiver");
        let ids: Vec<MonsterId> = results.iter().map(|r| r.0).collect();
        assert!(ids.contains(&1000));
        assert!(ids.contains(&1001));
        assert!(ids.contains(&1002));
        // direct match ranks first, siblings carry the discount
        assert_eq!(results[0].0, 1000);
        let direct = results[0].1;
        for (id, score) in &results[1..] {
            assert!(*score <= direct - EVO_DISCOUNT + 1e-9, "sibling {id} too high");
        }
    }

    #[test]
    fn test_expansion_never_lowers_existing_scores() {
        let lex = fixture_lexicon();
        let (candidates, mut scores) = resolve_name_tokens(&lex, &token_set(&["loki"])).unwrap();
        let before = scores.clone();
        expand_evolutions(&lex, &candidates, &mut scores);
        for (id, old) in before {
            assert!(scores[&id] >= old - 1e-12, "score lowered for {id}");
        }
    }

    #[test]
    fn test_query_sorted_descending() {
        let lex = fixture_lexicon();
        let results = lex.query("odin");
        for pair in results.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_no_name_tokens_is_empty_result() {
        let lex = fixture_lexicon();
        assert!(lex.query("").is_empty());
        assert!(lex.query("   ").is_empty());
    }
}
