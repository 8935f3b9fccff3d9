//! Query Interpreter
//!
//! Splits a raw query into positive modifiers, negative modifiers and
//! name tokens:
//! 1. whitespace split, lowercased
//! 2. multi-word phrase merging
//! 3. trailing-suffix pass (right to left) for equip-style tags
//! 4. leading-modifier pass (left to right); everything from the first
//!    non-modifier token on is the name
//! 5. a final-modifier that is also a manual nickname flips back to a
//!    name token when no name remains

use std::collections::BTreeSet;

use crate::core::index::Lexicon;

use super::similarity::similarity;

/// Interpreted query: what to match (name tokens) and how to filter
/// (modifier sets). A leading `-` marks a modifier as negative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterpretedQuery {
    pub positive: BTreeSet<String>,
    pub negative: BTreeSet<String>,
    pub name_tokens: BTreeSet<String>,
}

/// Merge registered multi-word phrases into single tokens. Entries are
/// tried longest-first at each position; a component matches its raw
/// token exactly, or fuzzily when the component has 5+ chars.
pub fn merge_multi_word_tokens(
    tokens: &[String],
    multi_word: &[Vec<String>],
    threshold: f64,
) -> Vec<String> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut skip = 0usize;
    for (pos, token) in tokens.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let mut merged = None;
        for mwt in multi_word {
            if mwt.len() > tokens.len() - pos {
                continue;
            }
            let matches = mwt.iter().enumerate().all(|(i, comp)| {
                let raw = &tokens[pos + i];
                (raw == comp || comp.chars().count() >= 5) && similarity(raw, comp) >= threshold
            });
            if matches {
                skip = mwt.len() - 1;
                merged = Some(mwt.concat());
                break;
            }
        }
        result.push(merged.unwrap_or_else(|| token.clone()));
    }
    result
}

/// Interpret a raw query against the lexicon's vocabularies.
pub fn interpret_query(lexicon: &Lexicon, raw_query: &str) -> InterpretedQuery {
    let cfg = lexicon.match_config();
    let tokens: Vec<String> = raw_query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let mut tokens =
        merge_multi_word_tokens(&tokens, lexicon.multi_word_tokens(), cfg.token_similarity);

    let mut positive: Vec<String> = Vec::new();
    let mut negative: BTreeSet<String> = BTreeSet::new();
    let mut name: BTreeSet<String> = BTreeSet::new();

    // trailing-suffix pass: consume equip-style tags off the end
    let mut consumed = 0;
    for (i, token) in tokens.iter().rev().enumerate() {
        let negated = token.starts_with('-');
        let stripped = token.trim_start_matches('-');
        let is_suffix = lexicon
            .suffixes()
            .iter()
            .any(|s| similarity(s, stripped) >= cfg.modifier_similarity);
        if is_suffix {
            if negated {
                negative.insert(stripped.to_string());
            } else {
                positive.push(stripped.to_string());
            }
        } else {
            consumed = i;
            break;
        }
    }
    if consumed > 0 {
        let keep = tokens.len() - consumed;
        tokens.truncate(keep);
    }

    // leading-modifier pass; the first non-modifier starts the name
    let mut last_mod_positive = false;
    for (i, token) in tokens.iter().enumerate() {
        let negated = token.starts_with('-');
        let stripped = token.trim_start_matches('-');
        let is_modifier = lexicon.is_modifier(stripped)
            || (stripped.chars().count() >= 8
                && !lexicon.is_name_token(stripped)
                && lexicon
                    .long_modifiers()
                    .iter()
                    .any(|m| similarity(m, stripped) >= cfg.modifier_similarity));
        if is_modifier {
            if negated {
                last_mod_positive = false;
                negative.insert(stripped.to_string());
            } else {
                last_mod_positive = true;
                positive.push(stripped.to_string());
            }
        } else {
            name.extend(tokens[i..].iter().cloned());
            break;
        }
    }

    // a single-word query that is both a manual nickname and a modifier
    // resolves as the nickname
    if name.is_empty() && last_mod_positive {
        if let Some(last) = positive.last() {
            let is_manual = lexicon
                .manual_monsters(last)
                .is_some_and(|set| !set.is_empty());
            if is_manual {
                name.insert(positive.pop().expect("positive modifier present"));
            }
        }
    }

    InterpretedQuery {
        positive: positive.into_iter().collect(),
        negative,
        name_tokens: name,
    }
}
