//! Similarity Primitives
//!
//! Approximate string equality used everywhere in the matcher: a
//! Jaro-Winkler score with a small 0.05 prefix weight, and a
//! prefix-aware variant that deterministically favors shorter
//! completions of a typed prefix.

const PREFIX_WEIGHT: f64 = 0.05;
const MAX_PREFIX: usize = 4;

/// Jaro-Winkler similarity in `[0, 1]`. Symmetric; exactly 1.0 iff the
/// strings are equal.
pub fn similarity(a: &str, b: &str) -> f64 {
    let jaro = strsim::jaro(a, b);
    if jaro <= 0.0 {
        return 0.0;
    }
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();
    jaro + prefix as f64 * PREFIX_WEIGHT * (1.0 - jaro)
}

/// Prefix-aware similarity of a query token against an index key.
///
/// A key that merely starts with the token scores `1 - len(key)/1000`:
/// always above any non-prefix fuzzy match, with a length-proportional
/// penalty that breaks ties toward the shorter, more specific key.
pub fn prefix_similarity(token: &str, candidate: &str) -> f64 {
    if token == candidate {
        1.0
    } else if candidate.starts_with(token) {
        1.0 - candidate.chars().count() as f64 / 1000.0
    } else {
        similarity(token, candidate)
    }
}
