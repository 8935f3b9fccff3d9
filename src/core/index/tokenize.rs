//! Name Tokenization
//!
//! Turns a display name into the normalized token set used as index
//! keys: lowercase, letters and digits only. Hyphen, plus and
//! apostrophe act as word separators, and the merged (separator
//! stripped) forms are produced as well, so "Anti-God" yields both
//! "anti"/"god" and "antigod".

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w ]").expect("static regex"))
}

fn parenthesized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.+\)").expect("static regex"))
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '
}

/// Full normalized token set for a name. Deterministic and idempotent.
pub fn name_to_tokens(name: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    if name.is_empty() {
        return tokens;
    }
    let lower = name.to_lowercase();

    // Separated forms: -+' become spaces, everything else non-alnum drops.
    let separated: String = lower
        .chars()
        .map(|c| if matches!(c, '-' | '+' | '\'') { ' ' } else { c })
        .filter(|&c| is_kept(c))
        .collect();
    tokens.extend(separated.split_whitespace().map(str::to_string));

    // Merged forms: whitespace words with all punctuation stripped.
    for word in lower.split_whitespace() {
        let merged: String = word.chars().filter(|&c| is_kept(c)).collect();
        if !merged.is_empty() {
            tokens.insert(merged);
        }
    }

    tokens
}

/// Word count of a name fragment, ignoring punctuation and any
/// parenthesized aside.
fn token_count(fragment: &str) -> usize {
    let stripped = non_word_re().replace_all(fragment, "");
    let stripped = parenthesized_re().replace_all(&stripped, "");
    stripped.split_whitespace().count()
}

/// Name-tier ("important") tokens. Names of the form "Long Title, Name"
/// keep only the clearly shorter comma-segment as important; everything
/// else in the name falls to the fluff tier.
pub fn important_tokens(name: &str) -> BTreeSet<String> {
    let segments: Vec<&str> = name.split(", ").collect();
    if segments.len() == 1 {
        return name_to_tokens(name);
    }
    let last = segments[segments.len() - 1];
    let head = segments[..segments.len() - 1].join(", ");
    let (hc, lc) = (token_count(&head), token_count(last));
    if hc == lc || hc.max(lc) < 3 {
        name_to_tokens(name)
    } else if hc < lc {
        name_to_tokens(&head)
    } else {
        name_to_tokens(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_lowercase_alnum() {
        let tokens = name_to_tokens("Loki, the Deceiver");
        for t in &tokens {
            assert!(t.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
        assert!(tokens.contains("loki"));
        assert!(tokens.contains("deceiver"));
    }

    #[test]
    fn test_separators_produce_merged_and_split_forms() {
        let tokens = name_to_tokens("Anti-God Slayer");
        assert!(tokens.contains("anti"));
        assert!(tokens.contains("god"));
        assert!(tokens.contains("antigod"));
        assert!(tokens.contains("slayer"));
    }

    #[test]
    fn test_tokenization_idempotent() {
        let first = name_to_tokens("Zeus-Dios' Wrath");
        let rejoined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        let second = name_to_tokens(&rejoined);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_name() {
        assert!(name_to_tokens("").is_empty());
    }

    #[test]
    fn test_important_tokens_pick_short_segment() {
        // "Awoken Deity of the Sky" (5 words) vs "Odin" (1)
        let important = important_tokens("Awoken Deity of the Sky, Odin");
        assert_eq!(important, name_to_tokens("Odin"));
    }

    #[test]
    fn test_important_tokens_keep_whole_short_names() {
        // both halves short: everything stays important
        let important = important_tokens("Loki, the Deceiver");
        assert_eq!(important, name_to_tokens("Loki, the Deceiver"));
    }

    #[test]
    fn test_important_tokens_ignore_parenthesized() {
        let important = important_tokens("Great Witch of the Hidden Forest, Cotton (Dark)");
        assert_eq!(important, name_to_tokens("Cotton (Dark)"));
    }
}
