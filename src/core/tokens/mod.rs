//! Closed modifier-tag vocabulary.
//!
//! Colors, types, evolution classes, awakenings and misc flags are
//! tagged enums with associated shorthand tables; the query surface
//! only ever sees the shorthand strings.

pub mod maps;

pub use maps::{
    awakening_tokens, color_tokens, evo_tokens, misc_tokens, token_maps, type_tokens, EvoClass,
    MiscTag, TokenMaps, HAZARDOUS_IN_NAME_PREFIXES, LEGAL_END_TOKENS, MULTI_WORD_BUILTINS,
};
