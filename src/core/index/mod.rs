//! Lexicon construction: override-sheet ingestion, name tokenization
//! and the one-shot index build.

pub mod builder;
pub mod error;
pub mod overrides;
pub mod shared;
pub mod tokenize;

#[cfg(test)]
pub mod test_fixture;

pub use builder::Lexicon;
pub use error::{IndexError, Result};
pub use overrides::{fetch_override_sheets, parse_sheet_csv, OverrideRow, OverrideSheets};
pub use shared::SharedLexicon;
pub use tokenize::{important_tokens, name_to_tokens};
