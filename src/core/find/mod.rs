//! Query-time pipeline: similarity primitives, the query interpreter
//! and the matching/scoring engine.

pub mod interpret;
pub mod score;
pub mod similarity;

pub use interpret::{interpret_query, merge_multi_word_tokens, InterpretedQuery};
pub use similarity::{prefix_similarity, similarity};
