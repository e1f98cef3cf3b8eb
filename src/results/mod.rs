//! Result types and ranked merge

mod rank;
mod types;

pub use rank::{merge_ranked, query_match_boost};
pub use types::{Category, ResultItem};
