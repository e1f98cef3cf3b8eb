//! Ranked merge: pure fusion of provider batches into the displayed list
//!
//! Provider scores have no fixed scale across providers, so the merge
//! compensates with a query-similarity boost on the title instead of
//! trusting raw scores as absolute.

use super::types::ResultItem;
use std::cmp::Reverse;

/// Boost granted when the title matches the query exactly (case-insensitive)
const EXACT_BOOST: i64 = 1800;
/// Boost granted when the title starts with the query
const PREFIX_BOOST: i64 = 900;
/// Base boost for a substring occurrence, reduced by position
const SUBSTRING_BOOST: i64 = 500;
/// Penalty per byte of occurrence position, capped so the floor is 180
const POSITION_PENALTY: i64 = 20;
const MAX_POSITION_PENALTY: i64 = 320;

/// Tiered similarity boost of a title against the normalized (trimmed,
/// lower-cased) query. Earlier substring occurrences score higher.
pub fn query_match_boost(title: &str, normalized_query: &str) -> i64 {
    if normalized_query.is_empty() {
        return 0;
    }
    let title = title.to_lowercase();
    if title == normalized_query {
        return EXACT_BOOST;
    }
    if title.starts_with(normalized_query) {
        return PREFIX_BOOST;
    }
    match title.find(normalized_query) {
        Some(pos) => SUBSTRING_BOOST - (pos as i64 * POSITION_PENALTY).min(MAX_POSITION_PENALTY),
        None => 0,
    }
}

/// Fuse result batches into a single ordered list, capped at
/// [`crate::MAX_RESULTS`].
///
/// Sorted descending by `score + query_match_boost(title)`, ties broken by
/// shorter title first. Batch order only matters past that, which keeps the
/// output independent of provider completion order. Duplicate ids across
/// providers are left in place.
pub fn merge_ranked(batches: Vec<Vec<ResultItem>>, normalized_query: &str) -> Vec<ResultItem> {
    let mut merged: Vec<ResultItem> = batches.into_iter().flatten().collect();
    merged.sort_by_key(|item| {
        (
            Reverse(item.score + query_match_boost(&item.title, normalized_query)),
            item.title.len(),
        )
    });
    merged.truncate(crate::MAX_RESULTS);
    merged
}
