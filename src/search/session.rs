//! Search session state

use crate::results::ResultItem;
use std::collections::HashMap;

/// Keyword routing currently in effect, surfaced to the UI as a badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveKeyword {
    /// Id of the provider owning the keyword
    pub provider_id: String,
    /// Query remainder with the keyword prefix stripped
    pub query: String,
}

/// Mutable session state. Single-writer: only the orchestrator mutates it;
/// the UI observes through [`SessionSnapshot`].
#[derive(Default)]
pub(crate) struct SessionState {
    pub query: String,
    pub results: Vec<ResultItem>,
    /// result id -> owning provider id (or the backend sentinel), replaced
    /// together with `results` under the same staleness guard
    pub origins: HashMap<String, String>,
    pub selected: usize,
    pub loading: bool,
    pub active_keyword: Option<ActiveKeyword>,
}

impl SessionState {
    /// Replace the visible result list, resetting selection and loading
    pub fn publish(&mut self, results: Vec<ResultItem>, origins: HashMap<String, String>) {
        self.results = results;
        self.origins = origins;
        self.selected = 0;
        self.loading = false;
    }

    /// Drop everything except the raw query text
    pub fn reset(&mut self) {
        self.results.clear();
        self.origins.clear();
        self.selected = 0;
        self.loading = false;
        self.active_keyword = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            results: self.results.clone(),
            selected: self.selected,
            loading: self.loading,
            active_keyword: self.active_keyword.clone(),
        }
    }
}

/// Read-only view of the session for the UI
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Raw query text as typed
    pub query: String,
    /// Ordered result list, at most [`crate::MAX_RESULTS`] entries
    pub results: Vec<ResultItem>,
    /// Selection index; 0 when the list is empty
    pub selected: usize,
    /// Whether a dispatch is in flight
    pub loading: bool,
    /// Keyword routing in effect for the current query, if any
    pub active_keyword: Option<ActiveKeyword>,
}
