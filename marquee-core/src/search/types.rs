//! Search domain types and state

use marquee_model::MovieSummary;

/// Where the current query is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No search outstanding (empty or too-short query, or nothing typed yet)
    #[default]
    Idle,
    /// Waiting for the quiet interval to elapse
    Debouncing,
    /// Catalog request in flight
    Fetching,
    /// Last fetch for the current query succeeded
    Succeeded,
    /// Last fetch for the current query failed
    Failed,
}

/// Observable search state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Current search query, exactly as typed
    pub query: String,
    /// Bumped on every query change; fetches carry the value they were
    /// issued under
    pub generation: u64,
    /// Lifecycle phase for `query`
    pub phase: SearchPhase,
    /// Results of the most recent completed fetch for the current query
    pub results: Vec<MovieSummary>,
    /// Whether a fetch for the current query is in flight
    pub is_loading: bool,
    /// Error message if the last fetch failed
    pub error: Option<String>,
}

impl SearchState {
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// True once the current query has settled (no debounce or fetch
    /// pending).
    pub fn is_settled(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::Idle | SearchPhase::Succeeded | SearchPhase::Failed
        )
    }

    pub(crate) fn reset_results(&mut self) {
        self.results.clear();
        self.error = None;
        self.is_loading = false;
    }
}
