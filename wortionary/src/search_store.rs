use std::sync::Arc;

use dictionary::{catalog, to_search_results, SearchFilters, SearchResult, WordLookup};
use tokio::sync::watch;

use crate::storage::{HistoryEntry, Storage};

const MIN_SUGGESTION_QUERY: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub status: SearchStatus,
    pub has_searched: bool,
    pub total_results: usize,
    pub current_page: u32,
    pub suggestions: Vec<String>,
    /// Active filter set, applied to every search.
    pub filters: SearchFilters,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: vec![],
            status: SearchStatus::Idle,
            has_searched: false,
            total_results: 0,
            current_page: 1,
            suggestions: vec![],
            filters: SearchFilters::default(),
        }
    }
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Search session: query text, results and suggestions, published to
/// subscribers on every transition.
///
/// Overlapping searches are not sequenced; whichever lookup resolves last
/// decides the published results.
pub struct SearchStore {
    lookup: Arc<dyn WordLookup>,
    history: Option<Storage>,
    suggestion_limit: usize,
    state: watch::Sender<SearchState>,
}

impl SearchStore {
    pub fn new(lookup: Arc<dyn WordLookup>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            lookup,
            history: None,
            suggestion_limit: catalog::DEFAULT_SUGGESTION_LIMIT,
            state,
        }
    }

    pub fn with_history(mut self, storage: Storage) -> Self {
        self.history = Some(storage);
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Looks `query` up under the active filters. `Some(filters)` replaces
    /// the active set before the lookup.
    pub async fn search(&self, query: &str, filters: Option<SearchFilters>) {
        let query = query.trim();
        if query.is_empty() {
            self.state.send_modify(|state| {
                if let Some(filters) = filters {
                    state.filters = filters;
                }
                state.results.clear();
                state.total_results = 0;
                state.has_searched = false;
                state.status = SearchStatus::Idle;
            });
            return;
        }

        self.state.send_modify(|state| {
            if let Some(filters) = filters {
                state.filters = filters;
            }
            state.query = query.to_owned();
            state.status = SearchStatus::Loading;
            state.has_searched = true;
        });
        let filters = self.state.borrow().filters.clone();
        tracing::debug!(query, ?filters, "searching");

        match self.lookup.lookup(query).await {
            Ok(words) => {
                let results = filters.apply(to_search_results(&words));
                let total = results.len();
                self.state.send_modify(|state| {
                    state.results = results;
                    state.total_results = total;
                    state.current_page = 1;
                    state.status = SearchStatus::Success;
                });
                self.add_to_history(query, total).await;
            }
            Err(error) => {
                tracing::warn!(query, %error, "search failed");
                self.state.send_modify(|state| {
                    state.results.clear();
                    state.total_results = 0;
                    state.status = SearchStatus::Error(error.to_string());
                });
            }
        }
    }

    pub fn clear_search(&self) {
        self.state.send_modify(|state| {
            let filters = std::mem::take(&mut state.filters);
            *state = SearchState {
                filters,
                ..SearchState::default()
            };
        });
    }

    pub fn set_query(&self, query: &str) {
        self.state.send_modify(|state| state.query = query.to_owned());
    }

    pub fn get_suggestions(&self, query: &str) {
        let suggestions = if query.trim().is_empty() || query.chars().count() < MIN_SUGGESTION_QUERY
        {
            vec![]
        } else {
            catalog::suggestions(query, self.suggestion_limit)
        };
        self.state.send_modify(|state| state.suggestions = suggestions);
    }

    pub fn clear_suggestions(&self) {
        self.state.send_modify(|state| state.suggestions.clear());
    }

    /// Replaces the active filters and re-runs the current query, if any.
    pub async fn set_filters(&self, filters: SearchFilters) {
        let query = self.state.borrow().query.clone();
        if query.trim().is_empty() {
            self.state.send_modify(|state| state.filters = filters);
        } else {
            self.search(&query, Some(filters)).await;
        }
    }

    pub async fn add_to_history(&self, query: &str, results_count: usize) {
        match &self.history {
            Some(storage) => {
                if let Err(error) = storage.add_history(query, results_count).await {
                    tracing::warn!(query, %error, "failed to record search history");
                }
            }
            None => tracing::debug!(query, "search history is not persisted"),
        }
    }

    pub async fn history(&self, limit: u32) -> sqlx::Result<Vec<HistoryEntry>> {
        match &self.history {
            Some(storage) => storage.recent_history(limit).await,
            None => Ok(vec![]),
        }
    }

    pub async fn clear_history(&self) -> sqlx::Result<u64> {
        match &self.history {
            Some(storage) => storage.clear_history().await,
            None => Ok(0),
        }
    }
}
