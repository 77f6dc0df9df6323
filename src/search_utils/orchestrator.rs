use super::result_normalizer::{normalize_response, SearchPage};
use crate::{
    error::SearchError,
    github_api_utils::{
        query_builder::construct_query_string,
        search_client::{SearchRequest, SearchTransport},
    },
    state_utils::{events::SearchEvent, store::Store},
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// How a call to `fetch_search_results` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Blank search text, results were cleared and nothing was sent.
    Cleared,
    Succeeded { count: usize, total_count: u64 },
    Failed(SearchError),
    /// A newer request (or a clear) superseded this one, its response was dropped.
    Discarded,
}

/// Drives one search request from state to state.
pub struct SearchOrchestrator<T> {
    store: Store,
    transport: T,
    next_seq: AtomicU64,
    discard_stale_responses: bool,
    clock: fn() -> DateTime<Utc>,
}

impl<T: SearchTransport> SearchOrchestrator<T> {
    pub fn new(store: Store, transport: T, discard_stale_responses: bool) -> Self {
        SearchOrchestrator {
            store,
            transport,
            next_seq: AtomicU64::new(0),
            discard_stale_responses,
            clock: Utc::now,
        }
    }

    /// Overrides the "now" date filters are computed from.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs a search for whatever the store currently holds.
    ///
    /// Every result is reported through store events; the returned outcome
    /// is informational and never needs handling.
    pub async fn fetch_search_results(&self) -> FetchOutcome {
        let state = self.store.state();

        if state.search.search_text.trim().is_empty() {
            debug!("{}, clearing results", SearchError::EmptyQuery);
            self.store.dispatch(SearchEvent::ClearSearchResults);
            return FetchOutcome::Cleared;
        }

        let request = SearchRequest {
            query: construct_query_string(
                &state.search.search_text,
                &state.filters,
                (self.clock)(),
            ),
            sort: state.sorting.sort_type.clone(),
            order: state.sorting.order,
            page: state.search.pages_loaded + 1,
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        self.store.dispatch(SearchEvent::SearchRequest { seq });

        let result = self.run_search(&request).await;

        if self.discard_stale_responses && self.store.state().search.in_flight != Some(seq) {
            warn!(
                "Dropping stale response for request #{} ('{}')",
                seq, request.query
            );
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                let outcome = FetchOutcome::Succeeded {
                    count: page.items.len(),
                    total_count: page.total_count,
                };
                self.store
                    .dispatch(SearchEvent::UpdateSearchResults(page.items));
                self.store
                    .dispatch(SearchEvent::UpdateSearchResultsCountTotal(page.total_count));
                self.store.dispatch(SearchEvent::SearchSuccess);
                outcome
            }
            Err(err) => {
                error!("Search request #{} failed: {:?}", seq, err);
                self.store.dispatch(SearchEvent::SearchFailure(err.to_string()));
                FetchOutcome::Failed(err)
            }
        }
    }

    async fn run_search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        info!("Searching page {} for: {}", request.page, request.query);

        let response = match self.transport.get(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.status {
                    Some(status) => {
                        SearchError::from_status(status, err.status_text.as_deref().unwrap_or(""))
                    }
                    None => SearchError::Transport(err.message),
                })
            }
        };

        if response.status != 200 {
            return Err(SearchError::from_status(
                response.status,
                &response.status_text,
            ));
        }
        normalize_response(&response.body)
    }
}
