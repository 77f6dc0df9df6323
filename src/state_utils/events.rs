use super::{AppState, FilterSet, RepoSummary, SortSpec, Status, TypingTimeout};

/// Every state change goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    UpdateSearchField(String),
    SetTypingTimeout(Option<TypingTimeout>),
    ClearSearchResults,
    SearchRequest { seq: u64 },
    UpdateSearchResults(Vec<RepoSummary>),
    UpdateSearchResultsCountTotal(u64),
    SearchSuccess,
    SearchFailure(String),
    UpdateFilters(FilterSet),
    UpdateSorting(SortSpec),
}

/// Applies `event` to `state`.
pub fn reduce(state: &mut AppState, event: &SearchEvent) {
    let search = &mut state.search;
    match event {
        SearchEvent::UpdateSearchField(text) => search.search_text = text.clone(),
        SearchEvent::SetTypingTimeout(timeout) => search.typing_timeout = timeout.clone(),
        SearchEvent::ClearSearchResults => {
            search.results.clear();
            search.total_count = 0;
            search.pages_loaded = 0;
            search.status = Status::Idle;
            search.error_message = None;
            // responses still on the wire belong to a query that no longer exists
            search.in_flight = None;
        }
        SearchEvent::SearchRequest { seq } => {
            search.status = Status::Loading;
            search.in_flight = Some(*seq);
        }
        SearchEvent::UpdateSearchResults(results) => search.results = results.clone(),
        SearchEvent::UpdateSearchResultsCountTotal(count) => search.total_count = *count,
        SearchEvent::SearchSuccess => {
            search.status = Status::Success;
            search.error_message = None;
            search.pages_loaded += 1;
            search.in_flight = None;
        }
        SearchEvent::SearchFailure(message) => {
            search.status = Status::Failure;
            search.error_message = Some(message.clone());
            search.in_flight = None;
        }
        SearchEvent::UpdateFilters(filters) => state.filters = filters.clone(),
        SearchEvent::UpdateSorting(sorting) => state.sorting = sorting.clone(),
    }
}

/// Store subscriber forwarding events to the `log` facade.
pub fn log_event(event: &SearchEvent, state: &AppState) {
    match event {
        SearchEvent::SearchRequest { seq } => info!(
            "Search request #{} started for '{}'",
            seq, state.search.search_text
        ),
        SearchEvent::SearchSuccess => info!(
            "Search succeeded: {} of {} results, {} page(s) loaded",
            state.search.results.len(),
            state.search.total_count,
            state.search.pages_loaded
        ),
        SearchEvent::SearchFailure(message) => error!("Search failed: {}", message),
        SearchEvent::UpdateSearchResults(results) => {
            debug!("Received {} normalized results", results.len())
        }
        SearchEvent::SetTypingTimeout(_) => trace!("Typing timer rescheduled"),
        other => debug!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_resets_previous_error_and_counts_page() {
        let mut state = AppState::default();
        reduce(&mut state, &SearchEvent::SearchRequest { seq: 1 });
        reduce(&mut state, &SearchEvent::SearchFailure("boom".to_owned()));
        assert_eq!(state.search.status, Status::Failure);
        assert_eq!(state.search.error_message.as_deref(), Some("boom"));

        reduce(&mut state, &SearchEvent::SearchRequest { seq: 2 });
        assert_eq!(state.search.status, Status::Loading);
        assert_eq!(state.search.in_flight, Some(2));

        reduce(&mut state, &SearchEvent::SearchSuccess);
        assert_eq!(state.search.status, Status::Success);
        assert_eq!(state.search.error_message, None);
        assert_eq!(state.search.pages_loaded, 1);
        assert_eq!(state.search.in_flight, None);
    }

    #[test]
    fn clear_resets_results_and_pagination() {
        let mut state = AppState::default();
        reduce(&mut state, &SearchEvent::UpdateSearchField("rust".to_owned()));
        reduce(&mut state, &SearchEvent::UpdateSearchResultsCountTotal(42));
        reduce(&mut state, &SearchEvent::SearchSuccess);
        reduce(&mut state, &SearchEvent::SearchRequest { seq: 7 });

        reduce(&mut state, &SearchEvent::ClearSearchResults);
        assert!(state.search.results.is_empty());
        assert_eq!(state.search.total_count, 0);
        assert_eq!(state.search.pages_loaded, 0);
        assert_eq!(state.search.status, Status::Idle);
        assert_eq!(state.search.in_flight, None);
        // the input field keeps its text
        assert_eq!(state.search.search_text, "rust");
    }
}
