use super::orchestrator::SearchOrchestrator;
use crate::{
    github_api_utils::search_client::SearchTransport,
    state_utils::{events::SearchEvent, store::Store, TypingTimeout},
};
use std::{sync::Arc, time::Duration};

/// Restarts a quiet-period timer on every keystroke and searches once typing
/// stops. Must be used from inside a tokio runtime.
pub struct Debouncer<T> {
    store: Store,
    orchestrator: Arc<SearchOrchestrator<T>>,
    delay: Duration,
}

impl<T: SearchTransport> Debouncer<T> {
    pub fn new(orchestrator: Arc<SearchOrchestrator<T>>, delay: Duration) -> Self {
        Debouncer {
            store: orchestrator.store().clone(),
            orchestrator,
            delay,
        }
    }

    /// Handles the new content of the search field.
    pub fn on_input(&self, text: impl Into<String>) {
        // the previous timer has to be gone before the next one exists
        if let Some(pending) = self.store.state().search.typing_timeout {
            pending.cancel();
        }
        self.store.dispatch(SearchEvent::UpdateSearchField(text.into()));

        let store = self.store.clone();
        let orchestrator = self.orchestrator.clone();
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.dispatch(SearchEvent::ClearSearchResults);
            // a separate task, so cancelling a fired timer can't abort the request;
            // the text is read from the store when the fetch runs
            tokio::spawn(async move {
                orchestrator.fetch_search_results().await;
            });
        });
        self.store.dispatch(SearchEvent::SetTypingTimeout(Some(TypingTimeout::new(
            timer.abort_handle(),
        ))));
    }
}
