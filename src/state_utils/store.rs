use super::{
    events::{reduce, SearchEvent},
    AppState,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type Subscriber = Arc<dyn Fn(&SearchEvent, &AppState) + Send + Sync>;

struct StoreInner {
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// In-memory state container. Cloning gives another handle to the same state.
///
/// Subscribers run after the reducer, with the updated state and without any
/// lock held, so they may dispatch or subscribe themselves. A subscriber added
/// during a dispatch sees the next event, not the current one.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // a panicking subscriber must not brick the store
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Store {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        lock(&self.inner.state).clone()
    }

    pub fn dispatch(&self, event: SearchEvent) {
        let snapshot = {
            let mut state = lock(&self.inner.state);
            reduce(&mut state, &event);
            state.clone()
        };
        let subscribers = lock(&self.inner.subscribers).clone();
        for subscriber in subscribers {
            subscriber(&event, &snapshot);
        }
    }

    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&SearchEvent, &AppState) + Send + Sync + 'static,
    {
        lock(&self.inner.subscribers).push(Arc::new(subscriber));
    }
}

/// Test helper: a store that records every dispatched event.
#[cfg(test)]
pub(crate) fn recording_store(initial: AppState) -> (Store, Arc<Mutex<Vec<SearchEvent>>>) {
    let store = Store::new(initial);
    let events = Arc::new(Mutex::new(Vec::new()));
    let c_events = events.clone();
    store.subscribe(move |event, _| c_events.lock().unwrap().push(event.clone()));
    (store, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_utils::Status;

    #[test]
    fn dispatch_updates_state_and_notifies_subscribers() {
        let (store, events) = recording_store(AppState::default());
        store.dispatch(SearchEvent::UpdateSearchField("tokio".to_owned()));
        store.dispatch(SearchEvent::SearchRequest { seq: 1 });

        let state = store.state();
        assert_eq!(state.search.search_text, "tokio");
        assert_eq!(state.search.status, Status::Loading);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SearchEvent::UpdateSearchField("tokio".to_owned()),
                SearchEvent::SearchRequest { seq: 1 },
            ]
        );
    }

    #[test]
    fn subscribers_see_the_reduced_state() {
        let store = Store::new(AppState::default());
        let seen = Arc::new(Mutex::new(None));
        let c_seen = seen.clone();
        store.subscribe(move |_, state| {
            *c_seen.lock().unwrap() = Some(state.search.total_count);
        });
        store.dispatch(SearchEvent::UpdateSearchResultsCountTotal(12));
        assert_eq!(*seen.lock().unwrap(), Some(12));
    }

    #[test]
    fn clones_share_state() {
        let store = Store::new(AppState::default());
        let other = store.clone();
        other.dispatch(SearchEvent::UpdateSearchField("serde".to_owned()));
        assert_eq!(store.state().search.search_text, "serde");
    }

    #[test]
    fn subscribers_may_dispatch_and_subscribe() {
        let (store, events) = recording_store(AppState::default());
        let c_store = store.clone();
        let late_calls = Arc::new(Mutex::new(0));
        let c_late_calls = late_calls.clone();
        store.subscribe(move |event, _| {
            if *event == SearchEvent::SearchSuccess {
                c_store.dispatch(SearchEvent::UpdateSearchResultsCountTotal(99));
                let c_late_calls = c_late_calls.clone();
                c_store.subscribe(move |_, _| *c_late_calls.lock().unwrap() += 1);
            }
        });

        store.dispatch(SearchEvent::SearchSuccess);
        assert_eq!(store.state().search.total_count, 99);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SearchEvent::SearchSuccess,
                SearchEvent::UpdateSearchResultsCountTotal(99),
            ]
        );

        // one subscriber was added per success; it only sees later events
        store.dispatch(SearchEvent::ClearSearchResults);
        assert_eq!(*late_calls.lock().unwrap(), 1);
    }
}
