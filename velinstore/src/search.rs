//! Search state store
//!
//! Remembers the last query and its results so navigating away from the
//! results page and back does not refetch.

use crate::store::Store;
use crossbeam_channel::Receiver;
use velinbackend::Podcast;

/// Search state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Podcast>,
    pub in_flight: bool,
}

/// Observable search store
#[derive(Clone, Default)]
pub struct SearchStore {
    state: Store<SearchState>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SearchState {
        self.state.get()
    }

    pub fn subscribe(&self) -> Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Mark a query as started, clearing previous results
    pub fn begin_query(&self, query: &str) {
        let query = query.to_string();
        self.state.update(|s| {
            s.query = query;
            s.results.clear();
            s.in_flight = true;
        });
    }

    /// Record the results of the query, unless a newer query superseded it
    pub fn finish_query(&self, query: &str, results: Vec<Podcast>) {
        self.state.update(|s| {
            if s.query == query {
                s.results = results;
                s.in_flight = false;
            }
        });
    }

    /// Record a failed query, leaving the results empty
    pub fn fail_query(&self, query: &str) {
        self.state.update(|s| {
            if s.query == query {
                s.in_flight = false;
            }
        });
    }

    pub fn clear(&self) {
        self.state.set(SearchState::default());
    }
}
