//! Traversal cursor
//!
//! Bookkeeping shared by the blocking and async paginators.

use super::tracker::TokenTracker;
use crate::contract::PaginationContract;
use crate::types::{JsonObject, JsonValue, Page};
use tracing::debug;

/// Position of a traversal: pages fetched so far, the current page and
/// whether any further fetch is allowed.
#[derive(Debug, Clone)]
pub struct TraversalCursor {
    params: JsonObject,
    tracker: TokenTracker,
    fetched: usize,
    current: Option<Page>,
    terminal: bool,
}

impl TraversalCursor {
    /// Create a cursor bound to a contract and the initial request parameters
    pub fn new(contract: PaginationContract, params: JsonObject) -> Self {
        Self {
            params,
            tracker: TokenTracker::new(contract),
            fetched: 0,
            current: None,
            terminal: false,
        }
    }

    /// Parameters for the next fetch, or `None` once terminal.
    ///
    /// The first request uses the initial parameters as-is; later requests
    /// overlay the tokens taken from the previous page.
    pub fn next_request(&self) -> Option<JsonObject> {
        if self.terminal {
            return None;
        }
        let mut params = self.params.clone();
        for (key, value) in self.tracker.tokens() {
            params.insert(key.clone(), value.clone());
        }
        Some(params)
    }

    /// Record a fetched page and return its sequence number
    pub fn record(&mut self, page: Page) -> usize {
        let sequence = self.fetched;
        self.fetched += 1;
        if self.tracker.observe(&page).is_done() {
            debug!(sequence, "Pagination complete");
            self.terminal = true;
        }
        self.current = Some(page);
        sequence
    }

    /// Stop the traversal; no further fetch will happen
    pub fn terminate(&mut self) {
        self.terminal = true;
    }

    /// Most recently fetched page
    pub fn current(&self) -> Option<&Page> {
        self.current.as_ref()
    }

    /// Sequence number of the current page
    pub fn sequence(&self) -> Option<usize> {
        self.fetched.checked_sub(1)
    }

    /// Number of pages fetched so far
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Check whether a page has been fetched yet
    pub fn is_started(&self) -> bool {
        self.fetched > 0
    }

    /// Check whether traversal is over
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Token value that will be sent for an input field on the next request
    pub fn next_token(&self, input_field: &str) -> Option<&JsonValue> {
        self.tracker.token(input_field)
    }

    /// The underlying token tracker
    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Initial request parameters
    pub fn params(&self) -> &JsonObject {
        &self.params
    }
}
