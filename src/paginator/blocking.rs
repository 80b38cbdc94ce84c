//! Blocking paginator

use crate::contract::PaginationContract;
use crate::error::{Error, Result};
use crate::pagination::TraversalCursor;
use crate::query::{JsonPathEvaluator, QueryEvaluator, Search};
use crate::source::PageSource;
use crate::types::{JsonObject, JsonValue, Page};
use tracing::debug;

/// Forward-only traversal over the pages of a blocking [`PageSource`].
///
/// Use it either as an [`Iterator`] of `(sequence, page)` pairs or through
/// [`current`](Self::current) / [`advance`](Self::advance). Each advance
/// performs exactly one fetch until the traversal is terminal.
pub struct Paginator<S> {
    source: S,
    cursor: TraversalCursor,
    delivered: bool,
}

impl<S: PageSource> Paginator<S> {
    /// Create a paginator; nothing is fetched until the first page is needed
    pub fn new(source: S, contract: PaginationContract, params: JsonObject) -> Self {
        Self {
            source,
            cursor: TraversalCursor::new(contract, params),
            delivered: false,
        }
    }

    /// The current page, fetching the first page if needed
    pub fn current(&mut self) -> Result<&Page> {
        if !self.cursor.is_started() {
            self.fetch_next()?;
        }
        self.cursor
            .current()
            .ok_or_else(|| Error::source_failure("traversal ended before any page was fetched"))
    }

    /// Fetch the next page; a no-op once terminal
    pub fn advance(&mut self) -> Result<()> {
        self.fetch_next().map(|_| ())
    }

    /// Stop the traversal; no further page will be fetched
    pub fn stop(&mut self) {
        self.cursor.terminate();
    }

    /// Check whether traversal is over
    pub fn is_terminal(&self) -> bool {
        self.cursor.is_terminal()
    }

    /// Token value that will be sent for an input field on the next request
    pub fn next_token(&self, input_field: &str) -> Option<&JsonValue> {
        self.cursor.next_token(input_field)
    }

    /// Traversal position
    pub fn cursor(&self) -> &TraversalCursor {
        &self.cursor
    }

    /// Give back the page source
    pub fn into_source(self) -> S {
        self.source
    }

    /// Flatten the results of a JSONPath query across all pages
    pub fn search(self, query: impl Into<String>, limit: Option<usize>) -> Search<S> {
        Search::new(self, JsonPathEvaluator, query, limit)
    }

    /// Flatten the results of a query evaluated by a custom evaluator
    pub fn search_with<E: QueryEvaluator>(
        self,
        evaluator: E,
        query: impl Into<String>,
        limit: Option<usize>,
    ) -> Search<S, E> {
        Search::new(self, evaluator, query, limit)
    }

    fn fetch_next(&mut self) -> Result<Option<usize>> {
        let Some(params) = self.cursor.next_request() else {
            return Ok(None);
        };

        debug!(
            sequence = self.cursor.fetched(),
            params = params.len(),
            "Fetching page"
        );
        match self.source.fetch(&params) {
            Ok(page) => {
                self.delivered = false;
                Ok(Some(self.cursor.record(page)))
            }
            Err(e) => {
                self.cursor.terminate();
                Err(e)
            }
        }
    }
}

impl<S: PageSource> Iterator for Paginator<S> {
    type Item = Result<(usize, Page)>;

    fn next(&mut self) -> Option<Self::Item> {
        // A page fetched by `current`/`advance` but not yet yielded comes first
        if !self.delivered {
            if let Some(item) = self.cursor.sequence().zip(self.cursor.current().cloned()) {
                self.delivered = true;
                return Some(Ok(item));
            }
        }

        match self.fetch_next() {
            Ok(Some(_)) => self.next(),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
