//! Async paginator

use crate::contract::PaginationContract;
use crate::error::{Error, Result};
use crate::pagination::TraversalCursor;
use crate::query::{search_stream, JsonPathEvaluator, QueryEvaluator};
use crate::source::AsyncPageSource;
use crate::types::{Flow, JsonObject, JsonValue, Page};
use futures::stream::{self, Stream};
use std::future::{self as std_future, Future};
use tracing::debug;

/// Async traversal over the pages of an [`AsyncPageSource`].
///
/// Pages are fetched strictly one after another: the next fetch starts only
/// after the previous page has been handed over and, with
/// [`each`](Self::each), after the callback's future has completed.
pub struct AsyncPaginator<S> {
    source: S,
    cursor: TraversalCursor,
    delivered: bool,
}

impl<S: AsyncPageSource> AsyncPaginator<S> {
    /// Create a paginator; nothing is fetched until the first page is needed
    pub fn new(source: S, contract: PaginationContract, params: JsonObject) -> Self {
        Self {
            source,
            cursor: TraversalCursor::new(contract, params),
            delivered: false,
        }
    }

    /// The next page not yet handed over, or `None` once terminal.
    ///
    /// A page fetched by [`current`](Self::current) is handed over here
    /// before anything else is fetched.
    pub async fn next_page(&mut self) -> Result<Option<(usize, Page)>> {
        if !self.delivered {
            if let Some(item) = self.cursor.sequence().zip(self.cursor.current().cloned()) {
                self.delivered = true;
                return Ok(Some(item));
            }
        }

        let next = self.fetch_next().await?;
        if next.is_some() {
            self.delivered = true;
        }
        Ok(next)
    }

    /// The current page, fetching the first page if needed
    pub async fn current(&mut self) -> Result<Page> {
        if !self.cursor.is_started() {
            self.fetch_next().await?;
        }
        self.last_page()
    }

    /// Run `callback` on every page, in order.
    ///
    /// The callback's future is awaited before the next page is requested.
    /// Resolves with the last fetched page, or with the page whose callback
    /// returned [`Flow::Stop`]. The first fetch or callback error ends the
    /// traversal; callback errors are reported as [`Error::CallbackFailure`].
    pub async fn each<F, Fut, R>(&mut self, mut callback: F) -> Result<Page>
    where
        F: FnMut(Page) -> Fut,
        Fut: Future<Output = Result<R>>,
        R: Into<Flow>,
    {
        while let Some((sequence, page)) = self.next_page().await? {
            let flow = match callback(page).await {
                Ok(flow) => flow.into(),
                Err(e) => {
                    debug!(sequence, error = %e, "Callback failed");
                    self.cursor.terminate();
                    return Err(Error::from_callback(e));
                }
            };
            if flow.is_stop() {
                debug!(sequence, "Callback stopped pagination");
                self.cursor.terminate();
                break;
            }
        }
        self.last_page()
    }

    /// Like [`each`](Self::each) for callbacks that do no async work
    pub async fn for_each<F, R>(&mut self, mut callback: F) -> Result<Page>
    where
        F: FnMut(&Page) -> Result<R>,
        R: Into<Flow>,
    {
        self.each(|page| std_future::ready(callback(&page))).await
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

    /// Turn the paginator into a stream of `(sequence, page)`.
    ///
    /// The stream ends after the last page or right after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<(usize, Page)>> {
        stream::unfold(Some(self), |state| async move {
            let mut paginator = state?;
            match paginator.next_page().await {
                Ok(Some(item)) => Some((Ok(item), Some(paginator))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Stream the flattened results of a JSONPath query across all pages
    pub fn search(
        self,
        query: impl Into<String>,
        limit: Option<usize>,
    ) -> impl Stream<Item = Result<JsonValue>> {
        search_stream(self, JsonPathEvaluator, query, limit)
    }

    /// Stream the flattened results of a query evaluated by a custom evaluator
    pub fn search_with<E: QueryEvaluator>(
        self,
        evaluator: E,
        query: impl Into<String>,
        limit: Option<usize>,
    ) -> impl Stream<Item = Result<JsonValue>> {
        search_stream(self, evaluator, query, limit)
    }

    async fn fetch_next(&mut self) -> Result<Option<(usize, Page)>> {
        let Some(params) = self.cursor.next_request() else {
            return Ok(None);
        };

        debug!(
            sequence = self.cursor.fetched(),
            params = params.len(),
            "Fetching page"
        );
        match self.source.fetch(&params).await {
            Ok(page) => {
                self.delivered = false;
                let sequence = self.cursor.record(page.clone());
                Ok(Some((sequence, page)))
            }
            Err(e) => {
                self.cursor.terminate();
                Err(e)
            }
        }
    }

    fn last_page(&self) -> Result<Page> {
        self.cursor
            .current()
            .cloned()
            .ok_or_else(|| Error::source_failure("traversal ended before any page was fetched"))
    }
}
