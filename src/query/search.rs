//! Lazy flatten operators

use super::evaluator::{JsonPathEvaluator, QueryEvaluator};
use crate::error::Result;
use crate::paginator::{AsyncPaginator, Paginator};
use crate::source::{AsyncPageSource, PageSource};
use crate::types::JsonValue;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::debug;

/// Iterator over the values a query matches across all pages.
///
/// Values extracted from one page are yielded in order before the next page
/// is fetched. With a limit, the traversal stops as soon as that many values
/// have been yielded, even in the middle of a page.
pub struct Search<S, E = JsonPathEvaluator> {
    pages: Paginator<S>,
    evaluator: E,
    query: String,
    limit: Option<usize>,
    buffer: VecDeque<JsonValue>,
    yielded: usize,
    done: bool,
}

impl<S: PageSource, E: QueryEvaluator> Search<S, E> {
    /// Create a search over a paginator
    pub fn new(
        pages: Paginator<S>,
        evaluator: E,
        query: impl Into<String>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            pages,
            evaluator,
            query: query.into(),
            limit,
            buffer: VecDeque::new(),
            yielded: 0,
            done: false,
        }
    }

    /// The underlying paginator
    pub fn paginator(&self) -> &Paginator<S> {
        &self.pages
    }

    /// Number of values yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<S: PageSource, E: QueryEvaluator> Iterator for Search<S, E> {
    type Item = Result<JsonValue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.limit.is_some_and(|limit| self.yielded >= limit) {
                if !self.done {
                    debug!(limit = self.yielded, "Search limit reached");
                    self.done = true;
                    self.pages.stop();
                }
                return None;
            }
            if let Some(value) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(value));
            }
            if self.done {
                return None;
            }

            match self.pages.next() {
                Some(Ok((_, page))) => match self.evaluator.evaluate(&self.query, &page) {
                    Ok(value) => extend_buffer(&mut self.buffer, value),
                    Err(e) => {
                        self.done = true;
                        self.pages.stop();
                        return Some(Err(e));
                    }
                },
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

struct SearchState<S, E> {
    pages: AsyncPaginator<S>,
    evaluator: E,
    query: String,
    limit: Option<usize>,
    buffer: VecDeque<JsonValue>,
    yielded: usize,
    done: bool,
}

/// Stream the values a query matches across the pages of an async paginator.
///
/// Same ordering and limit rules as [`Search`].
pub fn search_stream<S, E>(
    pages: AsyncPaginator<S>,
    evaluator: E,
    query: impl Into<String>,
    limit: Option<usize>,
) -> impl Stream<Item = Result<JsonValue>>
where
    S: AsyncPageSource,
    E: QueryEvaluator,
{
    let state = SearchState {
        pages,
        evaluator,
        query: query.into(),
        limit,
        buffer: VecDeque::new(),
        yielded: 0,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if state.limit.is_some_and(|limit| state.yielded >= limit) {
                debug!(limit = state.yielded, "Search limit reached");
                state.pages.stop();
                return None;
            }
            if let Some(value) = state.buffer.pop_front() {
                state.yielded += 1;
                return Some((Ok(value), state));
            }
            if state.done {
                return None;
            }

            match state.pages.next_page().await {
                Ok(Some((_, page))) => match state.evaluator.evaluate(&state.query, &page) {
                    Ok(value) => extend_buffer(&mut state.buffer, value),
                    Err(e) => {
                        state.done = true;
                        state.pages.stop();
                        return Some((Err(e), state));
                    }
                },
                Ok(None) => return None,
                Err(e) => {
                    state.done = true;
                    return Some((Err(e), state));
                }
            }
        }
    })
}

fn extend_buffer(buffer: &mut VecDeque<JsonValue>, value: Option<JsonValue>) {
    match value {
        Some(JsonValue::Array(items)) => buffer.extend(items),
        Some(value) => buffer.push_back(value),
        None => {}
    }
}
