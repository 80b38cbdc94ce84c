//! Page source traits and closure adapters

use crate::error::Result;
use crate::types::{JsonObject, Page};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A blocking operation that returns one page per call
pub trait PageSource {
    /// Execute the operation with the given request parameters
    fn fetch(&mut self, params: &JsonObject) -> Result<Page>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch(&mut self, params: &JsonObject) -> Result<Page> {
        (**self).fetch(params)
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn fetch(&mut self, params: &JsonObject) -> Result<Page> {
        (**self).fetch(params)
    }
}

/// An async operation that returns one page per call
#[async_trait]
pub trait AsyncPageSource: Send + Sync {
    /// Execute the operation with the given request parameters
    async fn fetch(&self, params: &JsonObject) -> Result<Page>;
}

#[async_trait]
impl<S: AsyncPageSource + ?Sized> AsyncPageSource for Arc<S> {
    async fn fetch(&self, params: &JsonObject) -> Result<Page> {
        (**self).fetch(params).await
    }
}

// ============================================================================
// Closure Adapters
// ============================================================================

/// Blocking source backed by a closure
pub struct FnSource<F>(F);

/// Wrap a closure as a blocking [`PageSource`]
pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(&JsonObject) -> Result<Page>,
{
    FnSource(f)
}

impl<F> PageSource for FnSource<F>
where
    F: FnMut(&JsonObject) -> Result<Page>,
{
    fn fetch(&mut self, params: &JsonObject) -> Result<Page> {
        (self.0)(params)
    }
}

/// Async source backed by a closure returning a future
pub struct AsyncFnSource<F>(F);

/// Wrap a closure as an [`AsyncPageSource`].
///
/// The closure receives an owned copy of the request parameters so the
/// returned future does not borrow from the paginator.
pub fn from_async_fn<F, Fut>(f: F) -> AsyncFnSource<F>
where
    F: Fn(JsonObject) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page>> + Send,
{
    AsyncFnSource(f)
}

#[async_trait]
impl<F, Fut> AsyncPageSource for AsyncFnSource<F>
where
    F: Fn(JsonObject) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page>> + Send,
{
    async fn fetch(&self, params: &JsonObject) -> Result<Page> {
        (self.0)(params.clone()).await
    }
}
