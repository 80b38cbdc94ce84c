//! Page source module
//!
//! A page source executes one operation with a set of request parameters and
//! returns the resulting page. The paginators call it once per page and never
//! cache or retry.
//!
//! - [`PageSource`] - blocking sources, driven by [`crate::paginator::Paginator`]
//! - [`AsyncPageSource`] - async sources, driven by [`crate::paginator::AsyncPaginator`]
//! - [`from_fn`] / [`from_async_fn`] - adapt closures into sources

mod types;

pub use types::{from_async_fn, from_fn, AsyncFnSource, AsyncPageSource, FnSource, PageSource};
