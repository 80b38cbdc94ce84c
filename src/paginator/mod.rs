//! Paginator module
//!
//! Drives a page source until the pagination contract says stop.
//!
//! # Overview
//!
//! - [`Paginator`] - blocking, forward-only iterator of `(sequence, page)`
//! - [`AsyncPaginator`] - async traversal with per-page callbacks (`each`)
//!   and a `Stream` of pages
//!
//! Both fetch the first page lazily, never fetch two pages at once and stop
//! fetching for good after the contract, a callback or a failure ends the
//! traversal.

mod asynchronous;
mod blocking;

pub use asynchronous::AsyncPaginator;
pub use blocking::Paginator;
