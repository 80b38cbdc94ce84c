//! Pagination module
//!
//! Supports: single field tokens, composite tokens, continuation flags and
//! non-paginated operations.
//!
//! # Overview
//!
//! The [`TokenTracker`] looks at each fetched page and decides whether another
//! page exists and which request parameters carry the token forward. The
//! [`TraversalCursor`] wraps a tracker with the bookkeeping both traversal
//! flavours share: base parameters, sequence number, current page and the
//! terminal flag.

mod cursor;
mod tracker;
mod types;

pub use cursor::TraversalCursor;
pub use tracker::TokenTracker;
pub use types::NextPage;
