// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagechain
//!
//! Turns a paginated service operation into one lazy, forward-only traversal.
//!
//! Services split large results across pages and hand back a continuation
//! token (and sometimes a "more results" flag) with each page. pagechain
//! copies the token into the next request, stops when the service says so
//! and lets you consume the pages as an iterator, an async callback chain or
//! a flattened stream of query results.
//!
//! ## Features
//!
//! - **Contracts**: token field pairs and continuation flags, resolved from
//!   caller keys over registry defaults
//! - **Blocking traversal**: [`Paginator`] is an `Iterator` of `(sequence, page)`
//! - **Async traversal**: [`AsyncPaginator::each`] chains callbacks strictly
//!   after each page, with early stop via [`Flow::Stop`]
//! - **Flattening**: JSONPath `search` across all pages, with an optional limit
//! - **HTTP**: [`http::HttpPageSource`] walks a JSON endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagechain::{ContractDefinition, JsonObject, Paginator, Result};
//!
//! fn list_tables(client: &mut impl pagechain::PageSource) -> Result<Vec<serde_json::Value>> {
//!     let contract = ContractDefinition::new()
//!         .input_token("ExclusiveStartTableName")
//!         .output_token("LastEvaluatedTableName")
//!         .resolve();
//!
//!     Paginator::new(client, contract, JsonObject::new())
//!         .search("TableNames", None)
//!         .collect()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   Paginator (Iterator)      AsyncPaginator (each/Stream) │
//! │             search() ──► Search / search_stream          │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//! ┌──────────────┬────────────┴──────────┬───────────────────┐
//! │   Contract   │   TraversalCursor     │   Page Source     │
//! ├──────────────┼───────────────────────┼───────────────────┤
//! │ Definition   │ TokenTracker          │ PageSource        │
//! │ Registry     │ NextPage              │ AsyncPageSource   │
//! │ Resolution   │                       │ HttpPageSource    │
//! └──────────────┴───────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pagination contracts and the default registry
pub mod contract;

/// Token tracking and traversal state
pub mod pagination;

/// Page source traits
pub mod source;

/// Blocking and async traversals
pub mod paginator;

/// Query evaluation and result flattening
pub mod query;

/// HTTP page source
pub mod http;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_utils;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use contract::{
    load_registry, resolve_contract, ContractDefinition, ContractRegistry, PaginationContract,
    StaticRegistry,
};
pub use paginator::{AsyncPaginator, Paginator};
pub use query::{JsonPathEvaluator, QueryEvaluator};
pub use source::{AsyncPageSource, PageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
