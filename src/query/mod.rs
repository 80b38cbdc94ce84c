//! Query module
//!
//! Projects a path expression across the pages of a traversal.
//!
//! # Overview
//!
//! - [`QueryEvaluator`] - evaluates a query against one page
//! - [`JsonPathEvaluator`] - dotted paths evaluated directly, full JSONPath
//!   through `jsonpath-rust`
//! - [`Search`] / [`search_stream`] - lazily flatten matched values across
//!   pages, fetching a page only when the values extracted so far run out

mod evaluator;
mod search;

pub use evaluator::{evaluator_fn, lookup, FnEvaluator, JsonPathEvaluator, QueryEvaluator};
pub use search::{search_stream, Search};
