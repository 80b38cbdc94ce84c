//! Pagination contract module
//!
//! Supports: single field tokens, composite tokens, continuation flags and
//! explicitly non-paginated operations.
//!
//! # Overview
//!
//! A caller describes pagination with a partial [`ContractDefinition`]
//! (`input_token`, `output_token`, `more_results`). Missing keys are filled in
//! from a [`ContractRegistry`] entry for the operation, and the merged
//! definition is normalized into a closed [`PaginationContract`] that the
//! token tracker can branch on exhaustively.

mod registry;
mod resolve;
mod types;

pub use registry::{load_registry, ContractRegistry, StaticRegistry};
pub use resolve::resolve_contract;
pub use types::{ContractDefinition, FieldList, PaginationContract, TokenPairs};
