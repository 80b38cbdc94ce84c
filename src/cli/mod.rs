//! CLI module
//!
//! Command-line interface for walking paginated HTTP endpoints.
//!
//! # Commands
//!
//! - `walk` - Fetch every page of an endpoint and print pages or query results
//! - `contract` - Print the resolved pagination contract for an operation

mod commands;
mod runner;

pub use commands::{Cli, Commands, ContractArgs, OutputFormat};
pub use runner::Runner;
