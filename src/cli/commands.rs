//! CLI commands and argument parsing

use crate::contract::{ContractDefinition, FieldList};
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::types::{JsonObject, JsonValue};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Walk paginated APIs by following continuation tokens
#[derive(Parser, Debug)]
#[command(name = "pagechain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Contract registry file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub registry: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page of an HTTP endpoint
    Walk {
        /// Endpoint URL
        #[arg(long)]
        url: String,

        /// How request parameters are sent
        #[arg(long, default_value = "get")]
        method: HttpMethod,

        /// Operation name used to look up the default contract
        #[arg(long)]
        operation: Option<String>,

        #[command(flatten)]
        contract: ContractArgs,

        /// Request parameter as KEY=VALUE (VALUE parsed as JSON when possible)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Header as NAME=VALUE
        #[arg(long = "header", value_name = "NAME=VALUE")]
        headers: Vec<String>,

        /// JSONPath query; prints matching values instead of pages
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of query results
        #[arg(long, requires = "query")]
        max_items: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the resolved pagination contract
    Contract {
        /// Operation name used to look up the default contract
        #[arg(long)]
        operation: String,

        #[command(flatten)]
        contract: ContractArgs,
    },
}

/// Contract keys given on the command line; they override the registry
#[derive(Args, Debug, Clone, Default)]
pub struct ContractArgs {
    /// Request parameter that receives the token (repeat for composite tokens)
    #[arg(long = "input-token", value_name = "FIELD")]
    pub input_token: Vec<String>,

    /// Response field that carries the token (repeat for composite tokens)
    #[arg(long = "output-token", value_name = "FIELD", conflicts_with = "no_pagination")]
    pub output_token: Vec<String>,

    /// Treat the operation as not paginated
    #[arg(long)]
    pub no_pagination: bool,

    /// Boolean response field that says whether more pages exist
    #[arg(long, value_name = "FIELD")]
    pub more_results: Option<String>,
}

impl ContractArgs {
    /// Build the caller-side contract definition
    pub fn to_definition(&self) -> ContractDefinition {
        let mut definition = ContractDefinition::new();
        if !self.input_token.is_empty() {
            definition.input_token = Some(field_list(&self.input_token));
        }
        if self.no_pagination {
            definition = definition.no_output_token();
        } else if !self.output_token.is_empty() {
            definition.output_token = Some(Some(field_list(&self.output_token)));
        }
        if let Some(field) = &self.more_results {
            definition = definition.more_results(field.clone());
        }
        definition
    }
}

fn field_list(fields: &[String]) -> FieldList {
    match fields {
        [single] => FieldList::One(single.clone()),
        many => FieldList::Many(many.to_vec()),
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse `KEY=VALUE` pairs into a parameter map.
///
/// Values that parse as JSON keep their type; anything else is a string.
pub fn parse_params(pairs: &[String]) -> Result<JsonObject> {
    let mut params = JsonObject::new();
    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| JsonValue::String(value.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

/// Split a `KEY=VALUE` argument
pub fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(Error::config(format!("Expected KEY=VALUE, got '{pair}'"))),
    }
}
