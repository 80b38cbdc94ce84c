//! CLI runner - executes commands

use crate::cli::commands::{parse_params, split_pair, Cli, Commands, ContractArgs, OutputFormat};
use crate::contract::{load_registry, resolve_contract, PaginationContract, StaticRegistry};
use crate::error::{Result, ResultExt};
use crate::http::{HttpMethod, HttpPageSource, HttpSourceConfig};
use crate::paginator::AsyncPaginator;
use crate::types::JsonObject;
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Options for a `walk` run
#[derive(Debug, Clone)]
struct WalkOptions<'a> {
    url: &'a str,
    method: HttpMethod,
    operation: Option<&'a str>,
    contract: &'a ContractArgs,
    params: &'a [String],
    headers: &'a [String],
    query: Option<&'a str>,
    max_items: Option<usize>,
    format: OutputFormat,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Walk {
                url,
                method,
                operation,
                contract,
                params,
                headers,
                query,
                max_items,
                format,
            } => {
                self.walk(WalkOptions {
                    url,
                    method: *method,
                    operation: operation.as_deref(),
                    contract,
                    params,
                    headers,
                    query: query.as_deref(),
                    max_items: *max_items,
                    format: *format,
                })
                .await
            }
            Commands::Contract {
                operation,
                contract,
            } => {
                let resolved = self.resolve(Some(operation.as_str()), contract)?;
                self.output_message(OutputFormat::Pretty, &json!({
                    "operation": operation,
                    "contract": resolved,
                }));
                Ok(())
            }
        }
    }

    /// Load the registry named by `--registry`, or an empty one
    fn load_registry(&self) -> Result<StaticRegistry> {
        match &self.cli.registry {
            Some(path) => {
                let registry = load_registry(path)?;
                debug!(
                    path = %path.display(),
                    operations = registry.len(),
                    "Loaded contract registry"
                );
                Ok(registry)
            }
            None => Ok(StaticRegistry::new()),
        }
    }

    /// Resolve the contract from command-line keys and the registry
    fn resolve(&self, operation: Option<&str>, args: &ContractArgs) -> Result<PaginationContract> {
        let definition = args.to_definition();
        match operation {
            Some(operation) => Ok(resolve_contract(operation, &definition, &self.load_registry()?)),
            None => Ok(definition.resolve()),
        }
    }

    async fn walk(&self, options: WalkOptions<'_>) -> Result<()> {
        let contract = self.resolve(options.operation, options.contract)?;
        let params: JsonObject = parse_params(options.params)?;

        let mut config = HttpSourceConfig::builder(options.url).method(options.method);
        for header in options.headers {
            let (name, value) = split_pair(header)?;
            config = config.header(name, value);
        }
        let source = HttpPageSource::with_config(config.build())
            .with_context(|| format!("Cannot walk '{}'", options.url))?;

        info!(url = options.url, ?contract, "Walking pages");
        let paginator = AsyncPaginator::new(source, contract, params);

        if let Some(query) = options.query {
            let mut results = Box::pin(paginator.search(query, options.max_items));
            let mut count = 0usize;
            while let Some(value) = results.next().await {
                self.output_message(options.format, &value?);
                count += 1;
            }
            info!(results = count, "Walk finished");
        } else {
            let mut pages = Box::pin(paginator.into_stream());
            let mut count = 0usize;
            while let Some(item) = pages.next().await {
                let (sequence, page) = item?;
                self.output_message(options.format, &json!({
                    "sequence": sequence,
                    "page": page,
                }));
                count += 1;
            }
            info!(pages = count, "Walk finished");
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, format: OutputFormat, msg: &Value) {
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    const REGISTRY: &str = "pagination:
  ListTables:
    input_token: ExclusiveStartTableName
    output_token: LastEvaluatedTableName
";

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_resolve_from_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paginators.yaml");
        std::fs::write(&path, REGISTRY).unwrap();
        let path = path.to_string_lossy().to_string();

        let runner = runner(&[
            "pagechain",
            "--registry",
            &path,
            "contract",
            "--operation",
            "ListTables",
        ]);
        let Commands::Contract { operation, contract } = &runner.cli.command else {
            panic!("expected contract command");
        };
        assert_eq!(
            runner.resolve(Some(operation.as_str()), contract).unwrap(),
            PaginationContract::tokenized("ExclusiveStartTableName", "LastEvaluatedTableName")
        );
    }

    #[test]
    fn test_resolve_flags_override_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paginators.yaml");
        std::fs::write(&path, REGISTRY).unwrap();
        let path = path.to_string_lossy().to_string();

        let runner = runner(&[
            "pagechain",
            "--registry",
            &path,
            "contract",
            "--operation",
            "ListTables",
            "--no-pagination",
        ]);
        let Commands::Contract { operation, contract } = &runner.cli.command else {
            panic!("expected contract command");
        };
        assert!(runner.resolve(Some(operation.as_str()), contract).unwrap().is_disabled());
    }

    #[test]
    fn test_resolve_without_operation_ignores_registry() {
        let runner = runner(&[
            "pagechain",
            "--registry",
            "/nonexistent/paginators.yaml",
            "walk",
            "--url",
            "http://localhost/",
            "--more-results",
            "HasMore",
        ]);
        let Commands::Walk { contract, .. } = &runner.cli.command else {
            panic!("expected walk command");
        };
        assert_eq!(
            runner.resolve(None, contract).unwrap(),
            PaginationContract::flagged("HasMore")
        );
    }

    #[test]
    fn test_missing_registry_file_is_config_error() {
        let runner = runner(&[
            "pagechain",
            "--registry",
            "/nonexistent/paginators.yaml",
            "contract",
            "--operation",
            "ListTables",
        ]);
        let Commands::Contract { operation, contract } = &runner.cli.command else {
            panic!("expected contract command");
        };
        let err = runner.resolve(Some(operation.as_str()), contract).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
