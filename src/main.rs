//! pagechain CLI
//!
//! Command-line interface for walking paginated endpoints

use clap::Parser;
use pagechain::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

/// `debug` with `--verbose`, otherwise `RUST_LOG` falling back to `info`
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(cli.verbose))
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
