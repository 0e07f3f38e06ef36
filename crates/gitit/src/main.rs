//! git-it CLI binary.

use gitit::cli::Cli;
use gitit::output::{OutputConfig, error};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=gitit=debug,gitit_format=trace it list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gitit=info,gitit_format=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting git-it CLI");

    let cli = Cli::parse_args();
    if let Err(e) = cli.execute() {
        let report = format!("Error: {e:#}");
        eprintln!("{}", error(&report, &OutputConfig::from_env()));
        return ExitCode::FAILURE;
    }

    tracing::debug!("git-it CLI completed successfully");
    ExitCode::SUCCESS
}
