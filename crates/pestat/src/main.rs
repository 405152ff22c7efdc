//! pestat - one-line-per-node summary of a PBS cluster.

mod error;
mod feeds;
mod report;

use clap::Parser;
use error::PestatError;
use pestat_cli::{Args, ColorEnv, ReportConfig};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "PESTAT_LOG";

/// Log to stderr so stdout carries nothing but the report.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    init_logging();
    let args = Args::parse();

    let config =
        ReportConfig::from_args(args, &ColorEnv::from_process()).map_err(PestatError::from)?;
    if config.color {
        // an explicit choice beats crossterm's own NO_COLOR check
        crossterm::style::force_color_output(true);
    }

    run(&config).await?;
    Ok(())
}

async fn run(config: &ReportConfig) -> Result<(), PestatError> {
    let target = feeds::resolve_identity(config.identity.as_ref()).await?;

    // the directory has to be complete before any node is reconciled
    let directory = feeds::load_job_directory(&config.sources).await?;
    let nodes = feeds::load_nodes(&config.sources).await?;

    let report = report::build_report(&directory, nodes, target.as_ref(), config);

    let mut stdout = io::stdout().lock();
    for line in report.lines() {
        writeln!(stdout, "{}", line).map_err(PestatError::Output)?;
    }
    stdout.flush().map_err(PestatError::Output)?;
    Ok(())
}
