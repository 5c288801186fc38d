//! idxsweep - audits a database for free-text indexes and drops them
//!
//! One invocation performs a single audit-and-remediate pass: every
//! collection is enumerated, every index classified, and indexes backed by
//! the `text` key type are dropped (the implicit `_id_` index excepted).
//! Intended to run before a server restart that recreates indexes under a
//! corrected configuration.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use idxsweep::report::print_report;
use idxsweep_auditor::run_audit;
use idxsweep_core::Config;
use idxsweep_store::create_store;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "idxsweep")]
#[command(about = "Audit a document database for text indexes and drop them")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    run(cli.config.as_deref()).await
}

async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;

    info!(
        provider = %config.store.provider,
        database = %config.store.database,
        "starting audit pass"
    );

    // The store handle lives for exactly this scope; it is released on
    // every exit path, error paths included.
    let store = create_store(&config.store)
        .await
        .context("failed to connect to store")?;

    let report = run_audit(store.as_ref()).await?;
    print_report(&report);

    // Partial drop failures are reported but non-fatal; only a failed
    // connection exits non-zero.
    if !report.is_clean() {
        warn!("audit completed with recorded failures");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let default_path = PathBuf::from("idxsweep.toml");
    let path = path.unwrap_or(&default_path);
    Ok(Config::from_file(path)?)
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "idxsweep={level},idxsweep_core={level},idxsweep_store={level},idxsweep_auditor={level}"
        ))
        .init();

    Ok(())
}
