//! Batch entrypoint: load config, open storage, process one batch, exit.
//! Configuration errors abort before any processing with a non-zero exit.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use radar_core::RadarConfig;
use radar_pipeline::Runner;
use radar_storage::StorageEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "radar.toml".to_string());
    let db_path = args.next().unwrap_or_else(|| "radar.db".to_string());

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("reading config {config_path}"))?;
    let config = RadarConfig::from_toml_str(&raw).context("invalid configuration")?;

    let storage = Arc::new(StorageEngine::open(Path::new(&db_path))?);
    let runner = Runner::new(config)?;
    let report = runner.run(storage).await?;

    println!(
        "processed {} entities: {} movements, {} triggers fired, {} suppressed, {} errored, {} skipped",
        report.processed,
        report.movements,
        report.triggers_fired,
        report.triggers_suppressed,
        report.errored,
        report.skipped,
    );
    Ok(())
}
