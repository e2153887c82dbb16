use anyhow::{Context, Result};
use api_badges::config::{AppConfig, EngineConfig};
use api_badges::metrics::history::SyntheticHistory;
use api_badges::service::badge_service::BadgeService;
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Evaluates a JSON array of metric snapshots from a file (or stdin) and
/// prints the bulk report.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let items: Vec<serde_json::Value> =
        serde_json::from_str(&input).context("input must be a JSON array of metric snapshots")?;

    let cfg = AppConfig::from_env();
    let engine = EngineConfig::from_app(&cfg);
    engine.warn_on_unknown_criteria();
    let service = BadgeService::new(engine, Arc::new(SyntheticHistory));

    let report = service.evaluate_bulk(items).await;
    tracing::info!(
        "audited {} apis: {} ok, {} rejected",
        report.processed_apis,
        report.succeeded,
        report.failed
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
