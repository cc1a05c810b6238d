//! dbpulse - keeps managed database projects from being auto-paused.
//!
//! Runs once per invocation: loads targets from the environment, pings
//! each one over HTTP with bounded parallelism, reports per-target
//! results and exits with a code reflecting the aggregate outcome.
//! Periodic execution belongs to an external scheduler (cron, CI).

mod config;
mod dispatch;
mod probe;
mod report;

use std::process::ExitCode;
use std::sync::Arc;

use config::Settings;
use probe::PulseClient;
use report::Summary;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dbpulse=info")),
        )
        .init();

    let settings = Settings::load();

    let targets = match config::load_targets() {
        Ok(targets) => targets,
        Err(e) => {
            tracing::error!("Configuration unreadable: {}", e);
            return ExitCode::from(report::EXIT_CONFIG);
        }
    };

    if targets.is_empty() {
        tracing::error!("No targets configured; set DB1_URL and DB1_ANON_KEY");
        return ExitCode::from(report::EXIT_CONFIG);
    }

    let client = match PulseClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::from(report::EXIT_CONFIG);
        }
    };

    tracing::info!(
        "Pinging {} target(s), up to {} at a time",
        targets.len(),
        settings.concurrency
    );

    let outcomes = dispatch::run_probes(Arc::new(client), targets, settings.concurrency).await;
    let summary = Summary::from_outcomes(&outcomes);
    report::print_summary(&summary, settings.json_summary);

    ExitCode::from(summary.exit_code())
}
