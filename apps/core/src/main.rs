// CharmForge V1 Backend Entry Point
// "The Design Brain" - deterministic prompt-to-taxonomy mapping

mod catalog;
mod design;
mod error;
mod fs_manager;
mod models;
mod preflight;
mod run_logger;
mod server;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use catalog::DesignCatalog;
use fs_manager::PortablePathManager;
use run_logger::RunLogger;
use server::ToolService;

fn init_tracing() {
    // Logs go to stderr: stdout belongs to the wire protocol.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("charmforge-core".into(), std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(e) = PortablePathManager::init() {
        error!("Failed to initialize portable file system: {}", e);
    }
    RunLogger::init_global();

    let ologs_dir = PortablePathManager::ologs_dir();
    let report = preflight::run_preflight_checks(&ologs_dir, &PortablePathManager::logs_dir());
    if !report.ready_to_start {
        RunLogger::global_log_error(&report.summary);
        RunLogger::complete_global(false);
        anyhow::bail!("preflight failed: {}", report.summary);
    }

    let catalog = match DesignCatalog::load(&ologs_dir) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            RunLogger::global_log_error(&e.to_string());
            RunLogger::complete_global(false);
            return Err(e).context("olog catalog load failed");
        }
    };
    info!(
        archetypes = catalog.archetypes.priority().len(),
        constraints = catalog.constraints.len(),
        "catalog ready"
    );

    let service = ToolService::new(catalog);
    let outcome = service.serve().await;

    match &outcome {
        Ok(()) => RunLogger::complete_global(true),
        Err(e) => {
            RunLogger::global_log_error(&e.to_string());
            RunLogger::complete_global(false);
        }
    }
    outcome.map_err(Into::into)
}
