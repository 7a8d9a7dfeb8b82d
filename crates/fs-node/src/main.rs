//! # FlightSurety Registry Node
//!
//! Binary entry point. Configuration comes from the environment; see
//! `fs_node::container::config` for the variables.

use anyhow::{Context, Result};
use fs_node::container::NodeConfig;
use fs_node::NodeRuntime;
use fs_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    let _guard = init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    let config = NodeConfig::from_env().context("Failed to load node configuration")?;
    info!(
        owner = %config.registry.owner,
        genesis_airlines = config.genesis.airlines.len(),
        network = %telemetry.network,
        "Configuration loaded"
    );

    let node = NodeRuntime::new(config)?;
    if let Err(e) = node.start().await {
        error!(error = %e, "Node startup failed");
        node.shutdown().await;
        return Err(e);
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    node.shutdown().await;
    info!("Node stopped");
    Ok(())
}
