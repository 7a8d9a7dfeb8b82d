//! # FlightSurety Registry Node
//!
//! Hosts a single registry service, seeds it from genesis configuration,
//! and follows its event stream.
//!
//! ## Modular Structure
//!
//! - `container/` - Node configuration loaded from the environment
//! - `genesis/` - Founding airline set and authorized caller hand-over
//! - `observer` - Event stream logger
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Build the registry service over a broadcast event bus
//! 3. Start the event observer
//! 4. Apply genesis
//! 5. Signal ready

pub mod container;
pub mod genesis;
pub mod observer;

use std::sync::Arc;

use anyhow::{Context, Result};
use fs_registry::{BroadcastEventBus, RegistryService};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::container::NodeConfig;
use crate::genesis::{apply_genesis, GenesisReport};
use crate::observer::{run_observer, ObserverStats};

/// Registry service type hosted by the node.
pub type NodeRegistry = RegistryService<BroadcastEventBus>;

/// The node runtime owning the registry service.
pub struct NodeRuntime {
    config: NodeConfig,
    /// Shared registry service.
    registry: Arc<NodeRegistry>,
    /// Observer task, present while running.
    observer: Mutex<Option<JoinHandle<ObserverStats>>>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Create a node runtime from configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating FlightSurety registry node");

        let bus = Arc::new(BroadcastEventBus::with_capacity(config.event_channel_capacity));
        let registry = RegistryService::new(bus, &config.registry)
            .context("Failed to create registry service")?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            registry: Arc::new(registry),
            observer: Mutex::new(None),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Handle to the registry service.
    pub fn registry(&self) -> Arc<NodeRegistry> {
        Arc::clone(&self.registry)
    }

    /// Start the observer and apply genesis.
    pub async fn start(&self) -> Result<GenesisReport> {
        info!("===========================================");
        info!("  FlightSurety Registry Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        // Observer first so genesis events are logged
        let events = self.registry.event_bus().subscribe();
        let handle = tokio::spawn(run_observer(events, self.shutdown_rx.clone()));
        *self.observer.lock().await = Some(handle);

        let report = apply_genesis(
            &self.registry,
            self.config.registry.owner,
            &self.config.genesis,
        )
        .await
        .context("Failed to apply genesis")?;

        let snapshot = self.registry.snapshot().await;
        info!(
            owner = %snapshot.owner,
            authorized_caller = %snapshot.authorized_caller,
            operational = snapshot.operational,
            admission_mode = %snapshot.admission_mode,
            airlines = snapshot.airlines.len(),
            "Registry node ready"
        );

        Ok(report)
    }

    /// Get a shutdown receiver for graceful shutdown.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Stop the observer and wait for it to finish.
    pub async fn shutdown(&self) -> Option<ObserverStats> {
        info!("Initiating graceful shutdown...");
        let _ = self.shutdown_tx.send(true);

        let handle = self.observer.lock().await.take()?;
        match handle.await {
            Ok(stats) => {
                info!(
                    observed = stats.observed,
                    lagged = stats.lagged,
                    "Event observer stopped"
                );
                Some(stats)
            }
            Err(e) => {
                warn!(error = %e, "Event observer task failed");
                None
            }
        }
    }
}
