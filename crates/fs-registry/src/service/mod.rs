//! Registry Service - serialized entry point
//!
//! Every mutation holds the write lock across gate check, validation, write
//! and event publication, so mutations never interleave. Queries share the
//! read lock and always see fully applied registrations.

use crate::config::{ConfigError, RegistryConfig};
use crate::domain::{
    AdmissionMode, Address, Airline, Flight, FlightSuretyRegistry, RegistryError, RegistryResult,
    Timestamp,
};
use crate::events::RegistryEvent;
use crate::metrics;
use crate::ports::{EventBus, RegistryApi};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

#[cfg(test)]
mod tests;

/// Counters for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed mutations.
    pub mutations_accepted: u64,
    /// Rejected mutations.
    pub mutations_rejected: u64,
    /// Events handed to the bus successfully.
    pub events_published: u64,
    /// Events the bus refused after the mutation committed.
    pub publish_failures: u64,
}

/// Consistent read of the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub owner: Address,
    pub authorized_caller: Address,
    pub operational: bool,
    pub admission_mode: AdmissionMode,
    pub airlines: Vec<Airline>,
    pub flights: Vec<Flight>,
}

/// Registry Service
pub struct RegistryService<E: EventBus> {
    event_bus: Arc<E>,
    state: RwLock<FlightSuretyRegistry>,
    stats: parking_lot::Mutex<ServiceStats>,
}

impl<E: EventBus> RegistryService<E> {
    /// Create a service over an empty registry.
    pub fn new(event_bus: Arc<E>, config: &RegistryConfig) -> Result<Self, ConfigError> {
        let registry = config.build()?;
        info!(
            owner = %config.owner,
            operational = config.operational,
            "Registry service created"
        );
        Ok(Self::with_registry(event_bus, registry))
    }

    /// Create a service over an existing registry.
    pub fn with_registry(event_bus: Arc<E>, registry: FlightSuretyRegistry) -> Self {
        Self {
            event_bus,
            state: RwLock::new(registry),
            stats: parking_lot::Mutex::new(ServiceStats::default()),
        }
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    pub fn event_bus(&self) -> &Arc<E> {
        &self.event_bus
    }

    // === QUERIES ===

    pub async fn airline(&self, name: &str) -> Option<Airline> {
        self.state.read().await.airline(name).cloned()
    }

    pub async fn flight(&self, name: &str) -> Option<Flight> {
        self.state.read().await.flight(name).cloned()
    }

    pub async fn is_flight_registered(&self, name: &str) -> bool {
        self.state.read().await.is_flight_registered(name)
    }

    pub async fn owner(&self) -> Address {
        self.state.read().await.gate().owner()
    }

    pub async fn authorized_caller(&self) -> Address {
        self.state.read().await.gate().authorized_caller()
    }

    pub async fn registered_airline_count(&self) -> usize {
        self.state.read().await.registered_airline_count()
    }

    pub async fn admission_mode(&self) -> AdmissionMode {
        self.state.read().await.admission_mode()
    }

    /// Everything under a single read lock.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.read().await;
        RegistrySnapshot {
            owner: state.gate().owner(),
            authorized_caller: state.gate().authorized_caller(),
            operational: state.gate().is_operational(),
            admission_mode: state.admission_mode(),
            airlines: state.all_airlines().to_vec(),
            flights: state.all_flights().to_vec(),
        }
    }

    /// Copy of the full registry state.
    pub async fn export_state(&self) -> FlightSuretyRegistry {
        self.state.read().await.clone()
    }

    // === HELPERS ===

    fn accept(&self, operation: &'static str, state: &FlightSuretyRegistry) {
        self.stats.lock().mutations_accepted += 1;
        metrics::record_mutation_accepted(operation);
        metrics::record_registry_size(state.all_airlines().len(), state.all_flights().len());
    }

    fn reject(&self, operation: &'static str, caller: Address, err: RegistryError) -> RegistryError {
        self.stats.lock().mutations_rejected += 1;
        metrics::record_mutation_rejected(err.kind());
        warn!(
            operation,
            caller = %caller,
            reason = err.kind(),
            error = %err,
            "Registry mutation rejected"
        );
        err
    }

    /// Publish after commit. Delivery failure is logged, never propagated.
    async fn emit(&self, event: RegistryEvent) {
        let name = event.name();
        match self.event_bus.publish(event).await {
            Ok(()) => {
                self.stats.lock().events_published += 1;
                debug!(event = name, "Event published");
            }
            Err(e) => {
                self.stats.lock().publish_failures += 1;
                warn!(event = name, error = %e, "Failed to publish registry event");
            }
        }
    }
}

#[async_trait]
impl<E: EventBus> RegistryApi for RegistryService<E> {
    #[instrument(skip_all, fields(caller = %caller, new_caller = %new_caller))]
    async fn set_authorized_caller(
        &self,
        caller: Address,
        new_caller: Address,
    ) -> RegistryResult<()> {
        let mut state = self.state.write().await;
        let previous = state
            .set_authorized_caller(caller, new_caller)
            .map_err(|e| self.reject("set_authorized_caller", caller, e))?;

        info!(previous = %previous, current = %new_caller, "Authorized caller changed");
        self.accept("set_authorized_caller", &state);
        self.emit(RegistryEvent::authorized_caller_changed(previous, new_caller))
            .await;
        Ok(())
    }

    #[instrument(skip_all, fields(caller = %caller, operational = operational))]
    async fn set_operational(&self, caller: Address, operational: bool) -> RegistryResult<()> {
        let mut state = self.state.write().await;
        let previous = state
            .set_operational(caller, operational)
            .map_err(|e| self.reject("set_operational", caller, e))?;

        if previous != operational {
            info!(operational, "Operational status changed");
        }
        self.accept("set_operational", &state);
        Ok(())
    }

    #[instrument(skip_all, fields(caller = %caller, owner_address = %owner_address, name = name))]
    async fn register_airline(
        &self,
        caller: Address,
        owner_address: Address,
        name: &str,
    ) -> RegistryResult<Airline> {
        let mut state = self.state.write().await;
        let airline = state
            .register_airline(caller, owner_address, name)
            .map_err(|e| self.reject("register_airline", caller, e))?;

        info!(
            airline = %airline.name,
            status = %airline.status,
            registered = state.registered_airline_count(),
            "Airline registered"
        );
        self.accept("register_airline", &state);
        self.emit(RegistryEvent::airline_registered(airline.clone()))
            .await;
        Ok(airline)
    }

    #[instrument(skip_all, fields(caller = %caller, airline = airline_name, flight = flight_name))]
    async fn register_flight(
        &self,
        caller: Address,
        airline_address: Address,
        airline_name: &str,
        flight_name: &str,
        scheduled_time: Timestamp,
    ) -> RegistryResult<Flight> {
        let mut state = self.state.write().await;
        let flight = state
            .register_flight(
                caller,
                airline_address,
                airline_name,
                flight_name,
                scheduled_time,
            )
            .map_err(|e| self.reject("register_flight", caller, e))?;

        info!(airline = airline_name, flight = flight_name, "Flight registered");
        self.accept("register_flight", &state);
        self.emit(RegistryEvent::flight_registered(
            airline_name,
            flight_name,
            scheduled_time,
        ))
        .await;
        Ok(flight)
    }

    async fn all_airlines(&self) -> Vec<Airline> {
        self.state.read().await.all_airlines().to_vec()
    }

    async fn all_flights(&self) -> Vec<Flight> {
        self.state.read().await.all_flights().to_vec()
    }

    async fn is_airline(&self, address: Address) -> bool {
        self.state.read().await.is_airline(&address)
    }

    async fn is_operational(&self) -> bool {
        self.state.read().await.gate().is_operational()
    }
}
