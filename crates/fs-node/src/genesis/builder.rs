//! # Genesis Airline Set
//!
//! Seeds the registry with the founding airlines and hands the authorized
//! caller over to the application contract.

use std::collections::HashSet;

use fs_registry::{
    Address, AirlineStatus, EventBus, RegistryApi, RegistryError, RegistryService,
};
use thiserror::Error;
use tracing::{info, instrument};

/// Genesis application errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The registry already holds airlines.
    #[error("Genesis already applied: registry holds {0} airlines")]
    AlreadyApplied(usize),

    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// The registry refused a genesis airline.
    #[error("Genesis airline {name} rejected: {source}")]
    Rejected {
        name: String,
        #[source]
        source: RegistryError,
    },

    /// Hand-over to the authorized caller failed.
    #[error("Authorized caller hand-over failed: {0}")]
    Handover(#[source] RegistryError),
}

/// One founding airline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisAirline {
    pub address: Address,
    pub name: String,
}

impl GenesisAirline {
    pub fn new(address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }
}

/// Genesis configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisConfig {
    /// Founding airlines, registered in order by the owner.
    pub airlines: Vec<GenesisAirline>,

    /// Caller installed once the founding airlines are in.
    /// If None, the owner stays the authorized caller.
    pub authorized_caller: Option<Address>,
}

impl GenesisConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut names = HashSet::new();
        let mut addresses = HashSet::new();

        for airline in &self.airlines {
            if airline.name.is_empty() {
                return Err(GenesisError::InvalidConfig(format!(
                    "empty airline name for {}",
                    airline.address
                )));
            }
            if airline.address.is_zero() {
                return Err(GenesisError::InvalidConfig(format!(
                    "zero address for airline {}",
                    airline.name
                )));
            }
            if !names.insert(airline.name.as_str()) {
                return Err(GenesisError::InvalidConfig(format!(
                    "duplicate airline name {}",
                    airline.name
                )));
            }
            if !addresses.insert(airline.address) {
                return Err(GenesisError::InvalidConfig(format!(
                    "duplicate airline address {}",
                    airline.address
                )));
            }
        }

        if self.authorized_caller.is_some_and(|c| c.is_zero()) {
            return Err(GenesisError::InvalidConfig(
                "zero authorized caller".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outcome of applying genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisReport {
    /// Airlines admitted as `Registered`.
    pub registered: usize,
    /// Airlines admitted as `PendingApproval` once bootstrap closed.
    pub pending: usize,
    /// Authorized caller after genesis.
    pub authorized_caller: Address,
}

/// Register the founding airlines as `owner`, then hand over.
///
/// Airlines past the bootstrap threshold land as `PendingApproval`.
#[instrument(skip_all, fields(airlines = config.airlines.len()))]
pub async fn apply_genesis<E: EventBus>(
    service: &RegistryService<E>,
    owner: Address,
    config: &GenesisConfig,
) -> Result<GenesisReport, GenesisError> {
    config.validate()?;

    let existing = service.all_airlines().await.len();
    if existing > 0 {
        return Err(GenesisError::AlreadyApplied(existing));
    }

    let mut registered = 0;
    let mut pending = 0;
    for entry in &config.airlines {
        let airline = service
            .register_airline(owner, entry.address, &entry.name)
            .await
            .map_err(|source| GenesisError::Rejected {
                name: entry.name.clone(),
                source,
            })?;
        match airline.status {
            AirlineStatus::PendingApproval => pending += 1,
            _ => registered += 1,
        }
    }

    let authorized_caller = match config.authorized_caller {
        Some(caller) if caller != owner => {
            service
                .set_authorized_caller(owner, caller)
                .await
                .map_err(GenesisError::Handover)?;
            caller
        }
        _ => service.authorized_caller().await,
    };

    info!(
        registered,
        pending,
        authorized_caller = %authorized_caller,
        "Genesis applied"
    );

    Ok(GenesisReport {
        registered,
        pending,
        authorized_caller,
    })
}
