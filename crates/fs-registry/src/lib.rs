//! # fs-registry
//!
//! Authoritative airline/flight registry for the FlightSurety scheme.
//!
//! ## Architecture
//!
//! ```text
//! caller ──► RegistryService ──write lock──► AccessGate ──► FlightSuretyRegistry
//!                  │                                            │
//!                  └────────────── EventBus ◄──── event ────────┘
//! ```
//!
//! Mutations run one at a time under a single write lock covering the gate
//! check, validation, the write, and event publication. Queries share a read
//! lock and never observe a partially applied registration.
//!
//! ## Admission Policy
//!
//! | Registered airlines | Mode | Who may register | Resulting status |
//! |---------------------|------|------------------|------------------|
//! | fewer than 4 | Bootstrap | owner (as authorized caller) | `Registered` |
//! | 4 or more | Consensus | authorized caller | `PendingApproval`, 0 votes |
//!
//! An airline may sponsor flights once it holds at least 5 votes. There is
//! no voting operation, so consensus-mode airlines stay at 0 votes.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Airline names unique | `domain/registry.rs` - `register_airline()` |
//! | One airline per owner address | `domain/registry.rs` - `register_airline()` |
//! | Flight names unique | `domain/registry.rs` - `register_flight()` |
//! | Name index and ordered list agree | `domain/index.rs` - `NameIndex` |
//! | Paused registry rejects mutations | `domain/access.rs` - `check_mutation()` |
//! | Flights keep an airline snapshot | `domain/entities.rs` - `Flight::new()` |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fs_registry::prelude::*;
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let service = RegistryService::new(bus, &RegistryConfig::new(owner))?;
//!
//! service.register_airline(owner, airline_address, "Alpha Air").await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{BroadcastEventBus, InMemoryEventBus, NoopEventBus};
pub use config::{ConfigError, RegistryConfig};
pub use domain::{
    AccessGate, AdmissionMode, Address, AddressParseError, Airline, AirlineStatus, Flight,
    FlightSuretyRegistry, NameIndex, Named, RegistryError, RegistryResult, Timestamp,
    BOOTSTRAP_AIRLINE_THRESHOLD, FLIGHT_READINESS_VOTES,
};
pub use events::{EventTopic, RegistryEvent};
pub use ports::{EventBus, RegistryApi};
pub use service::{RegistryService, RegistrySnapshot, ServiceStats};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{BroadcastEventBus, InMemoryEventBus, NoopEventBus};
    pub use crate::config::RegistryConfig;
    pub use crate::domain::{
        Address, Airline, AirlineStatus, Flight, RegistryError, RegistryResult, Timestamp,
    };
    pub use crate::events::RegistryEvent;
    pub use crate::ports::{EventBus, RegistryApi};
    pub use crate::service::RegistryService;
    pub use std::sync::Arc;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
