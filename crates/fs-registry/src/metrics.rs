//! # Registry Metrics
//!
//! Prometheus metrics for the airline/flight registry.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! fs-registry = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `fs_registry_mutations_accepted_total` - Committed mutations, by operation
//! - `fs_registry_mutations_rejected_total` - Rejected mutations, by error kind
//! - `fs_registry_airlines` - Airlines held by the registry
//! - `fs_registry_flights` - Flights held by the registry

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref MUTATIONS_ACCEPTED: IntCounterVec = register_int_counter_vec!(
        "fs_registry_mutations_accepted_total",
        "Total number of committed registry mutations",
        &["operation"]
    )
    .expect("Failed to create MUTATIONS_ACCEPTED metric");

    pub static ref MUTATIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "fs_registry_mutations_rejected_total",
        "Total number of rejected registry mutations",
        &["reason"]
    )
    .expect("Failed to create MUTATIONS_REJECTED metric");

    pub static ref AIRLINES: IntGauge = register_int_gauge!(
        "fs_registry_airlines",
        "Number of airlines in the registry"
    )
    .expect("Failed to create AIRLINES metric");

    pub static ref FLIGHTS: IntGauge = register_int_gauge!(
        "fs_registry_flights",
        "Number of flights in the registry"
    )
    .expect("Failed to create FLIGHTS metric");
}

#[cfg(feature = "metrics")]
pub fn record_mutation_accepted(operation: &str) {
    MUTATIONS_ACCEPTED.with_label_values(&[operation]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_mutation_rejected(reason: &str) {
    MUTATIONS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_registry_size(airlines: usize, flights: usize) {
    AIRLINES.set(i64::try_from(airlines).unwrap_or(i64::MAX));
    FLIGHTS.set(i64::try_from(flights).unwrap_or(i64::MAX));
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_mutation_accepted(_operation: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_mutation_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_registry_size(_airlines: usize, _flights: usize) {}
