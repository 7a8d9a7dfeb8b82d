//! Driving ports (Inbound API)
//!
//! Caller identity is supplied by the transport/account layer and passed
//! explicitly to every mutation.

use crate::domain::{Address, Airline, Flight, RegistryResult, Timestamp};
use async_trait::async_trait;

/// Primary registry API
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Replace the authorized caller
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner
    /// - `InvalidAddress` if `new_caller` is zero
    async fn set_authorized_caller(&self, caller: Address, new_caller: Address)
        -> RegistryResult<()>;

    /// Pause or resume all registry mutations (owner only, idempotent)
    async fn set_operational(&self, caller: Address, operational: bool) -> RegistryResult<()>;

    /// Admit an airline under the bootstrap or consensus rule
    async fn register_airline(
        &self,
        caller: Address,
        owner_address: Address,
        name: &str,
    ) -> RegistryResult<Airline>;

    /// Register a flight sponsored by a flight-ready airline
    async fn register_flight(
        &self,
        caller: Address,
        airline_address: Address,
        airline_name: &str,
        flight_name: &str,
        scheduled_time: Timestamp,
    ) -> RegistryResult<Flight>;

    /// All airlines in registration order
    async fn all_airlines(&self) -> Vec<Airline>;

    /// All flights in registration order
    async fn all_flights(&self) -> Vec<Flight>;

    /// Whether `address` owns an airline, whatever its status
    async fn is_airline(&self, address: Address) -> bool;

    /// Current operational flag
    async fn is_operational(&self) -> bool;
}
