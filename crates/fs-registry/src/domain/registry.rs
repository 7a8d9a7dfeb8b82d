//! Registry aggregate
//!
//! Owns the access gate and both entity registries. All validation happens
//! before the first write, so a failed call leaves every index unchanged.

use super::access::AccessGate;
use super::entities::{Airline, AirlineStatus, Flight};
use super::error::{RegistryError, RegistryResult};
use super::index::NameIndex;
use super::policy::{AdmissionMode, FLIGHT_READINESS_VOTES};
use super::value_objects::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Airline and flight registry behind an access gate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RegistryRecord")]
pub struct FlightSuretyRegistry {
    gate: AccessGate,
    airlines: NameIndex<Airline>,
    /// Addresses that own an airline, derived from `airlines`
    #[serde(skip)]
    airline_owners: HashSet<Address>,
    flights: NameIndex<Flight>,
}

/// Serialized form. The owner set is rebuilt from the airlines on load.
#[derive(Deserialize)]
struct RegistryRecord {
    gate: AccessGate,
    airlines: NameIndex<Airline>,
    flights: NameIndex<Flight>,
}

impl TryFrom<RegistryRecord> for FlightSuretyRegistry {
    type Error = String;

    fn try_from(record: RegistryRecord) -> Result<Self, Self::Error> {
        let mut airline_owners = HashSet::with_capacity(record.airlines.len());
        for airline in record.airlines.iter() {
            if airline.owner_address.is_zero() {
                return Err(format!("airline {} has a zero owner address", airline.name));
            }
            if !airline_owners.insert(airline.owner_address) {
                return Err(format!(
                    "owner address {} holds more than one airline",
                    airline.owner_address
                ));
            }
        }

        Ok(Self {
            gate: record.gate,
            airlines: record.airlines,
            airline_owners,
            flights: record.flights,
        })
    }
}

impl FlightSuretyRegistry {
    /// Create an empty registry owned by `owner`
    pub fn new(owner: Address) -> Self {
        Self::with_gate(AccessGate::new(owner))
    }

    /// Create an empty registry behind an existing gate
    pub fn with_gate(gate: AccessGate) -> Self {
        Self {
            gate,
            airlines: NameIndex::new(),
            airline_owners: HashSet::new(),
            flights: NameIndex::new(),
        }
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    // === ACCESS GATE ===

    /// Owner-only. Returns the previous authorized caller.
    pub fn set_authorized_caller(
        &mut self,
        caller: Address,
        new_caller: Address,
    ) -> RegistryResult<Address> {
        self.gate.set_authorized_caller(caller, new_caller)
    }

    /// Owner-only. Returns the previous flag value.
    pub fn set_operational(&mut self, caller: Address, operational: bool) -> RegistryResult<bool> {
        let previous = self.gate.is_operational();
        self.gate.set_operational(caller, operational)?;
        Ok(previous)
    }

    // === AIRLINES ===

    /// Admit a new airline.
    ///
    /// Bootstrap mode: caller must be the owner, airline is `Registered`.
    /// Consensus mode: airline is `PendingApproval` with zero votes.
    pub fn register_airline(
        &mut self,
        caller: Address,
        owner_address: Address,
        name: &str,
    ) -> RegistryResult<Airline> {
        self.gate.check_mutation(caller)?;

        if owner_address.is_zero() {
            return Err(RegistryError::InvalidAddress);
        }

        let mode = self.admission_mode();
        if mode == AdmissionMode::Bootstrap {
            self.gate.require_owner(caller)?;
        }

        if self.airlines.exists(name) {
            return Err(RegistryError::DuplicateAirline(name.to_string()));
        }
        if self.airline_owners.contains(&owner_address) {
            return Err(RegistryError::DuplicateAirline(owner_address.to_hex()));
        }

        let status = match mode {
            AdmissionMode::Bootstrap => AirlineStatus::Registered,
            AdmissionMode::Consensus => AirlineStatus::PendingApproval,
        };
        let airline = self
            .airlines
            .insert(Airline::new(name, owner_address, status))
            .map_err(|rejected| RegistryError::DuplicateAirline(rejected.name))?
            .clone();
        self.airline_owners.insert(owner_address);

        Ok(airline)
    }

    /// Every airline in registration order
    pub fn all_airlines(&self) -> &[Airline] {
        self.airlines.list()
    }

    pub fn airline(&self, name: &str) -> Option<&Airline> {
        self.airlines.get(name)
    }

    /// Whether `address` owns an airline, whatever its status
    pub fn is_airline(&self, address: &Address) -> bool {
        self.airline_owners.contains(address)
    }

    /// Airlines whose status counts as registered
    pub fn registered_airline_count(&self) -> usize {
        self.airlines
            .iter()
            .filter(|a| a.status.is_registered())
            .count()
    }

    pub fn admission_mode(&self) -> AdmissionMode {
        AdmissionMode::for_registered_count(self.registered_airline_count())
    }

    // === FLIGHTS ===

    /// Register a flight sponsored by the airline `airline_name`.
    ///
    /// A name/address mismatch is reported as `AirlineNotFound`.
    pub fn register_flight(
        &mut self,
        caller: Address,
        airline_address: Address,
        airline_name: &str,
        flight_name: &str,
        scheduled_time: Timestamp,
    ) -> RegistryResult<Flight> {
        self.gate.check_mutation(caller)?;

        if self.flights.exists(flight_name) {
            return Err(RegistryError::DuplicateFlight(flight_name.to_string()));
        }

        let airline = self
            .airlines
            .get(airline_name)
            .filter(|a| a.owner_address == airline_address)
            .ok_or_else(|| RegistryError::AirlineNotFound {
                name: airline_name.to_string(),
                address: airline_address,
            })?;

        if !airline.is_flight_ready() {
            return Err(RegistryError::InsufficientVotes {
                airline: airline.name.clone(),
                votes: airline.votes,
                required: FLIGHT_READINESS_VOTES,
            });
        }

        let flight = Flight::new(flight_name, scheduled_time, airline);
        let flight = self
            .flights
            .insert(flight)
            .map_err(|rejected| RegistryError::DuplicateFlight(rejected.name))?
            .clone();

        Ok(flight)
    }

    /// Every flight in registration order
    pub fn all_flights(&self) -> &[Flight] {
        self.flights.list()
    }

    pub fn flight(&self, name: &str) -> Option<&Flight> {
        self.flights.get(name)
    }

    pub fn is_flight_registered(&self, name: &str) -> bool {
        self.flights.exists(name)
    }

    /// Test hook standing in for the absent voting operation.
    #[cfg(test)]
    pub(crate) fn force_votes(&mut self, name: &str, votes: u32) {
        if let Some(airline) = self.airlines.get_mut(name) {
            airline.votes = votes;
        }
    }
}
