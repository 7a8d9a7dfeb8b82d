//! # Domain Entities
//!
//! Airlines and flights as held by the registry.

use super::index::Named;
use super::policy::FLIGHT_READINESS_VOTES;
use super::value_objects::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flight status code before any collaborator reports one.
pub const STATUS_CODE_UNKNOWN: u8 = 0;

// =============================================================================
// AIRLINE
// =============================================================================

/// Admission status of an airline.
///
/// `(none) -> PendingApproval -> Registered -> Paid`. Nothing in this crate
/// moves an airline into `Paid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirlineStatus {
    /// Admitted in consensus mode, awaiting support.
    PendingApproval,
    /// Fully registered.
    Registered,
    /// Registered and funded.
    Paid,
}

impl AirlineStatus {
    /// Whether this status counts toward the registered-airline total.
    #[must_use]
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Registered | Self::Paid)
    }
}

impl fmt::Display for AirlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PendingApproval => "pending_approval",
            Self::Registered => "registered",
            Self::Paid => "paid",
        };
        f.write_str(s)
    }
}

/// An organization participating in the scheme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    /// Admission status.
    pub status: AirlineStatus,
    /// Unique registry key.
    pub name: String,
    /// Identity controlling this airline.
    pub owner_address: Address,
    /// Accumulated consensus support.
    pub votes: u32,
}

impl Airline {
    /// Creates an airline with zero votes.
    pub fn new(name: impl Into<String>, owner_address: Address, status: AirlineStatus) -> Self {
        Self {
            status,
            name: name.into(),
            owner_address,
            votes: 0,
        }
    }

    /// Whether the airline has enough support to sponsor flights.
    #[must_use]
    pub fn is_flight_ready(&self) -> bool {
        self.votes >= FLIGHT_READINESS_VOTES
    }
}

impl Named for Airline {
    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// FLIGHT
// =============================================================================

/// A product offered by an airline.
///
/// `airline` is a copy of the sponsoring airline taken at registration time.
/// Later changes to the airline are not reflected here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Always true once created.
    pub is_registered: bool,
    /// Status byte set by an external collaborator; `0` means unknown.
    pub status_code: u8,
    /// Scheduled/operational time supplied at creation.
    pub updated_timestamp: Timestamp,
    /// Unique registry key.
    pub name: String,
    /// Sponsoring airline as it was at registration.
    pub airline: Airline,
}

impl Flight {
    /// Creates a registered flight with an unknown status code.
    pub fn new(name: impl Into<String>, scheduled_time: Timestamp, airline: &Airline) -> Self {
        Self {
            is_registered: true,
            status_code: STATUS_CODE_UNKNOWN,
            updated_timestamp: scheduled_time,
            name: name.into(),
            airline: airline.clone(),
        }
    }
}

impl Named for Flight {
    fn name(&self) -> &str {
        &self.name
    }
}
