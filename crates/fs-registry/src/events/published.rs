//! Published events (Outgoing)

use crate::domain::{Address, Airline, Timestamp};
use serde::{Deserialize, Serialize};

/// Event topics for subscriber filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    Access,
    Airlines,
    Flights,
}

/// Emitted after the owner replaces the authorized caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedCallerChangedEvent {
    pub previous: Address,
    pub current: Address,
}

/// Emitted after an airline is admitted. Carries the full record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineRegisteredEvent {
    pub airline: Airline,
}

/// Emitted after a flight is registered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRegisteredEvent {
    pub airline_name: String,
    pub flight_name: String,
    pub scheduled_time: Timestamp,
}

/// Everything the registry publishes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RegistryEvent {
    AuthorizedCallerChanged(AuthorizedCallerChangedEvent),
    AirlineRegistered(AirlineRegisteredEvent),
    FlightRegistered(FlightRegisteredEvent),
}

impl RegistryEvent {
    pub fn authorized_caller_changed(previous: Address, current: Address) -> Self {
        Self::AuthorizedCallerChanged(AuthorizedCallerChangedEvent { previous, current })
    }

    pub fn airline_registered(airline: Airline) -> Self {
        Self::AirlineRegistered(AirlineRegisteredEvent { airline })
    }

    pub fn flight_registered(
        airline_name: impl Into<String>,
        flight_name: impl Into<String>,
        scheduled_time: Timestamp,
    ) -> Self {
        Self::FlightRegistered(FlightRegisteredEvent {
            airline_name: airline_name.into(),
            flight_name: flight_name.into(),
            scheduled_time,
        })
    }

    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AuthorizedCallerChanged(_) => EventTopic::Access,
            Self::AirlineRegistered(_) => EventTopic::Airlines,
            Self::FlightRegistered(_) => EventTopic::Flights,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorizedCallerChanged(_) => "AuthorizedCallerChanged",
            Self::AirlineRegistered(_) => "AirlineRegistered",
            Self::FlightRegistered(_) => "FlightRegistered",
        }
    }
}
