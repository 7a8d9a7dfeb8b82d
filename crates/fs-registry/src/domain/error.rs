//! Error types for the registry.
//!
//! Every failure aborts the whole mutation; nothing is applied before a
//! check fails.

use super::value_objects::Address;

/// Registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unauthorized caller: {caller:?}")]
    Unauthorized { caller: Address },

    #[error("Contract is paused")]
    ContractPaused,

    #[error("Invalid address: zero address not allowed")]
    InvalidAddress,

    #[error("Duplicate airline: {0}")]
    DuplicateAirline(String),

    #[error("Duplicate flight: {0}")]
    DuplicateFlight(String),

    #[error("Airline not found: {name} for address {address:?}")]
    AirlineNotFound { name: String, address: Address },

    #[error("Insufficient votes for {airline}: {votes}, required {required}")]
    InsufficientVotes {
        airline: String,
        votes: u32,
        required: u32,
    },
}

impl RegistryError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::ContractPaused => "contract_paused",
            Self::InvalidAddress => "invalid_address",
            Self::DuplicateAirline(_) => "duplicate_airline",
            Self::DuplicateFlight(_) => "duplicate_flight",
            Self::AirlineNotFound { .. } => "airline_not_found",
            Self::InsufficientVotes { .. } => "insufficient_votes",
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::InsufficientVotes {
            airline: "Alpha".to_string(),
            votes: 0,
            required: 5,
        };
        assert_eq!(err.to_string(), "Insufficient votes for Alpha: 0, required 5");
        assert_eq!(RegistryError::ContractPaused.to_string(), "Contract is paused");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(RegistryError::ContractPaused.kind(), "contract_paused");
        assert_eq!(
            RegistryError::DuplicateFlight("F1".into()).kind(),
            "duplicate_flight"
        );
        assert_eq!(
            RegistryError::Unauthorized {
                caller: Address::ZERO
            }
            .kind(),
            "unauthorized"
        );
    }
}
