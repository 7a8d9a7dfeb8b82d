//! Admission policy constants and mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registered-airline count below which the owner admits airlines directly.
pub const BOOTSTRAP_AIRLINE_THRESHOLD: usize = 4;

/// Votes an airline needs before it may sponsor a flight.
///
/// Deliberately distinct from [`BOOTSTRAP_AIRLINE_THRESHOLD`].
pub const FLIGHT_READINESS_VOTES: u32 = 5;

/// Which admission rule applies to the next airline registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionMode {
    /// Owner-only, admitted straight to `Registered`.
    Bootstrap,
    /// Admitted as `PendingApproval` with zero votes.
    Consensus,
}

impl AdmissionMode {
    /// Mode for a registry currently holding `registered` registered airlines.
    #[must_use]
    pub fn for_registered_count(registered: usize) -> Self {
        if registered < BOOTSTRAP_AIRLINE_THRESHOLD {
            Self::Bootstrap
        } else {
            Self::Consensus
        }
    }
}

impl fmt::Display for AdmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bootstrap => f.write_str("bootstrap"),
            Self::Consensus => f.write_str("consensus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switches_at_four() {
        for n in 0..BOOTSTRAP_AIRLINE_THRESHOLD {
            assert_eq!(AdmissionMode::for_registered_count(n), AdmissionMode::Bootstrap);
        }
        assert_eq!(AdmissionMode::for_registered_count(4), AdmissionMode::Consensus);
        assert_eq!(AdmissionMode::for_registered_count(40), AdmissionMode::Consensus);
    }

    #[test]
    fn test_thresholds_are_distinct() {
        assert_eq!(BOOTSTRAP_AIRLINE_THRESHOLD, 4);
        assert_eq!(FLIGHT_READINESS_VOTES, 5);
    }
}
