//! Registry configuration

use crate::domain::{AccessGate, Address, FlightSuretyRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The deployment owner cannot be the zero address.
    #[error("Registry owner must not be the zero address")]
    ZeroOwner,
}

/// Deployment parameters fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Deployment owner. Immutable for the life of the registry.
    pub owner: Address,
    /// Initial operational flag.
    pub operational: bool,
}

impl RegistryConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            operational: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        Ok(())
    }

    /// Build an empty registry from this configuration.
    pub fn build(&self) -> Result<FlightSuretyRegistry, ConfigError> {
        self.validate()?;
        Ok(FlightSuretyRegistry::with_gate(AccessGate::with_operational(
            self.owner,
            self.operational,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_owner_rejected() {
        let config = RegistryConfig::new(Address::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroOwner));
        assert!(config.build().is_err());
    }

    #[test]
    fn test_build_applies_operational_flag() {
        let owner = Address([7; 20]);
        let mut config = RegistryConfig::new(owner);
        config.operational = false;

        let registry = config.build().unwrap();
        assert_eq!(registry.gate().owner(), owner);
        assert!(!registry.gate().is_operational());
    }
}
