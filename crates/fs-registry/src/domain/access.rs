//! Access gate: owner, authorized caller, operational flag.
//!
//! Every registry mutation passes through [`AccessGate::check_mutation`].
//! Reads never touch the gate.

use super::error::{RegistryError, RegistryResult};
use super::value_objects::Address;
use serde::{Deserialize, Serialize};

/// Owner-controlled guard in front of the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGate {
    owner: Address,
    authorized_caller: Address,
    operational: bool,
}

impl AccessGate {
    /// Create a gate owned by `owner`, operational, with the owner as the
    /// authorized caller.
    pub fn new(owner: Address) -> Self {
        Self::with_operational(owner, true)
    }

    /// Create a gate with an explicit initial operational flag.
    pub fn with_operational(owner: Address, operational: bool) -> Self {
        Self {
            owner,
            authorized_caller: owner,
            operational,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn authorized_caller(&self) -> Address {
        self.authorized_caller
    }

    pub fn is_operational(&self) -> bool {
        self.operational
    }

    pub fn is_owner(&self, caller: Address) -> bool {
        caller == self.owner
    }

    /// Replace the authorized caller. Returns the previous one.
    pub fn set_authorized_caller(
        &mut self,
        caller: Address,
        new_caller: Address,
    ) -> RegistryResult<Address> {
        self.require_owner(caller)?;
        if new_caller.is_zero() {
            return Err(RegistryError::InvalidAddress);
        }
        Ok(std::mem::replace(&mut self.authorized_caller, new_caller))
    }

    /// Set the operational flag. Setting the current value is a silent no-op.
    pub fn set_operational(&mut self, caller: Address, operational: bool) -> RegistryResult<()> {
        self.require_owner(caller)?;
        self.operational = operational;
        Ok(())
    }

    /// Operational check first, then caller authorization.
    pub fn check_mutation(&self, caller: Address) -> RegistryResult<()> {
        if !self.operational {
            return Err(RegistryError::ContractPaused);
        }
        if caller != self.authorized_caller {
            return Err(RegistryError::Unauthorized { caller });
        }
        Ok(())
    }

    pub fn require_owner(&self, caller: Address) -> RegistryResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized { caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address([1; 20]);
    const APP: Address = Address([2; 20]);
    const STRANGER: Address = Address([3; 20]);

    #[test]
    fn test_new_gate_defaults() {
        let gate = AccessGate::new(OWNER);
        assert_eq!(gate.owner(), OWNER);
        assert_eq!(gate.authorized_caller(), OWNER);
        assert!(gate.is_operational());
        assert!(gate.check_mutation(OWNER).is_ok());
    }

    #[test]
    fn test_gate_starting_paused() {
        let gate = AccessGate::with_operational(OWNER, false);
        assert!(!gate.is_operational());
        assert_eq!(gate.check_mutation(OWNER), Err(RegistryError::ContractPaused));
    }

    #[test]
    fn test_set_authorized_caller_owner_only() {
        let mut gate = AccessGate::new(OWNER);
        assert_eq!(
            gate.set_authorized_caller(STRANGER, APP),
            Err(RegistryError::Unauthorized { caller: STRANGER })
        );
        assert_eq!(gate.set_authorized_caller(OWNER, APP), Ok(OWNER));
        assert_eq!(gate.authorized_caller(), APP);
    }

    #[test]
    fn test_set_authorized_caller_rejects_zero() {
        let mut gate = AccessGate::new(OWNER);
        assert_eq!(
            gate.set_authorized_caller(OWNER, Address::ZERO),
            Err(RegistryError::InvalidAddress)
        );
        assert_eq!(gate.authorized_caller(), OWNER);
    }

    #[test]
    fn test_check_mutation_order() {
        let mut gate = AccessGate::new(OWNER);
        gate.set_operational(OWNER, false).unwrap();

        // Paused takes precedence over authorization
        assert_eq!(gate.check_mutation(STRANGER), Err(RegistryError::ContractPaused));
        assert_eq!(gate.check_mutation(OWNER), Err(RegistryError::ContractPaused));

        gate.set_operational(OWNER, true).unwrap();
        assert_eq!(
            gate.check_mutation(STRANGER),
            Err(RegistryError::Unauthorized { caller: STRANGER })
        );
    }

    #[test]
    fn test_set_operational_is_idempotent() {
        let mut gate = AccessGate::new(OWNER);
        assert!(gate.set_operational(OWNER, true).is_ok());
        assert!(gate.set_operational(OWNER, true).is_ok());
        assert!(gate.is_operational());
        assert!(gate.set_operational(APP, false).is_err());
        assert!(gate.is_operational());
    }

    #[test]
    fn test_owner_can_toggle_while_paused() {
        let mut gate = AccessGate::new(OWNER);
        gate.set_operational(OWNER, false).unwrap();
        gate.set_authorized_caller(OWNER, APP).unwrap();
        gate.set_operational(OWNER, true).unwrap();
        assert!(gate.check_mutation(APP).is_ok());
    }
}
