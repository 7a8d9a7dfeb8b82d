//! # Genesis Module
//!
//! Initial registry population.
//!
//! ## Initialization Sequence
//!
//! 1. Validate the founding airline set (unique names and addresses)
//! 2. Register each airline as the owner, in order
//! 3. Hand the authorized caller to the configured application address

pub mod builder;

pub use builder::{apply_genesis, GenesisAirline, GenesisConfig, GenesisError, GenesisReport};
