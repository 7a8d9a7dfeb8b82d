//! # Node Configuration
//!
//! Unified configuration for the registry node.
//!
//! ## Environment Variables
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `FS_OWNER_ADDRESS` | yes | Deployment owner (20-byte hex) |
//! | `FS_OPERATIONAL` | no | Start operational (default: true) |
//! | `FS_AUTHORIZED_CALLER` | no | Caller to hand over to after genesis |
//! | `FS_GENESIS_AIRLINES` | no | `0xADDR:Name,0xADDR:Name` |
//! | `FS_EVENT_CHANNEL_CAPACITY` | no | Broadcast buffer (default: 1024) |

use std::env;

use fs_registry::adapters::DEFAULT_CHANNEL_CAPACITY;
use fs_registry::{Address, AddressParseError, RegistryConfig};
use thiserror::Error;

use crate::genesis::{GenesisAirline, GenesisConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    /// An address variable does not parse.
    #[error("Invalid address in {var}: {source}")]
    InvalidAddress {
        var: &'static str,
        #[source]
        source: AddressParseError,
    },

    /// A boolean or numeric variable does not parse.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    /// A genesis airline entry is malformed.
    #[error("Invalid genesis airline entry: {0}")]
    InvalidGenesisEntry(String),

    /// The registry rejects the configuration.
    #[error(transparent)]
    Registry(#[from] fs_registry::ConfigError),
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Registry deployment parameters.
    pub registry: RegistryConfig,
    /// Genesis airline set and caller hand-over.
    pub genesis: GenesisConfig,
    /// Broadcast buffer for event subscribers.
    pub event_channel_capacity: usize,
}

impl NodeConfig {
    /// Configuration for `owner` with no genesis airlines.
    pub fn new(owner: Address) -> Self {
        Self {
            registry: RegistryConfig::new(owner),
            genesis: GenesisConfig::default(),
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner = lookup("FS_OWNER_ADDRESS")
            .ok_or(ConfigError::Missing("FS_OWNER_ADDRESS"))
            .and_then(|v| parse_address("FS_OWNER_ADDRESS", &v))?;

        let mut config = Self::new(owner);

        if let Some(value) = lookup("FS_OPERATIONAL") {
            config.registry.operational = parse_bool("FS_OPERATIONAL", &value)?;
        }

        if let Some(value) = lookup("FS_AUTHORIZED_CALLER") {
            config.genesis.authorized_caller =
                Some(parse_address("FS_AUTHORIZED_CALLER", &value)?);
        }

        if let Some(value) = lookup("FS_GENESIS_AIRLINES") {
            config.genesis.airlines = parse_genesis_airlines(&value)?;
        }

        if let Some(value) = lookup("FS_EVENT_CHANNEL_CAPACITY") {
            config.event_channel_capacity = value
                .trim()
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "FS_EVENT_CHANNEL_CAPACITY",
                    value,
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        self.genesis
            .validate()
            .map_err(|e| ConfigError::InvalidGenesisEntry(e.to_string()))
    }
}

fn parse_address(var: &'static str, value: &str) -> Result<Address, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { var, source })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

/// Parse `0xADDR:Name,0xADDR:Name`. Empty segments are ignored.
fn parse_genesis_airlines(value: &str) -> Result<Vec<GenesisAirline>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (address, name) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidGenesisEntry(entry.to_string()))?;
            let address = parse_address("FS_GENESIS_AIRLINES", address)?;
            Ok(GenesisAirline::new(address, name.trim()))
        })
        .collect()
}
