//! Tracked address + fiat currency. Validated before any I/O happens.
use std::str::FromStr;

use bitcoin::{address::NetworkUnchecked, Address, Network};

use crate::error::TrackerError;

/// Environment variable holding the tracked address.
pub const ADDRESS_ENV: &str = "TRACKER_ADDRESS";
/// Environment variable holding the fiat currency code (optional).
pub const CURRENCY_ENV: &str = "TRACKER_CURRENCY";

const DEFAULT_CURRENCY: &str = "CAD";

/// What the tracker watches: one mainnet address and one fiat currency code.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// The Bitcoin address whose incoming outputs are summed.
    pub address: String,
    /// Fiat currency code used for historical and live price lookups.
    pub currency: String,
}

impl TrackerConfig {
    /// Build a config for `address`, rejecting anything that does not parse
    /// as a mainnet Bitcoin address. Currency defaults to CAD.
    pub fn new(address: impl Into<String>) -> Result<Self, TrackerError> {
        let address = address.into();
        let parsed = Address::<NetworkUnchecked>::from_str(&address).map_err(|e| {
            TrackerError::Configuration {
                reason: format!("invalid address {address:?}: {e}"),
            }
        })?;
        parsed
            .require_network(Network::Bitcoin)
            .map_err(|e| TrackerError::Configuration {
                reason: format!("address {address:?} is not mainnet: {e}"),
            })?;
        Ok(Self {
            address,
            currency: DEFAULT_CURRENCY.to_string(),
        })
    }

    /// Override the fiat currency code (e.g. `USD`, `EUR`).
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Read [`ADDRESS_ENV`] (required) and [`CURRENCY_ENV`] (optional).
    pub fn from_env() -> Result<Self, TrackerError> {
        let address = std::env::var(ADDRESS_ENV).map_err(|_| TrackerError::Configuration {
            reason: format!("{ADDRESS_ENV} is not set"),
        })?;
        let mut cfg = Self::new(address)?;
        if let Ok(currency) = std::env::var(CURRENCY_ENV) {
            cfg.currency = currency;
        }
        Ok(cfg)
    }
}
