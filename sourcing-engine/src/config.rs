use rust_decimal::Decimal;
use std::time::Duration;

use crate::cost;

/// Settings fixed for the lifetime of an [`AllocationEngine`](crate::AllocationEngine).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// The cost of moving one unit over one unit of distance. Finite and non-negative.
    pub transport_rate: f64,

    /// How long to wait on any single collaborator call (if omitted, wait indefinitely)
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "humantime_serde::option")
    )]
    pub timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transport_rate: 0.01,
            timeout: None,
        }
    }
}

impl EngineConfig {
    /// The transport rate as a decimal, if it is valid
    pub fn transport_rate(&self) -> Result<Decimal, ConfigError> {
        cost::non_negative(self.transport_rate)
            .ok_or(ConfigError::TransportRate(self.transport_rate))
    }

    /// The collaborator deadline, if it is valid
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.timeout {
            Some(limit) if limit.is_zero() => Err(ConfigError::ZeroTimeout),
            timeout => Ok(timeout),
        }
    }
}

/// Errors in an engine configuration
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The transport rate is negative, NaN, infinite, or too large
    #[error("transport rate must be finite and non-negative, got {0}")]
    TransportRate(f64),
    /// A zero timeout would fail every call
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
