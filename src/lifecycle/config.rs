//! Order manager settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`OrderManagerConfig::channel_capacity`].
pub const CHANNEL_CAPACITY_ENV: &str = "ORDER_MANAGER_CHANNEL_CAPACITY";

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("channel capacity must be greater than zero")]
    ZeroCapacity,
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderManagerConfig {
    /// Queue capacity for each command kind. Callers wait once their kind's
    /// queue is full.
    pub channel_capacity: usize,
}

impl Default for OrderManagerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl OrderManagerConfig {
    /// Defaults, overridden by `ORDER_MANAGER_CHANNEL_CAPACITY` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(CHANNEL_CAPACITY_ENV) {
            config.channel_capacity =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: CHANNEL_CAPACITY_ENV,
                        value: value.clone(),
                    })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
