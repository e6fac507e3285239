//! Registry configuration.
//!
//! A [`DeviceConfig`] can be loaded from JSON or assembled with
//! [`DeviceConfigBuilder`]. Both paths end in [`DeviceConfig::validate`],
//! which reports every broken rule at once.
//!
//! # Example
//!
//! ```rust
//! use selectdev::config::DeviceConfig;
//! use selectdev::core::LengthMode;
//!
//! let config = DeviceConfig::from_json(
//!     r#"{ "instance_count": 2, "length_mode": "fixed_slot" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.instance_count, 2);
//! assert_eq!(config.length_mode, LengthMode::FixedSlot);
//! assert_eq!(config.base_name, "chardevice");
//! ```

pub mod builder;
pub mod error;
pub mod validation;

pub use builder::DeviceConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::core::LengthMode;
use crate::device::{DeviceOptions, EmptyWrite, WriteAccounting};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;

pub const DEFAULT_BASE_NAME: &str = "chardevice";

/// Settings for a registry and the instances it builds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Number of independent instances
    pub instance_count: usize,

    /// Instance names are this followed by the index
    pub base_name: String,

    pub length_mode: LengthMode,

    pub write_accounting: WriteAccounting,

    pub empty_write: EmptyWrite,

    /// Selector changes kept per instance; 0 disables history
    pub history_depth: usize,

    /// How often a caller blocked on a lock re-checks its interrupt signal
    pub lock_poll_interval_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let options = DeviceOptions::default();
        Self {
            instance_count: 1,
            base_name: DEFAULT_BASE_NAME.to_string(),
            length_mode: options.length_mode,
            write_accounting: options.write_accounting,
            empty_write: options.empty_write,
            history_depth: options.history_depth,
            lock_poll_interval_ms: u64::try_from(options.lock_poll_interval.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

impl DeviceConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every rule, reporting all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match validation::validate(self) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Options handed to each instance.
    pub fn device_options(&self) -> DeviceOptions {
        DeviceOptions {
            length_mode: self.length_mode,
            write_accounting: self.write_accounting,
            empty_write: self.empty_write,
            history_depth: self.history_depth,
            lock_poll_interval: Duration::from_millis(self.lock_poll_interval_ms),
        }
    }

    /// Name of the instance at `index`, e.g. `chardevice0`.
    pub fn device_name(&self, index: usize) -> String {
        format!("{}{}", self.base_name, index)
    }
}
