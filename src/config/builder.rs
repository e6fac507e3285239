//! Builder for constructing configurations.

use super::error::ConfigError;
use super::DeviceConfig;
use crate::core::LengthMode;
use crate::device::{EmptyWrite, WriteAccounting};
use std::time::Duration;

/// Builder for [`DeviceConfig`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use selectdev::config::DeviceConfigBuilder;
/// use selectdev::device::WriteAccounting;
///
/// let config = DeviceConfigBuilder::new()
///     .instances(3)
///     .write_accounting(WriteAccounting::Inspected)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.instance_count, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeviceConfigBuilder {
    config: DeviceConfig,
}

impl DeviceConfigBuilder {
    /// Create a builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(mut self, count: usize) -> Self {
        self.config.instance_count = count;
        self
    }

    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.config.base_name = name.into();
        self
    }

    pub fn length_mode(mut self, mode: LengthMode) -> Self {
        self.config.length_mode = mode;
        self
    }

    pub fn write_accounting(mut self, accounting: WriteAccounting) -> Self {
        self.config.write_accounting = accounting;
        self
    }

    pub fn empty_write(mut self, policy: EmptyWrite) -> Self {
        self.config.empty_write = policy;
        self
    }

    pub fn history_depth(mut self, depth: usize) -> Self {
        self.config.history_depth = depth;
        self
    }

    /// Set the interrupt re-check interval (whole milliseconds).
    pub fn lock_poll_interval(mut self, interval: Duration) -> Self {
        self.config.lock_poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Build the configuration.
    /// Returns every violated rule if validation fails.
    pub fn build(self) -> Result<DeviceConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
