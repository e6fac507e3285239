//! Per-instance behavior switches.

use crate::core::LengthMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a write reports as consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteAccounting {
    /// The caller's whole requested length, though only one byte is used.
    #[default]
    Requested,

    /// The single byte actually inspected.
    Inspected,
}

impl WriteAccounting {
    /// Bytes reported for a successful write of `requested` bytes.
    pub fn accepted(self, requested: usize) -> usize {
        match self {
            Self::Requested => requested,
            Self::Inspected => requested.min(1),
        }
    }
}

/// How a zero-length write is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyWrite {
    /// Report 0 bytes without touching the lock or the selector.
    #[default]
    Ignore,

    /// Attempt the one-byte copy anyway; an empty region faults.
    Transfer,
}

/// Options a device instance is constructed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceOptions {
    pub length_mode: LengthMode,
    pub write_accounting: WriteAccounting,
    pub empty_write: EmptyWrite,
    pub history_depth: usize,
    /// How often a blocked caller re-checks its interrupt signal
    pub lock_poll_interval: Duration,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            length_mode: LengthMode::default(),
            write_accounting: WriteAccounting::default(),
            empty_write: EmptyWrite::default(),
            history_depth: 16,
            lock_poll_interval: Duration::from_millis(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_accounting_echoes_length() {
        assert_eq!(WriteAccounting::Requested.accepted(6), 6);
        assert_eq!(WriteAccounting::Requested.accepted(1), 1);
    }

    #[test]
    fn inspected_accounting_reports_one_byte() {
        assert_eq!(WriteAccounting::Inspected.accepted(6), 1);
        assert_eq!(WriteAccounting::Inspected.accepted(0), 0);
    }

    #[test]
    fn defaults_follow_the_reference_caller_contract() {
        let options = DeviceOptions::default();
        assert_eq!(options.write_accounting, WriteAccounting::Requested);
        assert_eq!(options.empty_write, EmptyWrite::Ignore);
        assert_eq!(options.length_mode, LengthMode::Logical);
    }
}
