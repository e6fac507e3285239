//! Device errors and their errno values.

use crate::config::ConfigError;
use thiserror::Error;
use uuid::Uuid;

pub const EBADF: i32 = 9;
pub const ENOMEM: i32 = 12;
pub const EFAULT: i32 = 14;
pub const ENODEV: i32 = 19;
pub const EINVAL: i32 = 22;
pub const ERESTARTSYS: i32 = 512;

/// Errors that can occur while driving a device
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Caller memory for the transfer could not be accessed
    #[error("Bad address: caller buffer is not accessible")]
    BadAddress,

    /// Interrupted while waiting for the instance lock
    #[error("Interrupted while waiting for the device lock")]
    Interrupted,

    #[error("Output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    #[error("No such device {index} (registry holds {count})")]
    NoSuchDevice { index: usize, count: usize },

    #[error("Handle {handle} belongs to device {found}, not device {expected}")]
    ForeignHandle {
        handle: Uuid,
        expected: usize,
        found: usize,
    },

    #[error("Could not allocate storage for {requested} devices")]
    AllocationFailure { requested: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DeviceError {
    /// Positive errno a host shim hands back to its caller.
    pub fn errno(&self) -> i32 {
        match self {
            Self::BadAddress => EFAULT,
            Self::Interrupted => ERESTARTSYS,
            Self::BufferTooSmall { .. } | Self::Config(_) => EINVAL,
            Self::NoSuchDevice { .. } => ENODEV,
            Self::ForeignHandle { .. } => EBADF,
            Self::AllocationFailure { .. } => ENOMEM,
        }
    }

    /// Whether the caller may simply retry the same call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
