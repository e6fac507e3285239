//! Device shell around the pure core.
//!
//! This module holds everything that touches shared state or caller memory:
//!
//! - **Instance**: selector, responses and the per-instance lock
//! - **CharDevice**: the open/close/read/write interface hosts drive
//! - **OpenFile**: a caller's handle with its offset and interrupt signal
//! - **UserSlice**: caller memory that may fault
//!
//! Every failure path releases the instance lock through its scoped guard.

mod error;
mod file;
mod instance;
mod interrupt;
mod ops;
mod options;
mod user;

pub use error::{DeviceError, EBADF, EFAULT, EINVAL, ENODEV, ENOMEM, ERESTARTSYS};
pub use file::OpenFile;
pub use instance::{DeviceInstance, InstanceSnapshot};
pub use interrupt::Interrupt;
pub use ops::CharDevice;
pub use options::{DeviceOptions, EmptyWrite, WriteAccounting};
pub use user::{Fault, UserSlice, UserSliceMut};
