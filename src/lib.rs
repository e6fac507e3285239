//! Selectdev: a four-state selector pseudo-device
//!
//! Each device instance stores a single selector byte. Writing picks the
//! selector from the first byte of the input; reading returns the canned
//! response for the current selector:
//!
//! | selector | response |
//! |----------|----------|
//! | `'1'` | `FIRST!` |
//! | `'2'` | `SECOND!` |
//! | `'3'` | `THIRD!` |
//! | anything else | `NOT DEFINED!` |
//!
//! # Layout
//!
//! - **core**: pure selector mapping, response table and change history
//! - **device**: the locked instance and the [`CharDevice`] interface
//! - **registry**: owner of all instances, built from a [`DeviceConfig`]
//! - **config**: JSON or builder configuration with accumulated validation
//!
//! # Example
//!
//! ```rust
//! use selectdev::{DeviceConfig, DeviceRegistry};
//!
//! let registry = DeviceRegistry::new(DeviceConfig::default()).unwrap();
//! let mut file = registry.open(0).unwrap();
//!
//! let accepted = registry.write(&mut file, "2extra".into()).unwrap();
//! assert_eq!(accepted, 6);
//!
//! let mut buf = [0u8; 16];
//! let n = registry.read(&mut file, (&mut buf).into()).unwrap();
//! assert_eq!(&buf[..n], b"SECOND!");
//!
//! registry.close(file).unwrap();
//! registry.shutdown();
//! ```

pub mod config;
pub mod core;
pub mod device;
pub mod registry;

// Re-export commonly used types
pub use config::{DeviceConfig, DeviceConfigBuilder};
pub use crate::core::{Choice, LengthMode, Selector};
pub use device::{CharDevice, DeviceError, DeviceInstance, OpenFile, UserSlice, UserSliceMut};
pub use registry::DeviceRegistry;
