//! Selector byte and the choice it maps to.
//!
//! The selector is the only mutable value a device instance holds. Any byte
//! may be stored; it is mapped to a [`Choice`] when it is read, so bytes
//! other than `'1'`, `'2'` and `'3'` fall through to [`Choice::Undefined`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte every instance starts with before its first write.
pub const SENTINEL: u8 = b'0';

/// Which canned response a selector picks.
///
/// # Example
///
/// ```rust
/// use selectdev::core::{Choice, Selector};
///
/// assert_eq!(Selector::new(b'2').choice(), Choice::Second);
/// assert_eq!(Selector::new(b'9').choice(), Choice::Undefined);
/// assert!(!Choice::Undefined.is_defined());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    First,
    Second,
    Third,
    Undefined,
}

impl Choice {
    /// Get the choice's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
            Self::Undefined => "Undefined",
        }
    }

    /// Whether a write explicitly selected this choice.
    ///
    /// Only `Undefined` is reachable without a recognized write, either
    /// from the initial sentinel or from an unrecognized byte.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

/// Stored selector byte.
///
/// Writes store the first byte of the caller's input verbatim; no
/// validation happens at write time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(u8);

impl Selector {
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Map the stored byte to the response it selects (pure).
    pub const fn choice(self) -> Choice {
        match self.0 {
            b'1' => Choice::First,
            b'2' => Choice::Second,
            b'3' => Choice::Third,
            _ => Choice::Undefined,
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self(SENTINEL)
    }
}

impl From<u8> for Selector {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}
