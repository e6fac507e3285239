//! Pure core of the selector device.
//!
//! This module contains the logic that needs no locking:
//! - Selector bytes and the choice they map to
//! - The immutable response table and length modes
//! - Bounded history of selector changes
//!
//! The device shell in [`crate::device`] wraps these values in a lock.

mod history;
mod response;
mod selector;

pub use history::{SelectorChange, SelectorHistory};
pub use response::{LengthMode, Response, ResponseTable, ANSWER_SLOT, NOT_DEFINED_SLOT};
pub use selector::{Choice, Selector, SENTINEL};
