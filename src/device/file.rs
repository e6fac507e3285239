//! Open handles onto a device instance.

use super::interrupt::Interrupt;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One caller's open association with a device instance.
///
/// Carries the caller's stream offset and interrupt signal. Handles are not
/// cloneable; reads and writes take them by `&mut` so a handle has one user
/// at a time, while [`Interrupt`] clones let other threads cancel a blocked
/// call.
#[derive(Debug)]
pub struct OpenFile {
    id: Uuid,
    index: usize,
    offset: u64,
    interrupt: Interrupt,
    opened_at: DateTime<Utc>,
}

impl OpenFile {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            index,
            offset: 0,
            interrupt: Interrupt::new(),
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Index of the instance this handle is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bytes transferred through this handle so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub(crate) fn advance(&mut self, bytes: usize) {
        self.offset = self.offset.saturating_add(bytes as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_starts_at_offset_zero() {
        let file = OpenFile::new(2);
        assert_eq!(file.index(), 2);
        assert_eq!(file.offset(), 0);
        assert!(!file.interrupt().is_raised());
    }

    #[test]
    fn advance_accumulates() {
        let mut file = OpenFile::new(0);
        file.advance(6);
        file.advance(12);
        assert_eq!(file.offset(), 18);
    }

    #[test]
    fn handles_get_distinct_ids() {
        assert_ne!(OpenFile::new(0).id(), OpenFile::new(0).id());
    }
}
