//! Interruption signal for callers blocked on an instance lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag another thread raises to abort a blocked read or write.
///
/// Clones share the same flag. A raised signal only affects calls that are
/// waiting for the lock; a call that gets the lock straight away proceeds.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Consume a raised signal, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}
