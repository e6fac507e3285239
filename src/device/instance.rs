//! Device instance: selector, canned responses and the lock guarding them.

use super::error::DeviceError;
use super::file::OpenFile;
use super::options::{DeviceOptions, EmptyWrite};
use super::ops::CharDevice;
use super::user::{UserSlice, UserSliceMut};
use crate::core::{ResponseTable, Selector, SelectorChange, SelectorHistory};
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Mutable part of an instance. Only reachable through the lock.
#[derive(Debug)]
struct InstanceState {
    selector: Selector,
    history: SelectorHistory,
}

/// Point-in-time view of an instance for status reporting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstanceSnapshot {
    pub index: usize,
    pub name: String,
    pub selector: Selector,
    pub response: &'static str,
    pub open_handles: usize,
    pub history: SelectorHistory,
}

/// One independent selector device.
///
/// The responses are fixed at construction. The selector and its history
/// sit behind a per-instance lock, so reads and writes on one instance are
/// strictly serialized while different instances never contend.
#[derive(Debug)]
pub struct DeviceInstance {
    index: usize,
    name: String,
    responses: ResponseTable,
    options: DeviceOptions,
    state: Mutex<InstanceState>,
    open_handles: AtomicUsize,
}

impl DeviceInstance {
    /// Construct an instance with the undefined sentinel selected.
    pub fn new(index: usize, name: impl Into<String>, options: DeviceOptions) -> Self {
        let name = name.into();
        let responses = ResponseTable::new();
        for (choice, response) in responses.entries() {
            debug!(
                device = %name,
                choice = choice.name(),
                text = response.text(),
                slot = response.slot_size(),
                "assigned response"
            );
        }
        let selector = Selector::default();
        debug!(device = %name, %selector, "assigned initial selector");

        Self {
            index,
            name,
            responses,
            state: Mutex::new(InstanceState {
                selector,
                history: SelectorHistory::new(options.history_depth),
            }),
            options,
            open_handles: AtomicUsize::new(0),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &DeviceOptions {
        &self.options
    }

    pub fn responses(&self) -> &ResponseTable {
        &self.responses
    }

    /// Handles currently open on this instance.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::Acquire)
    }

    /// Current selector. Waits for any in-flight read or write.
    pub fn selector(&self) -> Selector {
        self.state.lock().selector
    }

    /// Copy of the selector change history.
    pub fn history(&self) -> SelectorHistory {
        self.state.lock().history.clone()
    }

    pub fn snapshot(&self) -> InstanceSnapshot {
        let state = self.state.lock();
        InstanceSnapshot {
            index: self.index,
            name: self.name.clone(),
            selector: state.selector,
            response: self.responses.for_choice(state.selector.choice()).text(),
            open_handles: self.open_handles(),
            history: state.history.clone(),
        }
    }

    /// Bind a new handle to this instance. Takes no lock.
    pub fn open(&self) -> OpenFile {
        let file = OpenFile::new(self.index);
        self.open_handles.fetch_add(1, Ordering::AcqRel);
        debug!(device = %self.name, handle = %file.id(), "opening device");
        file
    }

    /// Release a handle. The selector is untouched.
    pub fn close(&self, file: OpenFile) -> Result<(), DeviceError> {
        self.check_handle(&file)?;
        self.open_handles.fetch_sub(1, Ordering::AcqRel);
        debug!(
            device = %self.name,
            handle = %file.id(),
            offset = file.offset(),
            "releasing device"
        );
        Ok(())
    }

    /// Store the first input byte as the new selector.
    ///
    /// Reports the byte count given by the instance's
    /// [`WriteAccounting`](super::options::WriteAccounting) and advances the
    /// handle's offset by the same amount. On `BadAddress` or `Interrupted`
    /// the selector is unchanged.
    pub fn write(&self, file: &mut OpenFile, input: UserSlice<'_>) -> Result<usize, DeviceError> {
        self.check_handle(file)?;
        let requested = input.len();

        if requested == 0 && self.options.empty_write == EmptyWrite::Ignore {
            debug!(device = %self.name, handle = %file.id(), "ignoring empty write");
            return Ok(0);
        }

        let mut state = self.acquire(file)?;

        let mut first = [0u8; 1];
        if input.copy_into(&mut first).is_err() {
            drop(state);
            warn!(device = %self.name, handle = %file.id(), requested, "bad address on write");
            return Err(DeviceError::BadAddress);
        }

        let from = state.selector;
        let to = Selector::new(first[0]);
        let accepted = self.options.write_accounting.accepted(requested);
        state.selector = to;
        state.history.record(SelectorChange {
            from,
            to,
            handle: file.id(),
            timestamp: Utc::now(),
            accepted,
        });
        drop(state);

        debug!(
            device = %self.name,
            handle = %file.id(),
            selector = %to,
            requested,
            accepted,
            "copied selector from user"
        );
        file.advance(accepted);
        Ok(accepted)
    }

    /// Copy the response for the current selector to the caller.
    ///
    /// Returns the number of bytes produced and advances the handle's offset
    /// by the same amount. An output smaller than the payload fails with
    /// `BufferTooSmall` and nothing is copied.
    pub fn read(
        &self,
        file: &mut OpenFile,
        mut output: UserSliceMut<'_>,
    ) -> Result<usize, DeviceError> {
        self.check_handle(file)?;
        let state = self.acquire(file)?;

        let selector = state.selector;
        let response = self.responses.for_choice(selector.choice());
        let payload = response.payload(self.options.length_mode);

        let capacity = output.capacity();
        if capacity < payload.len() {
            drop(state);
            warn!(
                device = %self.name,
                handle = %file.id(),
                needed = payload.len(),
                capacity,
                "output buffer too small"
            );
            return Err(DeviceError::BufferTooSmall {
                needed: payload.len(),
                capacity,
            });
        }

        if output.copy_from(payload).is_err() {
            drop(state);
            warn!(device = %self.name, handle = %file.id(), "bad address on read");
            return Err(DeviceError::BadAddress);
        }
        drop(state);

        debug!(
            device = %self.name,
            handle = %file.id(),
            %selector,
            text = response.text(),
            bytes = payload.len(),
            "copied response to user"
        );
        file.advance(payload.len());
        Ok(payload.len())
    }

    fn check_handle(&self, file: &OpenFile) -> Result<(), DeviceError> {
        if file.index() == self.index {
            Ok(())
        } else {
            Err(DeviceError::ForeignHandle {
                handle: file.id(),
                expected: self.index,
                found: file.index(),
            })
        }
    }

    /// Take the instance lock, giving up if the handle is interrupted while
    /// waiting. The interruption is consumed when it is reported.
    fn acquire(&self, file: &OpenFile) -> Result<MutexGuard<'_, InstanceState>, DeviceError> {
        if let Some(guard) = self.state.try_lock() {
            return Ok(guard);
        }
        loop {
            if file.interrupt().take() {
                warn!(device = %self.name, handle = %file.id(), "interrupted waiting for lock");
                return Err(DeviceError::Interrupted);
            }
            if let Some(guard) = self.state.try_lock_for(self.options.lock_poll_interval) {
                return Ok(guard);
            }
        }
    }
}

impl CharDevice for DeviceInstance {
    fn name(&self) -> &str {
        DeviceInstance::name(self)
    }

    fn open(&self) -> OpenFile {
        DeviceInstance::open(self)
    }

    fn close(&self, file: OpenFile) -> Result<(), DeviceError> {
        DeviceInstance::close(self, file)
    }

    fn read(&self, file: &mut OpenFile, output: UserSliceMut<'_>) -> Result<usize, DeviceError> {
        DeviceInstance::read(self, file, output)
    }

    fn write(&self, file: &mut OpenFile, input: UserSlice<'_>) -> Result<usize, DeviceError> {
        DeviceInstance::write(self, file, input)
    }
}
