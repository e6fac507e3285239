//! Caller memory regions handed to read and write.
//!
//! A region is either mapped, backed by a real slice, or unmapped, in which
//! case every copy faults. Copies never touch more than the region holds.

use thiserror::Error;

/// A copy touched memory the caller does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("caller memory region is not accessible")]
pub struct Fault;

/// Region a write reads from.
#[derive(Debug, Clone, Copy)]
pub enum UserSlice<'a> {
    Mapped(&'a [u8]),
    Unmapped { len: usize },
}

impl<'a> UserSlice<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::Mapped(bytes)
    }

    /// A region of `len` bytes that faults on access.
    pub fn unmapped(len: usize) -> Self {
        Self::Unmapped { len }
    }

    /// Length the caller claims for the region.
    pub fn len(&self) -> usize {
        match self {
            Self::Mapped(bytes) => bytes.len(),
            Self::Unmapped { len } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `dst` from the start of the region.
    pub fn copy_into(&self, dst: &mut [u8]) -> Result<(), Fault> {
        match self {
            Self::Mapped(bytes) if bytes.len() >= dst.len() => {
                dst.copy_from_slice(&bytes[..dst.len()]);
                Ok(())
            }
            _ => Err(Fault),
        }
    }
}

impl<'a> From<&'a [u8]> for UserSlice<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Mapped(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for UserSlice<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Mapped(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for UserSlice<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Mapped(bytes)
    }
}

impl<'a> From<&'a str> for UserSlice<'a> {
    fn from(text: &'a str) -> Self {
        Self::Mapped(text.as_bytes())
    }
}

/// Region a read writes into.
#[derive(Debug)]
pub enum UserSliceMut<'a> {
    Mapped(&'a mut [u8]),
    Unmapped { len: usize },
}

impl<'a> UserSliceMut<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self::Mapped(bytes)
    }

    /// A region of `len` bytes that faults on access.
    pub fn unmapped(len: usize) -> Self {
        Self::Unmapped { len }
    }

    /// Room the caller claims to have.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Mapped(bytes) => bytes.len(),
            Self::Unmapped { len } => *len,
        }
    }

    /// Copy `src` to the start of the region.
    pub fn copy_from(&mut self, src: &[u8]) -> Result<(), Fault> {
        match self {
            Self::Mapped(bytes) if bytes.len() >= src.len() => {
                bytes[..src.len()].copy_from_slice(src);
                Ok(())
            }
            _ => Err(Fault),
        }
    }
}

impl<'a> From<&'a mut [u8]> for UserSliceMut<'a> {
    fn from(bytes: &'a mut [u8]) -> Self {
        Self::Mapped(bytes)
    }
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for UserSliceMut<'a> {
    fn from(bytes: &'a mut [u8; N]) -> Self {
        Self::Mapped(bytes)
    }
}

impl<'a> From<&'a mut Vec<u8>> for UserSliceMut<'a> {
    fn from(bytes: &'a mut Vec<u8>) -> Self {
        Self::Mapped(bytes.as_mut_slice())
    }
}
