use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    AllocationFailed { required: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { required } => {
                write!(f, "Could not grow buffer to {} bytes", required)
            }
        }
    }
}

/// Caller-owned output buffer, reused across encode and decode calls.
/// Growing reallocates only when the requested size exceeds the current
/// capacity; a failed growth releases the allocation, so the buffer is
/// empty with zero capacity afterwards.
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Clears the content and makes `required` bytes available for writing.
    pub(crate) fn grow(&mut self, required: usize) -> Result<&mut [u8], Error> {
        self.bytes.clear();
        if required > self.bytes.capacity() && self.bytes.try_reserve_exact(required).is_err() {
            self.release();
            return Err(Error::AllocationFailed { required });
        }
        self.bytes.resize(required, 0);
        Ok(&mut self.bytes)
    }

    pub(crate) fn truncate(&mut self, length: usize) {
        self.bytes.truncate(length);
    }

    /// Drops the allocation; the capacity returns to zero.
    pub fn release(&mut self) {
        self.bytes = Vec::new();
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
