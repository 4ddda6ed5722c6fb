//! Opaque native message handles

use crate::error::{MarshalError, MarshalResult};
use std::fmt;

/// Address-sized handle to a native message.
///
/// A handle is created by a native constructor, read any number of times and
/// destroyed exactly once. It is deliberately neither `Clone` nor `Copy`:
/// destroying consumes it and reading borrows it, so a second destroy or a
/// read after destroy does not compile.
#[must_use = "a native handle must be destroyed or its ownership transferred"]
#[derive(PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    /// Take ownership of a raw handle returned by a native constructor.
    ///
    /// Returns [`MarshalError::NativeAllocationFailure`] for a zero handle.
    ///
    /// # Safety
    ///
    /// A non-zero `raw` must come from the native constructor for
    /// `type_name`, must not have been destroyed, and must not be owned by
    /// any other `NativeHandle`.
    pub unsafe fn from_raw(raw: usize, type_name: &'static str) -> MarshalResult<Self> {
        if raw == 0 {
            tracing::warn!(type_name, "native constructor returned a null handle");
            return Err(MarshalError::NativeAllocationFailure { type_name });
        }
        tracing::trace!(type_name, raw, "native message created");
        Ok(Self(raw))
    }

    /// The raw address, for passing to native readers.
    pub fn as_raw(&self) -> usize {
        self.0
    }

    /// Give up ownership and return the raw address.
    ///
    /// The caller becomes responsible for destroying it exactly once.
    pub fn into_raw(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.0)
    }
}
