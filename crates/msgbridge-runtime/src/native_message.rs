//! Owning guard for a native message

use crate::error::MarshalResult;
use crate::handle::NativeHandle;
use crate::traits::MessageDefinition;
use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;

/// A native message of type `T`, destroyed exactly once when dropped.
///
/// This is the preferred way to hold a handle: early returns and panics
/// between construction and destruction cannot leak the native message.
pub struct NativeMessage<T: MessageDefinition> {
    handle: ManuallyDrop<NativeHandle>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: MessageDefinition> NativeMessage<T> {
    /// Marshal `message` into a newly allocated native message.
    pub fn new(message: &T) -> MarshalResult<Self> {
        T::create_native(message).map(Self::from_handle)
    }

    /// Take ownership of an existing handle of type `T`.
    pub fn from_handle(handle: NativeHandle) -> Self {
        Self {
            handle: ManuallyDrop::new(handle),
            _marker: PhantomData,
        }
    }

    /// Borrow the handle for native reads.
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    /// Copy the native message into a new managed message.
    pub fn read(&self) -> MarshalResult<T> {
        T::from_native(&self.handle)
    }

    /// Release ownership without destroying the native message.
    pub fn into_handle(self) -> NativeHandle {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the handle is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.handle) }
    }
}

impl<T: MessageDefinition> Drop for NativeMessage<T> {
    fn drop(&mut self) {
        // SAFETY: drop runs at most once and `handle` is not used afterwards.
        let handle = unsafe { ManuallyDrop::take(&mut self.handle) };
        tracing::trace!(type_name = T::TYPE_NAME, raw = handle.as_raw(), "destroying native message");
        <T as MessageDefinition>::destroy_native(handle);
    }
}

impl<T: MessageDefinition> fmt::Debug for NativeMessage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMessage")
            .field("type_name", &T::TYPE_NAME)
            .field("handle", &*self.handle)
            .finish()
    }
}
