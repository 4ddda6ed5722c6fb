//! Capabilities implemented by generated bindings

use crate::error::MarshalResult;
use crate::handle::NativeHandle;

/// Per-instance conversion to and from the native representation.
///
/// Object safe, so heterogeneous messages can be handled as
/// `Box<dyn Message>`.
pub trait Message {
    /// Allocate a native message populated from `self`.
    fn to_native(&self) -> MarshalResult<NativeHandle>;

    /// Destroy a native message created by [`Message::to_native`].
    fn destroy_native(&self, handle: NativeHandle);

    /// Overwrite every mapped field of `self` from a live native message.
    fn read_from_native(&mut self, handle: &NativeHandle) -> MarshalResult<()>;
}

/// Type-level description of a message.
///
/// Generated code implements both capabilities; callers that need only one
/// depend on only one. Because both traits name a `destroy_native` item,
/// generic code calls this one as `<T as MessageDefinition>::destroy_native`.
pub trait MessageDefinition: Message + Default + Sized {
    /// `package/subfolder/Service_Request` style name.
    const TYPE_NAME: &'static str;

    /// Address of the native type support structure.
    fn get_type_support() -> usize;

    /// Allocate a native message populated from `message`.
    fn create_native(message: &Self) -> MarshalResult<NativeHandle>;

    /// Destroy a native message of this type.
    fn destroy_native(handle: NativeHandle);

    /// Build a managed message from a live native message.
    fn from_native(handle: &NativeHandle) -> MarshalResult<Self> {
        let mut message = Self::default();
        message.read_from_native(handle)?;
        Ok(message)
    }
}

/// A service: a request type and a response type under one name.
pub trait ServiceType {
    type Request: MessageDefinition;
    type Response: MessageDefinition;

    /// `package/subfolder/Service` style name.
    const TYPE_NAME: &'static str;

    /// Address of the native service type support structure.
    fn get_type_support() -> usize;
}
