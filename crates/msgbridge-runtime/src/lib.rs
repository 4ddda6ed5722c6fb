//! msgbridge-runtime - Support library for generated bindings
//!
//! Generated binding modules depend on this crate for:
//! - [`Message`], [`MessageDefinition`] and [`ServiceType`], the capabilities
//!   every generated message and service implements
//! - [`NativeHandle`], a move-only opaque handle to a native message
//! - the [`marshal`] helpers that convert strings across the boundary
//!
//! Applications additionally get [`NativeMessage`], an owning guard that
//! destroys its native message exactly once, the process-wide
//! [`TypeSupportRegistry`], and [`ServiceDispatcher`] for serving requests
//! held in native form.

mod dispatch;
mod error;
mod handle;
pub mod marshal;
mod native_message;
mod traits;
mod type_support;

#[cfg(test)]
mod test_support;

pub use dispatch::ServiceDispatcher;
pub use error::{MarshalError, MarshalResult};
pub use handle::NativeHandle;
pub use native_message::NativeMessage;
pub use traits::{Message, MessageDefinition, ServiceType};
pub use type_support::{TypeSupportRegistry, message_type_support, service_type_support};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        MarshalError, MarshalResult, Message, MessageDefinition, NativeHandle, NativeMessage,
        ServiceDispatcher, ServiceType,
    };
}
