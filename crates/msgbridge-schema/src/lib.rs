//! msgbridge-schema - Service and message schema model
//!
//! This crate provides the typed input consumed by the binding generator:
//! - [`ServiceSchema`] owning one request and one response [`MessageSchema`]
//! - [`Member`] and [`Constant`] entries, in declaration order
//! - [`TypeKind`] describing each member's declared type
//! - [`parse_srv`] reading the line-oriented `.srv` service format
//!
//! Schemas are immutable once constructed. All names are validated on
//! construction so later stages can splice them into Rust and C source
//! without further checks.

mod error;
mod model;
mod srv;
mod types;

pub use error::{SchemaError, SchemaResult};
pub use model::{
    Constant, Member, MessageRole, MessageSchema, ServiceSchema, is_reserved_path_keyword,
    validate_constant_name, validate_member_name, validate_package_name, validate_type_name,
};
pub use srv::{parse_srv, read_srv_file};
pub use types::{ArraySize, PrimitiveType, StringEncoding, StringType, TypeKind, TypeRef};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Member, MessageRole, MessageSchema, PrimitiveType, SchemaError, SchemaResult,
        ServiceSchema, StringEncoding, StringType, TypeKind,
    };
}
