//! msgbridge-codegen - Rust and C binding generator
//!
//! For each [`ServiceSchema`](msgbridge_schema::ServiceSchema) this crate
//! emits one Rust unit and one C unit:
//!
//! - a managed struct per message ([`struct_gen`])
//! - an extern block declaring the message's native entry points ([`extern_gen`])
//! - marshalling code between struct fields and the native message ([`marshal_gen`])
//! - `Message`, `MessageDefinition` and `ServiceType` impls ([`capability_gen`])
//! - the C definitions of every declared entry point ([`native_gen`])
//!
//! Both units derive their symbol names from [`naming`], and
//! [`generate_service`] checks the result before returning it.
//!
//! # Example
//!
//! ```
//! use msgbridge_codegen::{GeneratorConfig, generate_service};
//! use msgbridge_schema::parse_srv;
//!
//! let schema = parse_srv("example_interfaces", "Add", "int64 a\nint64 b\n---\nint64 sum\n")?;
//! let artifacts = generate_service(&schema, &GeneratorConfig::default())?;
//!
//! assert!(artifacts.rust_source.contains("pub struct AddRequest"));
//! assert!(artifacts.c_source.contains("example_interfaces__srv__Add_Request__create()"));
//! # Ok::<(), msgbridge_codegen::CodegenError>(())
//! ```

pub mod capability_gen;
pub mod config;
mod error;
pub mod extern_gen;
pub mod generator;
pub mod marshal_gen;
pub mod naming;
pub mod native_gen;
pub mod plan;
pub mod struct_gen;
pub mod type_map;

#[cfg(test)]
mod test_fixtures;

pub use config::{ConfigError, GeneratorConfig, LinkMode, ProjectConfig, UnmappedPolicy};
pub use error::{CodegenError, CodegenResult};
pub use generator::{
    MessageArtifact, ServiceArtifacts, check_link_contract, generate_mod_file, generate_service,
    write_artifacts,
};
pub use plan::{MessagePlan, ServicePlan};
pub use type_map::{Conversion, TypeMapping, map_member, map_type};
