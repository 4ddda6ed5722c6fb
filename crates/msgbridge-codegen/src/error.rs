//! Error types for binding generation

use crate::config::ConfigError;
use msgbridge_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for binding generation
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A member's declared type has no managed/native mapping
    #[error("{message}.{member}: {kind} members cannot cross the native boundary")]
    SchemaMapping {
        message: String,
        member: String,
        kind: String,
    },

    /// The native unit does not define a symbol the Rust unit declares
    #[error("symbol `{symbol}` is declared for link target `{link_target}` but not defined")]
    LinkContract { symbol: String, link_target: String },

    /// The emitted Rust unit does not parse
    #[error("generated Rust for {service} does not parse: {reason}")]
    GeneratedSyntax { service: String, reason: String },

    /// The input schema is invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Generator configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing generated files failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
