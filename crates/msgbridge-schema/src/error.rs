//! Error types for schema construction and parsing

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema construction and parsing
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A type expression could not be understood
    #[error("invalid type `{ty}`: {reason}")]
    InvalidType { ty: String, reason: String },

    /// A name is not usable as a package, type, member or constant name
    #[error("invalid identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// Two members or constants of one message share a name
    #[error("duplicate name `{name}` in {message}")]
    DuplicateName { message: String, name: String },

    /// A constant declaration is malformed or out of range
    #[error("invalid constant `{name}`: {reason}")]
    InvalidConstant { name: String, reason: String },

    /// A `.srv` source line could not be parsed
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A schema file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn invalid_type(ty: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidType {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_identifier(name: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidIdentifier {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
