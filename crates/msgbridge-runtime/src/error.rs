//! Error types for crossing the native boundary

use thiserror::Error;

/// Result type alias for marshalling operations
pub type MarshalResult<T> = Result<T, MarshalError>;

/// Error type for marshalling a message to or from its native representation
///
/// No variant is ever resolved by truncating or substituting data; a value
/// that cannot cross the boundary intact is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// The native constructor returned a zero handle
    #[error("native allocation failed for {type_name}")]
    NativeAllocationFailure { type_name: &'static str },

    /// A string contains a NUL code unit and cannot be passed as a C string
    #[error("member `{member}` contains a NUL at code unit {position}")]
    InteriorNul {
        member: &'static str,
        position: usize,
    },

    /// A string is longer than its declared bound
    #[error("member `{member}` is {length} code units long, bound is {bound}")]
    BoundExceeded {
        member: &'static str,
        bound: usize,
        length: usize,
    },

    /// Native text is not valid in its declared encoding
    #[error("member `{member}` is not valid {encoding}: {reason}")]
    InvalidEncoding {
        member: &'static str,
        encoding: &'static str,
        reason: String,
    },

    /// The native reader returned a null string pointer
    #[error("member `{member}` has no native string buffer")]
    NullString { member: &'static str },
}

impl MarshalError {
    /// Returns an error code suitable for FFI
    pub fn error_code(&self) -> u32 {
        match self {
            MarshalError::NativeAllocationFailure { .. } => 1,
            MarshalError::InteriorNul { .. } => 2,
            MarshalError::BoundExceeded { .. } => 3,
            MarshalError::InvalidEncoding { .. } => 4,
            MarshalError::NullString { .. } => 5,
        }
    }

    /// Whether the error was raised before any native call was made.
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            MarshalError::InteriorNul { .. } | MarshalError::BoundExceeded { .. }
        )
    }
}
