//! Field type mapping
//!
//! Pure function from a member's declared [`TypeKind`] to the types used on
//! each side of the boundary and the conversion the marshalling code applies.
//!
//! | Declared | Managed | Extern param / return | C param / return |
//! |----------|---------|-----------------------|------------------|
//! | primitive | fixed-width scalar | same scalar | `<stdint.h>` scalar |
//! | `string` | `String` | `*const c_char` | `const char *` |
//! | `wstring` | `String` | `*const u16` | `const uint16_t *` |
//! | array, nested | none | none | none |

use crate::error::{CodegenError, CodegenResult};
use msgbridge_schema::{Member, PrimitiveType, StringEncoding, TypeKind};

/// How a member's value crosses the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Passed and returned by value
    Direct,
    /// UTF-8 through a NUL-terminated byte buffer
    NarrowString { bound: Option<usize> },
    /// UTF-16 through a NUL-terminated code unit buffer
    WideString { bound: Option<usize> },
}

impl Conversion {
    pub fn is_string(self) -> bool {
        !matches!(self, Conversion::Direct)
    }
}

/// Types used for one member on each side of the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Field type of the managed struct
    pub managed: &'static str,
    /// Constructor parameter type in the extern block
    pub rust_param: &'static str,
    /// Reader return type in the extern block
    pub rust_return: &'static str,
    /// Constructor parameter type in C
    pub c_param: &'static str,
    /// Reader return type in C
    pub c_return: &'static str,
    pub conversion: Conversion,
}

const MANAGED_STRING: &str = "::std::string::String";

/// Map a declared type, or `None` if it cannot cross the boundary.
pub fn map_type(kind: &TypeKind) -> Option<TypeMapping> {
    match kind {
        TypeKind::Primitive { primitive } => {
            let (rust, c) = primitive_types(*primitive);
            Some(TypeMapping {
                managed: rust,
                rust_param: rust,
                rust_return: rust,
                c_param: c,
                c_return: c,
                conversion: Conversion::Direct,
            })
        }
        TypeKind::String { string } => Some(match string.encoding {
            StringEncoding::Narrow => TypeMapping {
                managed: MANAGED_STRING,
                rust_param: "*const ::std::ffi::c_char",
                rust_return: "*const ::std::ffi::c_char",
                c_param: "const char *",
                c_return: "const char *",
                conversion: Conversion::NarrowString {
                    bound: string.bound,
                },
            },
            StringEncoding::Wide => TypeMapping {
                managed: MANAGED_STRING,
                rust_param: "*const u16",
                rust_return: "*const u16",
                c_param: "const uint16_t *",
                c_return: "const uint16_t *",
                conversion: Conversion::WideString {
                    bound: string.bound,
                },
            },
        }),
        TypeKind::Array { .. } | TypeKind::Nested { .. } => None,
    }
}

/// Map a member of `message`, failing with a mapping error naming the member.
pub fn map_member(message: &str, member: &Member) -> CodegenResult<TypeMapping> {
    map_type(&member.kind).ok_or_else(|| CodegenError::SchemaMapping {
        message: message.to_string(),
        member: member.name.clone(),
        kind: member.kind.category().to_string(),
    })
}

/// Rust and C spelling of a primitive.
pub fn primitive_types(primitive: PrimitiveType) -> (&'static str, &'static str) {
    match primitive {
        PrimitiveType::Bool => ("bool", "bool"),
        PrimitiveType::Byte | PrimitiveType::Char | PrimitiveType::UInt8 => ("u8", "uint8_t"),
        PrimitiveType::Int8 => ("i8", "int8_t"),
        PrimitiveType::Int16 => ("i16", "int16_t"),
        PrimitiveType::UInt16 => ("u16", "uint16_t"),
        PrimitiveType::Int32 => ("i32", "int32_t"),
        PrimitiveType::UInt32 => ("u32", "uint32_t"),
        PrimitiveType::Int64 => ("i64", "int64_t"),
        PrimitiveType::UInt64 => ("u64", "uint64_t"),
        PrimitiveType::Float32 => ("f32", "float"),
        PrimitiveType::Float64 => ("f64", "double"),
    }
}
