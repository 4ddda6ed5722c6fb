//! Declared field types
//!
//! A [`TypeKind`] is what the schema says about a member, independent of any
//! target language. Type expressions use the IDL spelling:
//!
//! | Expression | Kind |
//! |------------|------|
//! | `int32`, `float64`, `bool`, ... | [`TypeKind::Primitive`] |
//! | `string`, `string<=16` | [`TypeKind::String`] (narrow) |
//! | `wstring`, `wstring<=16` | [`TypeKind::String`] (wide) |
//! | `int32[]`, `int32[4]`, `int32[<=4]` | [`TypeKind::Array`] |
//! | `Point`, `geometry/Point`, `geometry/msg/Point` | [`TypeKind::Nested`] |

use crate::error::{SchemaError, SchemaResult};
use crate::model::{validate_package_name, validate_type_name};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Fixed-width scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Byte,
    Char,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl PrimitiveType {
    /// Every primitive, in IDL declaration order.
    pub const ALL: [PrimitiveType; 13] = [
        PrimitiveType::Bool,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Int8,
        PrimitiveType::UInt8,
        PrimitiveType::Int16,
        PrimitiveType::UInt16,
        PrimitiveType::Int32,
        PrimitiveType::UInt32,
        PrimitiveType::Int64,
        PrimitiveType::UInt64,
        PrimitiveType::Float32,
        PrimitiveType::Float64,
    ];

    /// The IDL spelling of this type.
    pub fn idl_name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
        }
    }

    /// Look up a primitive by its IDL spelling.
    pub fn from_idl_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.idl_name() == name)
    }

    /// Storage width in bits.
    pub fn width_bits(self) -> u32 {
        match self {
            PrimitiveType::Bool
            | PrimitiveType::Byte
            | PrimitiveType::Char
            | PrimitiveType::Int8
            | PrimitiveType::UInt8 => 8,
            PrimitiveType::Int16 | PrimitiveType::UInt16 => 16,
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => 32,
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => 64,
        }
    }

    /// Whether the type can represent negative values.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveType::Int8
                | PrimitiveType::Int16
                | PrimitiveType::Int32
                | PrimitiveType::Int64
                | PrimitiveType::Float32
                | PrimitiveType::Float64
        )
    }

    /// Whether the type is IEEE 754 floating point.
    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveType::Float32 | PrimitiveType::Float64)
    }

    /// Whether the type is an integer (bool excluded).
    pub fn is_integer(self) -> bool {
        !self.is_float() && self != PrimitiveType::Bool
    }
}

impl Serialize for PrimitiveType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.idl_name())
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.idl_name())
    }
}

/// Character width of a string member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StringEncoding {
    /// UTF-8, one byte per code unit.
    Narrow,
    /// UTF-16, two bytes per code unit.
    Wide,
}

/// A string member's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StringType {
    pub encoding: StringEncoding,

    /// Maximum length in code units, if bounded.
    pub bound: Option<usize>,
}

impl StringType {
    /// An unbounded narrow string.
    pub fn narrow() -> Self {
        Self {
            encoding: StringEncoding::Narrow,
            bound: None,
        }
    }

    /// An unbounded wide string.
    pub fn wide() -> Self {
        Self {
            encoding: StringEncoding::Wide,
            bound: None,
        }
    }

    /// The same string type with an upper bound.
    pub fn bounded(self, bound: usize) -> Self {
        Self {
            bound: Some(bound),
            ..self
        }
    }
}

/// Size constraint of an array member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArraySize {
    Fixed(usize),
    Bounded(usize),
    Unbounded,
}

/// Reference to another message type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub package: Option<String>,
    pub name: String,
}

/// A member's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Primitive { primitive: PrimitiveType },
    String { string: StringType },
    Array { element: Box<TypeKind>, size: ArraySize },
    Nested { target: TypeRef },
}

impl TypeKind {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        TypeKind::Primitive { primitive }
    }

    pub fn string(string: StringType) -> Self {
        TypeKind::String { string }
    }

    pub fn array(element: TypeKind, size: ArraySize) -> Self {
        TypeKind::Array {
            element: Box::new(element),
            size,
        }
    }

    pub fn nested(package: Option<&str>, name: &str) -> Self {
        TypeKind::Nested {
            target: TypeRef {
                package: package.map(str::to_string),
                name: name.to_string(),
            },
        }
    }

    /// Short category name used in diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            TypeKind::Primitive { .. } => "primitive",
            TypeKind::String { .. } => "string",
            TypeKind::Array { .. } => "array",
            TypeKind::Nested { .. } => "nested message",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Primitive { primitive } => write!(f, "{primitive}"),
            TypeKind::String { string } => {
                let base = match string.encoding {
                    StringEncoding::Narrow => "string",
                    StringEncoding::Wide => "wstring",
                };
                match string.bound {
                    Some(bound) => write!(f, "{base}<={bound}"),
                    None => f.write_str(base),
                }
            }
            TypeKind::Array { element, size } => match size {
                ArraySize::Fixed(n) => write!(f, "{element}[{n}]"),
                ArraySize::Bounded(n) => write!(f, "{element}[<={n}]"),
                ArraySize::Unbounded => write!(f, "{element}[]"),
            },
            TypeKind::Nested { target } => match &target.package {
                Some(package) => write!(f, "{package}/{}", target.name),
                None => f.write_str(&target.name),
            },
        }
    }
}

impl FromStr for TypeKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> SchemaResult<Self> {
        let ty = s.trim();
        if ty.is_empty() {
            return Err(SchemaError::invalid_type(s, "empty type expression"));
        }

        if let Some(open) = ty.rfind('[') {
            let Some(inner) = ty[open + 1..].strip_suffix(']') else {
                return Err(SchemaError::invalid_type(ty, "unterminated array suffix"));
            };
            let size = if inner.is_empty() {
                ArraySize::Unbounded
            } else if let Some(bound) = inner.strip_prefix("<=") {
                ArraySize::Bounded(parse_bound(ty, bound)?)
            } else {
                ArraySize::Fixed(parse_bound(ty, inner)?)
            };

            let element: TypeKind = ty[..open].parse()?;
            if matches!(element, TypeKind::Array { .. }) {
                return Err(SchemaError::invalid_type(
                    ty,
                    "arrays of arrays are not expressible",
                ));
            }
            return Ok(TypeKind::array(element, size));
        }

        if let Some(primitive) = PrimitiveType::from_idl_name(ty) {
            return Ok(TypeKind::primitive(primitive));
        }

        for (base, encoding) in [
            ("wstring", StringEncoding::Wide),
            ("string", StringEncoding::Narrow),
        ] {
            if let Some(rest) = ty.strip_prefix(base) {
                if rest.is_empty() {
                    return Ok(TypeKind::string(StringType {
                        encoding,
                        bound: None,
                    }));
                }
                if let Some(bound) = rest.strip_prefix("<=") {
                    return Ok(TypeKind::string(StringType {
                        encoding,
                        bound: Some(parse_bound(ty, bound)?),
                    }));
                }
            }
        }

        parse_type_ref(ty)
    }
}

fn parse_bound(ty: &str, text: &str) -> SchemaResult<usize> {
    let bound: usize = text
        .trim()
        .parse()
        .map_err(|_| SchemaError::invalid_type(ty, format!("`{text}` is not a size")))?;
    if bound == 0 {
        return Err(SchemaError::invalid_type(ty, "size must be at least 1"));
    }
    Ok(bound)
}

fn parse_type_ref(ty: &str) -> SchemaResult<TypeKind> {
    let parts: Vec<&str> = ty.split('/').collect();
    let (package, name) = match parts.as_slice() {
        [name] => (None, *name),
        [package, name] | [package, _, name] => (Some(*package), *name),
        _ => return Err(SchemaError::invalid_type(ty, "too many path segments")),
    };

    validate_type_name(name)
        .map_err(|_| SchemaError::invalid_type(ty, "not a primitive, string or message type"))?;
    if let Some(package) = package {
        validate_package_name(package)
            .map_err(|e| SchemaError::invalid_type(ty, e.to_string()))?;
    }

    Ok(TypeKind::nested(package, name))
}
