//! Service, message and member model

use crate::error::{SchemaError, SchemaResult};
use crate::types::{PrimitiveType, TypeKind};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Default subfolder for service definitions.
pub const DEFAULT_SUBFOLDER: &str = "srv";

/// A named, typed field of a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub kind: TypeKind,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            docs: Vec::new(),
        }
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }
}

/// A named primitive constant attached to a message.
///
/// Constants never cross the native boundary; they become associated
/// constants of the generated struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constant {
    pub name: String,
    pub primitive: PrimitiveType,

    /// Normalized literal text, valid in both Rust and C.
    pub value: String,
}

impl Constant {
    /// Create a constant, checking the literal against the type's range.
    pub fn new(name: &str, primitive: PrimitiveType, literal: &str) -> SchemaResult<Self> {
        validate_constant_name(name)?;
        let value =
            normalize_literal(primitive, literal.trim()).map_err(|reason| {
                SchemaError::InvalidConstant {
                    name: name.to_string(),
                    reason,
                }
            })?;

        Ok(Self {
            name: name.to_string(),
            primitive,
            value,
        })
    }
}

/// Which half of a service a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Request,
    Response,
}

impl MessageRole {
    /// Suffix appended to the service name to name the message.
    pub fn suffix(self) -> &'static str {
        match self {
            MessageRole::Request => "Request",
            MessageRole::Response => "Response",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// An ordered set of members.
///
/// Member order is significant: it fixes the generated struct's field order
/// and the native constructor's parameter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageSchema {
    members: Vec<Member>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    constants: Vec<Constant>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    docs: Vec<String>,
}

impl MessageSchema {
    /// Create a message from members and constants.
    ///
    /// Names must be valid and unique across members and constants.
    pub fn new(members: Vec<Member>, constants: Vec<Constant>) -> SchemaResult<Self> {
        let mut seen = HashSet::new();
        for member in &members {
            validate_member_name(&member.name)?;
            if !seen.insert(member.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    message: "message".to_string(),
                    name: member.name.clone(),
                });
            }
        }
        for constant in &constants {
            if !seen.insert(constant.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    message: "message".to_string(),
                    name: constant.name.clone(),
                });
            }
        }

        Ok(Self {
            members,
            constants,
            docs: Vec::new(),
        })
    }

    /// Create a message with only members.
    pub fn with_members(members: Vec<Member>) -> SchemaResult<Self> {
        Self::new(members, Vec::new())
    }

    /// A message with no members.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A service type: one request message and one response message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSchema {
    package: String,
    subfolder: String,
    name: String,
    request: MessageSchema,
    response: MessageSchema,
}

impl ServiceSchema {
    /// Create a service in the default `srv` subfolder.
    pub fn new(
        package: &str,
        name: &str,
        request: MessageSchema,
        response: MessageSchema,
    ) -> SchemaResult<Self> {
        validate_package_name(package)?;
        validate_type_name(name)?;

        Ok(Self {
            package: package.to_string(),
            subfolder: DEFAULT_SUBFOLDER.to_string(),
            name: name.to_string(),
            request,
            response,
        })
    }

    /// Place the service in a different subfolder.
    pub fn with_subfolder(mut self, subfolder: &str) -> SchemaResult<Self> {
        validate_package_name(subfolder)?;
        self.subfolder = subfolder.to_string();
        Ok(self)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn subfolder(&self) -> &str {
        &self.subfolder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request(&self) -> &MessageSchema {
        &self.request
    }

    pub fn response(&self) -> &MessageSchema {
        &self.response
    }

    /// The message playing `role`.
    pub fn message(&self, role: MessageRole) -> &MessageSchema {
        match role {
            MessageRole::Request => &self.request,
            MessageRole::Response => &self.response,
        }
    }

    /// Request then response.
    pub fn messages(&self) -> [(MessageRole, &MessageSchema); 2] {
        [
            (MessageRole::Request, &self.request),
            (MessageRole::Response, &self.response),
        ]
    }

    /// `package/subfolder/Name`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}/{}", self.package, self.subfolder, self.name)
    }
}

// ============================================================================
// Name validation
// ============================================================================

/// Rust keywords that cannot be escaped as raw identifiers.
pub fn is_reserved_path_keyword(name: &str) -> bool {
    matches!(name, "self" | "Self" | "super" | "crate" | "_")
}

/// C keywords, plus the `<stdbool.h>` macros, which cannot name native
/// struct members or parameters.
const C_KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "char", "const", "continue", "default", "do", "double",
    "else", "enum", "extern", "false", "float", "for", "goto", "if", "inline", "int", "long",
    "register", "restrict", "return", "short", "signed", "sizeof", "static", "struct",
    "switch", "true", "typedef", "union", "unsigned", "void", "volatile", "while",
];

/// Member names: lowercase snake case without doubled or trailing underscores.
///
/// Doubled underscores are refused because native symbol names use `__` as
/// a separator. Rust keywords other than path keywords are accepted and
/// emitted as raw identifiers.
pub fn validate_member_name(name: &str) -> SchemaResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        Some(_) => {
            return Err(SchemaError::invalid_identifier(
                name,
                "must start with a lowercase letter",
            ));
        }
        None => return Err(SchemaError::invalid_identifier(name, "must not be empty")),
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(SchemaError::invalid_identifier(
            name,
            "may only contain lowercase letters, digits and underscores",
        ));
    }
    if name.contains("__") || name.ends_with('_') {
        return Err(SchemaError::invalid_identifier(
            name,
            "must not contain doubled or trailing underscores",
        ));
    }
    if is_reserved_path_keyword(name) || C_KEYWORDS.contains(&name) {
        return Err(SchemaError::invalid_identifier(name, "is a reserved keyword"));
    }
    Ok(())
}

/// Package and subfolder names follow the member rules.
pub fn validate_package_name(name: &str) -> SchemaResult<()> {
    validate_member_name(name)
}

/// Type names: PascalCase, letters and digits only.
pub fn validate_type_name(name: &str) -> SchemaResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        Some(_) => {
            return Err(SchemaError::invalid_identifier(
                name,
                "must start with an uppercase letter",
            ));
        }
        None => return Err(SchemaError::invalid_identifier(name, "must not be empty")),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric()) {
        return Err(SchemaError::invalid_identifier(
            name,
            "may only contain letters and digits",
        ));
    }
    Ok(())
}

/// Constant names: SCREAMING_SNAKE_CASE.
pub fn validate_constant_name(name: &str) -> SchemaResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        Some(_) => {
            return Err(SchemaError::invalid_identifier(
                name,
                "must start with an uppercase letter",
            ));
        }
        None => return Err(SchemaError::invalid_identifier(name, "must not be empty")),
    }
    if !chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
        return Err(SchemaError::invalid_identifier(
            name,
            "may only contain uppercase letters, digits and underscores",
        ));
    }
    if name == "Self" {
        return Err(SchemaError::invalid_identifier(name, "is a reserved keyword"));
    }
    Ok(())
}

fn normalize_literal(primitive: PrimitiveType, literal: &str) -> Result<String, String> {
    if primitive == PrimitiveType::Bool {
        return match literal {
            "true" | "True" | "1" => Ok("true".to_string()),
            "false" | "False" | "0" => Ok("false".to_string()),
            other => Err(format!("`{other}` is not a boolean")),
        };
    }

    if primitive.is_float() {
        let value: f64 = literal
            .parse()
            .map_err(|_| format!("`{literal}` is not a number"))?;
        if !value.is_finite() {
            return Err(format!("`{literal}` is not finite"));
        }
        if primitive == PrimitiveType::Float32 && value.abs() > f64::from(f32::MAX) {
            return Err(format!("`{literal}` is out of range for {primitive}"));
        }
        return Ok(format!("{value:?}"));
    }

    let value: i128 = literal
        .parse()
        .map_err(|_| format!("`{literal}` is not an integer"))?;
    let bits = primitive.width_bits();
    let (min, max) = if primitive.is_signed() {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };
    if value < min || value > max {
        return Err(format!("{value} is out of range for {primitive}"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;
