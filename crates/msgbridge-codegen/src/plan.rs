//! Resolved generation plan
//!
//! A plan is a service schema with every name and type mapping decided.
//! Emitters only format a plan; they make no decisions of their own.

use crate::config::{GeneratorConfig, LinkMode, UnmappedPolicy};
use crate::error::CodegenResult;
use crate::naming;
use crate::type_map::{TypeMapping, map_member, map_type};
use msgbridge_schema::{Constant, MessageRole, MessageSchema, ServiceSchema, TypeKind};

/// A member that crosses the boundary
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    /// Schema name, used in symbols and diagnostics
    pub name: String,
    /// Rust identifier, raw if the name is a keyword
    pub ident: String,
    pub mapping: TypeMapping,
    pub docs: Vec<String>,
}

/// A member left out under [`UnmappedPolicy::Stub`]
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMember {
    pub name: String,
    pub kind: TypeKind,
}

/// One message, fully named
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePlan {
    pub role: MessageRole,
    /// `AddRequest`
    pub struct_name: String,
    /// `Add_Request`
    pub short_name: String,
    /// `pkg__srv__Add_Request`
    pub c_type: String,
    /// `pkg/srv/Add_Request`
    pub type_name: String,
    pub fields: Vec<FieldPlan>,
    pub skipped: Vec<SkippedMember>,
    pub constants: Vec<Constant>,
    pub docs: Vec<String>,
}

impl MessagePlan {
    pub fn type_support_symbol(&self) -> String {
        naming::type_support_symbol(&self.c_type)
    }

    pub fn constructor_symbol(&self) -> String {
        naming::constructor_symbol(&self.c_type)
    }

    pub fn destructor_symbol(&self) -> String {
        naming::destructor_symbol(&self.c_type)
    }

    pub fn reader_symbol(&self, member: &str) -> String {
        naming::reader_symbol(&self.c_type, member)
    }

    /// Symbols the Rust bindings declare, in declaration order.
    pub fn declared_symbols(&self) -> Vec<String> {
        let mut symbols = vec![
            self.type_support_symbol(),
            self.constructor_symbol(),
            self.destructor_symbol(),
        ];
        symbols.extend(self.fields.iter().map(|f| self.reader_symbol(&f.name)));
        symbols
    }
}

/// One service, fully named, with emission options
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePlan {
    pub package: String,
    pub subfolder: String,
    /// Service name, also the Rust marker type
    pub name: String,
    /// `pkg/srv/Add`
    pub type_name: String,
    /// `pkg__srv__Add`
    pub c_prefix: String,
    /// `add`, the generated module and file stem
    pub module: String,
    /// `pkg/srv/add.h`
    pub header: String,
    /// `Some(target)` when extern blocks carry a link attribute
    pub link_attr: Option<String>,
    pub link_target: String,
    /// `::msgbridge_runtime`
    pub runtime: String,
    pub request: MessagePlan,
    pub response: MessagePlan,
}

impl ServicePlan {
    /// Resolve names and mappings for `schema`.
    ///
    /// Fails on the first unmapped member under [`UnmappedPolicy::Reject`].
    pub fn build(schema: &ServiceSchema, config: &GeneratorConfig) -> CodegenResult<Self> {
        config.validate()?;

        let package = schema.package();
        let subfolder = schema.subfolder();
        let name = schema.name();
        let link_target = config.link_target(package);

        let request = plan_message(schema, MessageRole::Request, config.unmapped)?;
        let response = plan_message(schema, MessageRole::Response, config.unmapped)?;

        Ok(Self {
            package: package.to_string(),
            subfolder: subfolder.to_string(),
            name: name.to_string(),
            type_name: schema.qualified_name(),
            c_prefix: naming::service_prefix(package, subfolder, name),
            module: naming::to_snake_case(name),
            header: naming::message_header(package, subfolder, name),
            link_attr: match config.link {
                LinkMode::Dylib => Some(link_target.clone()),
                LinkMode::Ambient => None,
            },
            link_target,
            runtime: format!("::{}", config.runtime_crate),
            request,
            response,
        })
    }

    pub fn messages(&self) -> [&MessagePlan; 2] {
        [&self.request, &self.response]
    }

    pub fn type_support_symbol(&self) -> String {
        naming::type_support_symbol(&self.c_prefix)
    }

    /// Every symbol the Rust bindings declare.
    pub fn declared_symbols(&self) -> Vec<String> {
        let mut symbols = self.request.declared_symbols();
        symbols.extend(self.response.declared_symbols());
        symbols.push(self.type_support_symbol());
        symbols
    }
}

fn plan_message(
    schema: &ServiceSchema,
    role: MessageRole,
    policy: UnmappedPolicy,
) -> CodegenResult<MessagePlan> {
    let message: &MessageSchema = schema.message(role);
    let short_name = naming::message_short_name(schema.name(), role);

    let mut fields = Vec::with_capacity(message.members().len());
    let mut skipped = Vec::new();

    for member in message.members() {
        let mapping = match policy {
            UnmappedPolicy::Reject => Some(map_member(&short_name, member)?),
            UnmappedPolicy::Stub => map_type(&member.kind),
        };

        match mapping {
            Some(mapping) => {
                tracing::trace!(
                    message = %short_name,
                    member = %member.name,
                    managed = mapping.managed,
                    "mapped member"
                );
                fields.push(FieldPlan {
                    name: member.name.clone(),
                    ident: naming::rust_ident(&member.name),
                    mapping,
                    docs: member.docs.clone(),
                });
            }
            None => {
                tracing::warn!(
                    message = %short_name,
                    member = %member.name,
                    kind = member.kind.category(),
                    "member has no mapping, emitting native stub only"
                );
                skipped.push(SkippedMember {
                    name: member.name.clone(),
                    kind: member.kind.clone(),
                });
            }
        }
    }

    Ok(MessagePlan {
        role,
        struct_name: naming::message_struct_name(schema.name(), role),
        c_type: naming::message_prefix(schema.package(), schema.subfolder(), schema.name(), role),
        type_name: naming::qualified_type_name(schema.package(), schema.subfolder(), &short_name),
        short_name,
        fields,
        skipped,
        constants: message.constants().to_vec(),
        docs: message.docs().to_vec(),
    })
}
