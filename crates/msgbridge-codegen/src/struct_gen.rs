//! Managed struct emission

use crate::plan::MessagePlan;
use crate::type_map::primitive_types;

/// Emit the managed struct for `message`, plus its constants if any.
///
/// One public field per mapped member, in schema order. The derived
/// `Default` is the zero/empty instance.
pub fn emit_struct(message: &MessagePlan) -> String {
    let mut code = String::new();

    if message.docs.is_empty() {
        code.push_str(&format!(
            "/// {} message of `{}`.\n",
            message.role, message.type_name
        ));
    } else {
        push_docs(&mut code, "", &message.docs);
    }
    code.push_str("#[derive(Debug, Clone, Default, PartialEq)]\n");

    if message.fields.is_empty() {
        code.push_str(&format!("pub struct {} {{}}\n", message.struct_name));
    } else {
        code.push_str(&format!("pub struct {} {{\n", message.struct_name));
        for field in &message.fields {
            push_docs(&mut code, "    ", &field.docs);
            code.push_str(&format!(
                "    pub {}: {},\n",
                field.ident, field.mapping.managed
            ));
        }
        code.push_str("}\n");
    }

    if !message.constants.is_empty() {
        code.push_str(&format!("\nimpl {} {{\n", message.struct_name));
        for constant in &message.constants {
            let (rust_type, _) = primitive_types(constant.primitive);
            code.push_str(&format!(
                "    pub const {}: {} = {};\n",
                constant.name, rust_type, constant.value
            ));
        }
        code.push_str("}\n");
    }

    code
}

/// Write `docs` as `///` lines at `indent`.
pub(crate) fn push_docs(code: &mut String, indent: &str, docs: &[String]) {
    for line in docs {
        if line.is_empty() {
            code.push_str(&format!("{indent}///\n"));
        } else {
            code.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}
