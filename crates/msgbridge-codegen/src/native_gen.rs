//! Native (C) implementation emission
//!
//! The C unit defines every symbol the Rust extern blocks declare, using the
//! struct layout and allocation functions of the native message library:
//! `<c_type>__create`, `<c_type>__destroy` and the runtime string
//! assignment functions.

use crate::plan::{MessagePlan, ServicePlan, SkippedMember};
use crate::type_map::Conversion;
use msgbridge_schema::TypeKind;

/// Local holding the native message in every emitted function.
///
/// Member names cannot contain `__`, so this never shadows a parameter.
const LOCAL: &str = "native__message";

/// Emit the C unit's banner and includes.
pub fn emit_native_prelude(service: &ServicePlan) -> String {
    let mut code = String::new();

    code.push_str(&format!(
        "// Generated by msgbridge from {}. Do not edit.\n\n",
        service.type_name
    ));
    code.push_str("#include <stdbool.h>\n");
    code.push_str("#include <stddef.h>\n");
    code.push_str("#include <stdint.h>\n\n");
    code.push_str("#include <rosidl_runtime_c/message_type_support_struct.h>\n");
    code.push_str("#include <rosidl_runtime_c/service_type_support_struct.h>\n");
    code.push_str("#include <rosidl_runtime_c/string_functions.h>\n");
    code.push_str("#include <rosidl_runtime_c/u16string_functions.h>\n\n");
    code.push_str(&format!("#include \"{}\"\n", service.header));

    code
}

/// Emit the C definitions for one message.
pub fn emit_native_message(service: &ServicePlan, message: &MessagePlan) -> String {
    let c_type = &message.c_type;
    let mut code = String::new();

    // Type support
    code.push_str(&format!(
        "uintptr_t {}(void)\n{{\n",
        message.type_support_symbol()
    ));
    code.push_str(&format!(
        "  return (uintptr_t)ROSIDL_GET_MSG_TYPE_SUPPORT({}, {}, {});\n}}\n\n",
        service.package, service.subfolder, message.short_name
    ));

    // Constructor
    let params: Vec<String> = message
        .fields
        .iter()
        .map(|field| format!("{} {}", field.mapping.c_param, field.name))
        .collect();
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    code.push_str(&format!(
        "uintptr_t {}({params})\n{{\n",
        message.constructor_symbol()
    ));
    code.push_str(&format!("  {c_type} * {LOCAL} = {c_type}__create();\n"));
    code.push_str(&format!("  if ({LOCAL} == NULL) {{\n    return 0;\n  }}\n"));
    for field in &message.fields {
        let assign = match field.mapping.conversion {
            Conversion::Direct => {
                code.push_str(&format!("  {LOCAL}->{0} = {0};\n", field.name));
                continue;
            }
            Conversion::NarrowString { .. } => "rosidl_runtime_c__String__assign",
            Conversion::WideString { .. } => "rosidl_runtime_c__U16String__assign",
        };
        code.push_str(&format!(
            "  if (!{assign}(&{LOCAL}->{0}, {0})) {{\n",
            field.name
        ));
        code.push_str(&format!("    {c_type}__destroy({LOCAL});\n"));
        code.push_str("    return 0;\n  }\n");
    }
    code.push_str(&format!("  return (uintptr_t){LOCAL};\n}}\n\n"));

    // Destructor
    code.push_str(&format!(
        "void {}(uintptr_t raw_message)\n{{\n",
        message.destructor_symbol()
    ));
    code.push_str(&format!("  {c_type}__destroy(({c_type} *)raw_message);\n}}\n"));

    // Readers
    for field in &message.fields {
        let value = match field.mapping.conversion {
            Conversion::Direct => format!("{LOCAL}->{}", field.name),
            Conversion::NarrowString { .. } => format!("{LOCAL}->{}.data", field.name),
            Conversion::WideString { .. } => {
                format!("(const uint16_t *){LOCAL}->{}.data", field.name)
            }
        };
        code.push('\n');
        push_reader(
            &mut code,
            field.mapping.c_return,
            &message.reader_symbol(&field.name),
            c_type,
            &value,
        );
    }

    for skipped in &message.skipped {
        code.push('\n');
        push_stub_reader(&mut code, message, skipped);
    }

    code
}

/// Emit the service-level type support getter.
pub fn emit_native_service(service: &ServicePlan) -> String {
    format!(
        "uintptr_t {}(void)\n{{\n  return (uintptr_t)ROSIDL_GET_SRV_TYPE_SUPPORT({}, {}, {});\n}}\n",
        service.type_support_symbol(),
        service.package,
        service.subfolder,
        service.name
    )
}

fn push_reader(code: &mut String, c_return: &str, symbol: &str, c_type: &str, value: &str) {
    code.push_str(&format!("{c_return} {symbol}(uintptr_t raw_message)\n{{\n"));
    code.push_str(&format!(
        "  const {c_type} * {LOCAL} = (const {c_type} *)raw_message;\n"
    ));
    code.push_str(&format!("  return {value};\n}}\n"));
}

/// Readers for members without a Rust mapping: arrays yield 0, nested
/// messages yield the member's address.
fn push_stub_reader(code: &mut String, message: &MessagePlan, skipped: &SkippedMember) {
    let symbol = message.reader_symbol(&skipped.name);
    match skipped.kind {
        TypeKind::Nested { .. } => push_reader(
            code,
            "uintptr_t",
            &symbol,
            &message.c_type,
            &format!("(uintptr_t)&{LOCAL}->{}", skipped.name),
        ),
        _ => {
            code.push_str(&format!("uintptr_t {symbol}(uintptr_t raw_message)\n{{\n"));
            code.push_str("  (void)raw_message;\n  return 0;\n}\n");
        }
    }
}
