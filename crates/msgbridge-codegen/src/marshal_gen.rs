//! Marshalling implementation emission
//!
//! Emits a private inherent `impl` with three methods the capability impls
//! forward to:
//!
//! - `get_native_message` converts every string member up front, then makes
//!   a single constructor call. Converted buffers are locals, so they live
//!   until the call returns and are freed exactly once afterwards.
//! - `destroy_native_message` consumes the handle.
//! - `read_handle` reads every member into a local before assigning any, so
//!   a failed read leaves the message untouched.

use crate::plan::{FieldPlan, MessagePlan, ServicePlan};
use crate::type_map::Conversion;

/// Emit the marshalling `impl` block for `message`.
pub fn emit_marshal(service: &ServicePlan, message: &MessagePlan) -> String {
    let rt = &service.runtime;
    let mut code = String::new();

    code.push_str(&format!("impl {} {{\n", message.struct_name));
    push_get_native_message(&mut code, rt, message);
    code.push('\n');
    push_destroy_native_message(&mut code, rt, message);
    code.push('\n');
    push_read_handle(&mut code, rt, message);
    code.push_str("}\n");

    code
}

fn push_get_native_message(code: &mut String, rt: &str, message: &MessagePlan) {
    code.push_str(&format!(
        "    fn get_native_message(&self) -> {rt}::MarshalResult<{rt}::NativeHandle> {{\n"
    ));

    for field in &message.fields {
        let helper = match field.mapping.conversion {
            Conversion::Direct => continue,
            Conversion::NarrowString { .. } => "narrow_arg",
            Conversion::WideString { .. } => "wide_arg",
        };
        code.push_str(&format!(
            "        let {} = {rt}::marshal::{helper}(\"{}\", &self.{}, {})?;\n",
            arg_local(field),
            field.name,
            field.ident,
            bound_expr(field.mapping.conversion)
        ));
    }

    let args: Vec<String> = message
        .fields
        .iter()
        .map(|field| match field.mapping.conversion {
            Conversion::Direct => format!("self.{}", field.ident),
            _ => format!("{}.as_ptr()", arg_local(field)),
        })
        .collect();
    code.push_str(&format!(
        "        let raw_message = unsafe {{ {}({}) }};\n",
        message.constructor_symbol(),
        args.join(", ")
    ));
    code.push_str("        // SAFETY: the handle comes straight from the native constructor.\n");
    code.push_str(&format!(
        "        unsafe {{ {rt}::NativeHandle::from_raw(raw_message, \"{}\") }}\n",
        message.type_name
    ));
    code.push_str("    }\n");
}

fn push_destroy_native_message(code: &mut String, rt: &str, message: &MessagePlan) {
    code.push_str(&format!(
        "    fn destroy_native_message(handle: {rt}::NativeHandle) {{\n"
    ));
    code.push_str(&format!(
        "        unsafe {{ {}(handle.into_raw()) }}\n",
        message.destructor_symbol()
    ));
    code.push_str("    }\n");
}

fn push_read_handle(code: &mut String, rt: &str, message: &MessagePlan) {
    let handle = if message.fields.is_empty() {
        "_handle"
    } else {
        "handle"
    };
    code.push_str(&format!(
        "    fn read_handle(&mut self, {handle}: &{rt}::NativeHandle) -> {rt}::MarshalResult<()> {{\n"
    ));

    if !message.fields.is_empty() {
        code.push_str("        let raw_message = handle.as_raw();\n");
    }

    for field in &message.fields {
        let reader = format!("{}(raw_message)", message.reader_symbol(&field.name));
        let value = match field.mapping.conversion {
            Conversion::Direct => format!("unsafe {{ {reader} }}"),
            Conversion::NarrowString { .. } => format!(
                "unsafe {{ {rt}::marshal::narrow_from_native(\"{}\", {reader}) }}?",
                field.name
            ),
            Conversion::WideString { .. } => format!(
                "unsafe {{ {rt}::marshal::wide_from_native(\"{}\", {reader}) }}?",
                field.name
            ),
        };
        code.push_str(&format!("        let {} = {value};\n", value_local(field)));
    }

    for field in &message.fields {
        code.push_str(&format!(
            "        self.{} = {};\n",
            field.ident,
            value_local(field)
        ));
    }

    code.push_str("        ::std::result::Result::Ok(())\n");
    code.push_str("    }\n");
}

fn arg_local(field: &FieldPlan) -> String {
    format!("arg_{}", field.name)
}

fn value_local(field: &FieldPlan) -> String {
    format!("value_{}", field.name)
}

fn bound_expr(conversion: Conversion) -> String {
    match conversion {
        Conversion::NarrowString { bound: Some(bound) }
        | Conversion::WideString { bound: Some(bound) } => {
            format!("::std::option::Option::Some({bound})")
        }
        _ => "::std::option::Option::None".to_string(),
    }
}
