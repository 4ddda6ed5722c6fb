//! Native interface (extern block) emission

use crate::plan::{MessagePlan, ServicePlan};

/// Emit the extern block declaring a message's native entry points:
/// type support, constructor, destructor, then one reader per field.
pub fn emit_extern(service: &ServicePlan, message: &MessagePlan) -> String {
    let mut code = String::new();
    push_extern_open(&mut code, service);

    code.push_str(&format!(
        "    fn {}() -> usize;\n",
        message.type_support_symbol()
    ));

    let params: Vec<String> = message
        .fields
        .iter()
        .map(|field| format!("{}: {}", field.ident, field.mapping.rust_param))
        .collect();
    code.push_str(&format!(
        "    fn {}({}) -> usize;\n",
        message.constructor_symbol(),
        params.join(", ")
    ));

    code.push_str(&format!(
        "    fn {}(raw_message: usize);\n",
        message.destructor_symbol()
    ));

    for field in &message.fields {
        code.push_str(&format!(
            "    fn {}(raw_message: usize) -> {};\n",
            message.reader_symbol(&field.name),
            field.mapping.rust_return
        ));
    }

    code.push_str("}\n");
    code
}

/// Emit the extern block declaring the service's type support getter.
pub fn emit_service_extern(service: &ServicePlan) -> String {
    let mut code = String::new();
    push_extern_open(&mut code, service);
    code.push_str(&format!(
        "    fn {}() -> usize;\n",
        service.type_support_symbol()
    ));
    code.push_str("}\n");
    code
}

fn push_extern_open(code: &mut String, service: &ServicePlan) {
    if let Some(link) = &service.link_attr {
        code.push_str(&format!("#[link(name = \"{link}\")]\n"));
    }
    code.push_str("#[allow(non_snake_case)]\n");
    code.push_str("unsafe extern \"C\" {\n");
}
