//! Capability conformance emission

use crate::plan::{MessagePlan, ServicePlan};

/// Emit the `Message` and `MessageDefinition` impls for `message`.
///
/// Both forward to the marshalling methods emitted by
/// [`emit_marshal`](crate::marshal_gen::emit_marshal).
pub fn emit_capabilities(service: &ServicePlan, message: &MessagePlan) -> String {
    let rt = &service.runtime;
    let name = &message.struct_name;
    let mut code = String::new();

    code.push_str(&format!("impl {rt}::Message for {name} {{\n"));
    code.push_str(&format!(
        "    fn to_native(&self) -> {rt}::MarshalResult<{rt}::NativeHandle> {{\n"
    ));
    code.push_str("        self.get_native_message()\n");
    code.push_str("    }\n\n");
    code.push_str(&format!(
        "    fn destroy_native(&self, handle: {rt}::NativeHandle) {{\n"
    ));
    code.push_str("        Self::destroy_native_message(handle)\n");
    code.push_str("    }\n\n");
    code.push_str(&format!(
        "    fn read_from_native(&mut self, handle: &{rt}::NativeHandle) -> {rt}::MarshalResult<()> {{\n"
    ));
    code.push_str("        self.read_handle(handle)\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");

    code.push_str(&format!("impl {rt}::MessageDefinition for {name} {{\n"));
    code.push_str(&format!(
        "    const TYPE_NAME: &'static str = \"{}\";\n\n",
        message.type_name
    ));
    code.push_str("    fn get_type_support() -> usize {\n");
    code.push_str(&format!(
        "        unsafe {{ {}() }}\n",
        message.type_support_symbol()
    ));
    code.push_str("    }\n\n");
    code.push_str(&format!(
        "    fn create_native(message: &Self) -> {rt}::MarshalResult<{rt}::NativeHandle> {{\n"
    ));
    code.push_str("        message.get_native_message()\n");
    code.push_str("    }\n\n");
    code.push_str(&format!(
        "    fn destroy_native(handle: {rt}::NativeHandle) {{\n"
    ));
    code.push_str("        Self::destroy_native_message(handle)\n");
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}

/// Emit the service marker type and its `ServiceType` impl.
pub fn emit_service(service: &ServicePlan) -> String {
    let rt = &service.runtime;
    let mut code = String::new();

    code.push_str(&format!("/// The `{}` service.\n", service.type_name));
    code.push_str("#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]\n");
    code.push_str(&format!("pub struct {};\n\n", service.name));

    code.push_str(&format!("impl {rt}::ServiceType for {} {{\n", service.name));
    code.push_str(&format!(
        "    type Request = {};\n",
        service.request.struct_name
    ));
    code.push_str(&format!(
        "    type Response = {};\n\n",
        service.response.struct_name
    ));
    code.push_str(&format!(
        "    const TYPE_NAME: &'static str = \"{}\";\n\n",
        service.type_name
    ));
    code.push_str("    fn get_type_support() -> usize {\n");
    code.push_str(&format!(
        "        unsafe {{ {}() }}\n",
        service.type_support_symbol()
    ));
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}
