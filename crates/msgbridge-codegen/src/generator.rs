//! Per-service generation and output checks

use crate::capability_gen::{emit_capabilities, emit_service};
use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::extern_gen::{emit_extern, emit_service_extern};
use crate::marshal_gen::emit_marshal;
use crate::native_gen::{emit_native_message, emit_native_prelude, emit_native_service};
use crate::plan::{MessagePlan, ServicePlan};
use crate::struct_gen::emit_struct;
use msgbridge_schema::{MessageRole, ServiceSchema};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Generated text for one message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageArtifact {
    pub role: MessageRole,
    pub struct_name: String,
    pub struct_def: String,
    pub extern_block: String,
    pub marshal_impl: String,
    pub capabilities: String,
    pub native_source: String,
}

/// Generated units and link metadata for one service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceArtifacts {
    /// `pkg/srv/Add`
    pub service: String,
    /// Module and file stem, `add`
    pub module: String,
    pub link_target: String,
    /// Every native symbol the Rust unit declares
    pub symbols: Vec<String>,

    #[serde(skip)]
    pub request: MessageArtifact,
    #[serde(skip)]
    pub response: MessageArtifact,
    #[serde(skip)]
    pub rust_source: String,
    #[serde(skip)]
    pub c_source: String,
}

/// Generate the Rust and C units for one service.
///
/// Request then response; the units are link-compatible by construction,
/// and when `validate_output` is set the Rust unit is parsed and checked
/// against the C unit before returning.
pub fn generate_service(
    schema: &ServiceSchema,
    config: &GeneratorConfig,
) -> CodegenResult<ServiceArtifacts> {
    let plan = ServicePlan::build(schema, config)?;
    tracing::debug!(service = %plan.type_name, "generating bindings");

    let request = generate_message(&plan, &plan.request);
    let response = generate_message(&plan, &plan.response);

    let mut rust_source = format!(
        "// Generated by msgbridge from {}. Do not edit.\n\n",
        plan.type_name
    );
    for artifact in [&request, &response] {
        for part in [
            &artifact.struct_def,
            &artifact.extern_block,
            &artifact.marshal_impl,
            &artifact.capabilities,
        ] {
            rust_source.push_str(part);
            rust_source.push('\n');
        }
    }
    rust_source.push_str(&emit_service(&plan));
    rust_source.push('\n');
    rust_source.push_str(&emit_service_extern(&plan));

    let mut c_source = emit_native_prelude(&plan);
    for artifact in [&request, &response] {
        c_source.push('\n');
        c_source.push_str(&artifact.native_source);
    }
    c_source.push('\n');
    c_source.push_str(&emit_native_service(&plan));

    if config.validate_output {
        validate_output(&plan, &rust_source, &c_source)?;
    }

    let symbols = plan.declared_symbols();
    tracing::info!(
        service = %plan.type_name,
        symbols = symbols.len(),
        link_target = %plan.link_target,
        "generated bindings"
    );

    Ok(ServiceArtifacts {
        service: plan.type_name,
        module: plan.module,
        link_target: plan.link_target,
        symbols,
        request,
        response,
        rust_source,
        c_source,
    })
}

/// Generate every part for one message of `service`.
pub fn generate_message(service: &ServicePlan, message: &MessagePlan) -> MessageArtifact {
    tracing::trace!(
        message = %message.type_name,
        fields = message.fields.len(),
        skipped = message.skipped.len(),
        "emitting message"
    );

    MessageArtifact {
        role: message.role,
        struct_name: message.struct_name.clone(),
        struct_def: emit_struct(message),
        extern_block: emit_extern(service, message),
        marshal_impl: emit_marshal(service, message),
        capabilities: emit_capabilities(service, message),
        native_source: emit_native_message(service, message),
    }
}

fn validate_output(plan: &ServicePlan, rust_source: &str, c_source: &str) -> CodegenResult<()> {
    let file = syn::parse_file(rust_source).map_err(|e| CodegenError::GeneratedSyntax {
        service: plan.type_name.clone(),
        reason: e.to_string(),
    })?;
    let declared =
        declared_rust_symbols(&file).map_err(|e| CodegenError::GeneratedSyntax {
            service: plan.type_name.clone(),
            reason: format!("malformed #[link] attribute: {e}"),
        })?;
    check_link_contract(
        &declared,
        c_source,
        &plan.link_target,
        plan.link_attr.is_some(),
    )
}

/// A function declared in an extern block, with the block's link name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredSymbol {
    pub name: String,
    pub link_name: Option<String>,
}

/// Every foreign function declared in `file`.
///
/// Fails if a `#[link]` attribute on an extern block does not parse.
pub fn declared_rust_symbols(file: &syn::File) -> syn::Result<Vec<DeclaredSymbol>> {
    let mut symbols = Vec::new();

    for item in &file.items {
        let syn::Item::ForeignMod(foreign) = item else {
            continue;
        };
        let link_name = link_name(&foreign.attrs)?;
        for foreign_item in &foreign.items {
            if let syn::ForeignItem::Fn(function) = foreign_item {
                symbols.push(DeclaredSymbol {
                    name: function.sig.ident.to_string(),
                    link_name: link_name.clone(),
                });
            }
        }
    }

    Ok(symbols)
}

fn link_name(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("link")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                name = Some(value.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Lit = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(name)
}

/// Names of the functions defined in a C unit.
///
/// Recognizes the emitted definition shape: a signature at column zero
/// followed by a line holding only `{`.
pub fn defined_c_symbols(c_source: &str) -> BTreeSet<String> {
    let lines: Vec<&str> = c_source.lines().collect();

    lines
        .windows(2)
        .filter(|pair| pair[1] == "{")
        .filter_map(|pair| {
            let signature = pair[0];
            if signature.starts_with(char::is_whitespace) || !signature.ends_with(')') {
                return None;
            }
            let (head, _) = signature.split_once('(')?;
            let name = head.split_whitespace().last()?.trim_start_matches('*');
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Check that every declared symbol is defined in `c_source` and, when
/// `expect_link_attr` is set, that every block links `link_target`.
pub fn check_link_contract(
    declared: &[DeclaredSymbol],
    c_source: &str,
    link_target: &str,
    expect_link_attr: bool,
) -> CodegenResult<()> {
    let defined = defined_c_symbols(c_source);

    for symbol in declared {
        let link_ok = if expect_link_attr {
            symbol.link_name.as_deref() == Some(link_target)
        } else {
            symbol.link_name.is_none()
        };
        if !link_ok || !defined.contains(&symbol.name) {
            tracing::error!(symbol = %symbol.name, link_target, "link contract violated");
            return Err(CodegenError::LinkContract {
                symbol: symbol.name.clone(),
                link_target: link_target.to_string(),
            });
        }
    }

    Ok(())
}

/// `pub mod` lines for every generated service module.
pub fn generate_mod_file(artifacts: &[ServiceArtifacts]) -> String {
    let mut code = String::from("// Generated by msgbridge. Do not edit.\n\n");
    for artifact in artifacts {
        code.push_str(&format!("pub mod {};\n", artifact.module));
    }
    code
}

/// Write `rust/<module>.rs`, `rust/mod.rs` and `c/<module>.c` under `out_dir`.
///
/// Returns the written paths.
pub fn write_artifacts(out_dir: &Path, artifacts: &[ServiceArtifacts]) -> CodegenResult<Vec<PathBuf>> {
    let rust_dir = out_dir.join("rust");
    let c_dir = out_dir.join("c");
    for dir in [&rust_dir, &c_dir] {
        std::fs::create_dir_all(dir).map_err(|source| CodegenError::Io {
            path: dir.clone(),
            source,
        })?;
    }

    let mut written = Vec::new();
    for artifact in artifacts {
        written.push(write_file(
            &rust_dir.join(format!("{}.rs", artifact.module)),
            &artifact.rust_source,
        )?);
        written.push(write_file(
            &c_dir.join(format!("{}.c", artifact.module)),
            &artifact.c_source,
        )?);
    }
    written.push(write_file(
        &rust_dir.join("mod.rs"),
        &generate_mod_file(artifacts),
    )?);

    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> CodegenResult<PathBuf> {
    std::fs::write(path, contents).map_err(|source| CodegenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote generated file");
    Ok(path.to_path_buf())
}
