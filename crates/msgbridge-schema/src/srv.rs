//! `.srv` service definition reader
//!
//! The format is line oriented:
//!
//! ```text
//! # Adds two integers.
//! int64 a
//! int64 b
//! ---
//! int64 sum
//! ```
//!
//! - `<type> <name>` declares a member, `<type> <NAME>=<value>` a constant
//! - `#` starts a comment; comment lines directly above a member become its docs
//! - `---` separates the request from the response
//! - comment lines at the top of the file, before the first blank line,
//!   document the request message

use crate::error::{SchemaError, SchemaResult};
use crate::model::{Constant, Member, MessageSchema, ServiceSchema, validate_member_name};
use crate::types::TypeKind;
use std::path::Path;

/// Parse `.srv` source text into a service schema.
pub fn parse_srv(package: &str, name: &str, source: &str) -> SchemaResult<ServiceSchema> {
    let mut sections = vec![Section::default()];
    let mut pending_docs: Vec<String> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let (code, comment) = split_comment(raw_line);

        if code == "---" {
            if sections.len() == 2 {
                return Err(SchemaError::Parse {
                    line: line_number,
                    reason: "more than one `---` separator".to_string(),
                });
            }
            sections.push(Section::default());
            pending_docs.clear();
            continue;
        }

        let section = sections
            .last_mut()
            .ok_or_else(|| SchemaError::Parse {
                line: line_number,
                reason: "internal parser state lost".to_string(),
            })?;

        if code.is_empty() {
            match comment {
                Some(text) => pending_docs.push(text),
                None => {
                    if section.members.is_empty() && section.docs.is_empty() {
                        section.docs = std::mem::take(&mut pending_docs);
                    }
                    pending_docs.clear();
                }
            }
            continue;
        }

        let mut docs = std::mem::take(&mut pending_docs);
        docs.extend(comment);
        parse_declaration(code, docs, section).map_err(|reason| SchemaError::Parse {
            line: line_number,
            reason,
        })?;
    }

    if sections.len() != 2 {
        return Err(SchemaError::Parse {
            line: source.lines().count(),
            reason: "missing `---` separator between request and response".to_string(),
        });
    }

    let mut sections = sections.into_iter();
    let request = sections.next().unwrap_or_default().into_message()?;
    let response = sections.next().unwrap_or_default().into_message()?;

    let service = ServiceSchema::new(package, name, request, response)?;
    tracing::debug!(
        service = %service.qualified_name(),
        request_members = service.request().members().len(),
        response_members = service.response().members().len(),
        "parsed service definition"
    );
    Ok(service)
}

/// Read a `.srv` file; the service is named after the file stem.
pub fn read_srv_file(package: &str, path: &Path) -> SchemaResult<ServiceSchema> {
    let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| SchemaError::InvalidIdentifier {
            name: path.display().to_string(),
            reason: "file name is not a valid service name".to_string(),
        })?;

    parse_srv(package, name, &source)
}

#[derive(Default)]
struct Section {
    members: Vec<Member>,
    constants: Vec<Constant>,
    docs: Vec<String>,
}

impl Section {
    fn into_message(self) -> SchemaResult<MessageSchema> {
        Ok(MessageSchema::new(self.members, self.constants)?.with_docs(self.docs))
    }
}

/// Split a line into trimmed code and an optional non-empty comment.
fn split_comment(line: &str) -> (&str, Option<String>) {
    match line.split_once('#') {
        Some((code, comment)) => {
            let comment = comment.trim();
            let comment = (!comment.is_empty()).then(|| comment.to_string());
            (code.trim(), comment)
        }
        None => (line.trim(), None),
    }
}

fn parse_declaration(code: &str, docs: Vec<String>, section: &mut Section) -> Result<(), String> {
    let (type_expr, rest) = code
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected `<type> <name>`, found `{code}`"))?;
    let kind: TypeKind = type_expr.parse().map_err(|e: SchemaError| e.to_string())?;
    let rest = rest.trim();

    if let Some((name, value)) = rest.split_once('=') {
        let TypeKind::Primitive { primitive } = kind else {
            return Err(format!(
                "constant `{}` must have a primitive type, found {}",
                name.trim(),
                kind.category()
            ));
        };
        let constant = Constant::new(name.trim(), primitive, value).map_err(|e| e.to_string())?;
        section.constants.push(constant);
        return Ok(());
    }

    let mut tokens = rest.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| format!("missing member name after `{type_expr}`"))?;
    if tokens.next().is_some() {
        return Err(format!(
            "member `{name}` has a default value; default values are not supported"
        ));
    }
    validate_member_name(name).map_err(|e| e.to_string())?;

    section.members.push(Member::new(name, kind).with_docs(docs));
    Ok(())
}
