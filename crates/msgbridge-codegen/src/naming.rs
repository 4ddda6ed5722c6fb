//! Naming conventions shared by the Rust and C emitters
//!
//! Every native symbol is derived here, once, so the declarations in the
//! Rust unit and the definitions in the C unit cannot drift apart.
//!
//! | Item | Shape | Example |
//! |------|-------|---------|
//! | message C type / symbol prefix | `<pkg>__<sub>__<Svc>_<Role>` | `example_interfaces__srv__Add_Request` |
//! | message type name | `<pkg>/<sub>/<Svc>_<Role>` | `example_interfaces/srv/Add_Request` |
//! | Rust message struct | `<Svc><Role>` | `AddRequest` |
//! | service symbol prefix | `<pkg>__<sub>__<Svc>` | `example_interfaces__srv__Add` |
//! | link target | `<pkg>__msgbridge_c` | `example_interfaces__msgbridge_c` |

use msgbridge_schema::MessageRole;

/// Rust keywords that must be written as raw identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Default native library name for a package.
pub fn default_link_target(package: &str) -> String {
    format!("{package}__msgbridge_c")
}

/// `<pkg>__<sub>__<Svc>`
pub fn service_prefix(package: &str, subfolder: &str, service: &str) -> String {
    format!("{package}__{subfolder}__{service}")
}

/// `<Svc>_<Role>`, the message's name inside its package.
pub fn message_short_name(service: &str, role: MessageRole) -> String {
    format!("{service}_{role}")
}

/// `<pkg>__<sub>__<Svc>_<Role>`, both the C struct type and the symbol prefix.
pub fn message_prefix(package: &str, subfolder: &str, service: &str, role: MessageRole) -> String {
    format!(
        "{}_{}",
        service_prefix(package, subfolder, service),
        role.suffix()
    )
}

/// `<Svc><Role>`
pub fn message_struct_name(service: &str, role: MessageRole) -> String {
    format!("{service}{role}")
}

/// `<pkg>/<sub>/<name>`
pub fn qualified_type_name(package: &str, subfolder: &str, name: &str) -> String {
    format!("{package}/{subfolder}/{name}")
}

pub fn type_support_symbol(prefix: &str) -> String {
    format!("{prefix}_get_type_support")
}

pub fn constructor_symbol(prefix: &str) -> String {
    format!("{prefix}_get_native_message")
}

pub fn destructor_symbol(prefix: &str) -> String {
    format!("{prefix}_destroy_native_message")
}

pub fn reader_symbol(prefix: &str, member: &str) -> String {
    format!("{prefix}_{member}_read_handle")
}

/// A member name as a Rust identifier, raw if it is a keyword.
pub fn rust_ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Convert PascalCase to snake_case.
///
/// Acronym runs stay together: `HTTPServer` becomes `http_server`.
///
/// # Examples
///
/// ```
/// use msgbridge_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("AddTwoInts"), "add_two_ints");
/// assert_eq!(to_snake_case("Vec3"), "vec3");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Header declaring a message's C struct and functions.
pub fn message_header(package: &str, subfolder: &str, service: &str) -> String {
    format!("{package}/{subfolder}/{}.h", to_snake_case(service))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("Add", "add")]
    #[test_case("AddTwoInts", "add_two_ints")]
    #[test_case("HTTPServer", "http_server")]
    #[test_case("GetURL", "get_url")]
    #[test_case("Vec3", "vec3")]
    #[test_case("Vec3Pair", "vec3_pair")]
    fn to_snake_case___converts_pascal_case(input: &str, expected: &str) {
        assert_eq!(to_snake_case(input), expected);
    }

    #[test]
    fn message_prefix___joins_with_double_underscores() {
        assert_eq!(
            message_prefix("example_interfaces", "srv", "Add", MessageRole::Request),
            "example_interfaces__srv__Add_Request"
        );
        assert_eq!(
            message_prefix("pkg", "rpc", "Greet", MessageRole::Response),
            "pkg__rpc__Greet_Response"
        );
    }

    #[test]
    fn symbols___share_message_prefix() {
        let prefix = "pkg__srv__Add_Request";

        assert_eq!(type_support_symbol(prefix), "pkg__srv__Add_Request_get_type_support");
        assert_eq!(constructor_symbol(prefix), "pkg__srv__Add_Request_get_native_message");
        assert_eq!(
            destructor_symbol(prefix),
            "pkg__srv__Add_Request_destroy_native_message"
        );
        assert_eq!(reader_symbol(prefix, "sum"), "pkg__srv__Add_Request_sum_read_handle");
    }

    #[test]
    fn message_struct_name___appends_role() {
        assert_eq!(message_struct_name("Add", MessageRole::Request), "AddRequest");
        assert_eq!(message_short_name("Add", MessageRole::Response), "Add_Response");
    }

    #[test_case("type", "r#type")]
    #[test_case("match", "r#match")]
    #[test_case("gen", "r#gen")]
    #[test_case("value", "value")]
    fn rust_ident___escapes_keywords(name: &str, expected: &str) {
        assert_eq!(rust_ident(name), expected);
    }

    #[test]
    fn message_header___uses_snake_case_service() {
        assert_eq!(
            message_header("example_interfaces", "srv", "AddTwoInts"),
            "example_interfaces/srv/add_two_ints.h"
        );
    }

    #[test]
    fn default_link_target___names_package() {
        assert_eq!(default_link_target("pkg"), "pkg__msgbridge_c");
    }
}
