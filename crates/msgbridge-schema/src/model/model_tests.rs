#![allow(non_snake_case)]

use super::*;
use crate::types::StringType;
use test_case::test_case;

fn int32(name: &str) -> Member {
    Member::new(name, TypeKind::primitive(PrimitiveType::Int32))
}

// MessageSchema tests

#[test]
fn MessageSchema___new___preserves_member_order() {
    let message = MessageSchema::with_members(vec![
        int32("a"),
        Member::new("b", TypeKind::string(StringType::narrow())),
        int32("c"),
    ])
    .unwrap();

    let names: Vec<&str> = message.members().iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn MessageSchema___new___rejects_duplicate_members() {
    let result = MessageSchema::with_members(vec![int32("a"), int32("a")]);

    assert!(matches!(result, Err(SchemaError::DuplicateName { name, .. }) if name == "a"));
}

#[test]
fn MessageSchema___new___rejects_invalid_member_name() {
    let result = MessageSchema::with_members(vec![int32("Bad")]);

    assert!(matches!(result, Err(SchemaError::InvalidIdentifier { .. })));
}

#[test]
fn MessageSchema___empty___has_no_members() {
    let message = MessageSchema::empty();

    assert!(message.is_empty());
    assert!(message.constants().is_empty());
}

// ServiceSchema tests

#[test]
fn ServiceSchema___new___defaults_to_srv_subfolder() {
    let service = ServiceSchema::new(
        "example_interfaces",
        "Add",
        MessageSchema::empty(),
        MessageSchema::empty(),
    )
    .unwrap();

    assert_eq!(service.subfolder(), "srv");
    assert_eq!(service.qualified_name(), "example_interfaces/srv/Add");
}

#[test]
fn ServiceSchema___messages___request_then_response() {
    let service = ServiceSchema::new(
        "pkg",
        "Add",
        MessageSchema::with_members(vec![int32("a")]).unwrap(),
        MessageSchema::empty(),
    )
    .unwrap();

    let [(first, request), (second, response)] = service.messages();

    assert_eq!(first, MessageRole::Request);
    assert_eq!(request.members().len(), 1);
    assert_eq!(second, MessageRole::Response);
    assert!(response.is_empty());
}

#[test]
fn ServiceSchema___new___rejects_lowercase_service_name() {
    let result = ServiceSchema::new("pkg", "add", MessageSchema::empty(), MessageSchema::empty());

    assert!(matches!(result, Err(SchemaError::InvalidIdentifier { .. })));
}

#[test]
fn ServiceSchema___with_subfolder___replaces_subfolder() {
    let service = ServiceSchema::new("pkg", "Add", MessageSchema::empty(), MessageSchema::empty())
        .unwrap()
        .with_subfolder("rpc")
        .unwrap();

    assert_eq!(service.qualified_name(), "pkg/rpc/Add");
}

// Name validation tests

#[test_case("a")]
#[test_case("sum")]
#[test_case("display_name")]
#[test_case("x2")]
#[test_case("type"; "rust keyword escaped later")]
fn validate_member_name___accepts(name: &str) {
    assert!(validate_member_name(name).is_ok());
}

#[test_case(""; "empty")]
#[test_case("Name"; "uppercase start")]
#[test_case("2x"; "digit start")]
#[test_case("a__b"; "doubled underscore")]
#[test_case("a_"; "trailing underscore")]
#[test_case("a-b"; "dash")]
#[test_case("self"; "path keyword")]
#[test_case("crate"; "crate keyword")]
#[test_case("int"; "c keyword")]
#[test_case("default"; "shared keyword")]
#[test_case("bool"; "stdbool type")]
#[test_case("true"; "stdbool true")]
#[test_case("false"; "stdbool false")]
fn validate_member_name___rejects(name: &str) {
    assert!(validate_member_name(name).is_err());
}

#[test_case("Add", true)]
#[test_case("AddTwoInts", true)]
#[test_case("Vec3", true)]
#[test_case("add", false)]
#[test_case("Add_Two", false)]
#[test_case("", false)]
fn validate_type_name___accepts_pascal_case_only(name: &str, valid: bool) {
    assert_eq!(validate_type_name(name).is_ok(), valid);
}

#[test_case("MAX_SIZE", true)]
#[test_case("A1", true)]
#[test_case("max_size", false)]
#[test_case("Max", false)]
fn validate_constant_name___accepts_screaming_case_only(name: &str, valid: bool) {
    assert_eq!(validate_constant_name(name).is_ok(), valid);
}

// Constant tests

#[test_case(PrimitiveType::Int8, "-128", "-128")]
#[test_case(PrimitiveType::Int8, "127", "127")]
#[test_case(PrimitiveType::UInt8, "255", "255")]
#[test_case(PrimitiveType::UInt64, "18446744073709551615", "18446744073709551615")]
#[test_case(PrimitiveType::Int64, "-9223372036854775808", "-9223372036854775808")]
#[test_case(PrimitiveType::Bool, "True", "true")]
#[test_case(PrimitiveType::Bool, "0", "false")]
#[test_case(PrimitiveType::Float64, "1", "1.0")]
#[test_case(PrimitiveType::Float32, "-2.5", "-2.5")]
fn Constant___new___normalizes_literal(primitive: PrimitiveType, literal: &str, expected: &str) {
    let constant = Constant::new("VALUE", primitive, literal).unwrap();

    assert_eq!(constant.value, expected);
}

#[test_case(PrimitiveType::Int8, "128"; "int8 overflow")]
#[test_case(PrimitiveType::UInt8, "-1"; "unsigned negative")]
#[test_case(PrimitiveType::UInt16, "65536"; "uint16 overflow")]
#[test_case(PrimitiveType::Bool, "yes"; "bad bool")]
#[test_case(PrimitiveType::Int32, "1.5"; "float for int")]
#[test_case(PrimitiveType::Float64, "inf"; "infinite")]
#[test_case(PrimitiveType::Float32, "1e39"; "float32 overflow")]
fn Constant___new___rejects_out_of_range(primitive: PrimitiveType, literal: &str) {
    let result = Constant::new("VALUE", primitive, literal);

    assert!(matches!(result, Err(SchemaError::InvalidConstant { .. })));
}

#[test]
fn MessageSchema___new___rejects_duplicate_constants() {
    let constant = Constant::new("A", PrimitiveType::Int32, "1").unwrap();

    let result = MessageSchema::new(vec![int32("a")], vec![constant.clone(), constant]);

    assert!(matches!(result, Err(SchemaError::DuplicateName { name, .. }) if name == "A"));
}
