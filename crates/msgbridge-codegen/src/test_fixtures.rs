//! Sample schemas shared by unit tests

use msgbridge_schema::{
    ArraySize, Constant, Member, MessageSchema, PrimitiveType, ServiceSchema, StringType, TypeKind,
};

fn int(name: &str, primitive: PrimitiveType) -> Member {
    Member::new(name, TypeKind::primitive(primitive))
}

/// `int64 a, int64 b --- int64 sum`
pub fn add() -> ServiceSchema {
    ServiceSchema::new(
        "example_interfaces",
        "Add",
        MessageSchema::with_members(vec![
            int("a", PrimitiveType::Int64),
            int("b", PrimitiveType::Int64),
        ])
        .unwrap(),
        MessageSchema::with_members(vec![int("sum", PrimitiveType::Int64)]).unwrap(),
    )
    .unwrap()
}

/// `string name --- string reply`
pub fn greet() -> ServiceSchema {
    ServiceSchema::new(
        "example_interfaces",
        "Greet",
        MessageSchema::with_members(vec![Member::new(
            "name",
            TypeKind::string(StringType::narrow()),
        )])
        .unwrap(),
        MessageSchema::with_members(vec![Member::new(
            "reply",
            TypeKind::string(StringType::narrow()),
        )])
        .unwrap(),
    )
    .unwrap()
}

/// Mixed members, a keyword member, wide and bounded strings and a constant
pub fn label() -> ServiceSchema {
    let request = MessageSchema::new(
        vec![
            int("a", PrimitiveType::Int32),
            Member::new("b", TypeKind::string(StringType::narrow()))
                .with_docs(vec!["Label text.".to_string()]),
            int("c", PrimitiveType::Int32),
            int("type", PrimitiveType::UInt8),
        ],
        vec![Constant::new("MAX_LEN", PrimitiveType::UInt32, "64").unwrap()],
    )
    .unwrap()
    .with_docs(vec!["Attach a label.".to_string()]);
    let response = MessageSchema::with_members(vec![
        Member::new("text", TypeKind::string(StringType::wide())),
        Member::new("tag", TypeKind::string(StringType::narrow().bounded(8))),
    ])
    .unwrap();

    ServiceSchema::new("labels", "Label", request, response).unwrap()
}

/// Both halves empty
pub fn trigger() -> ServiceSchema {
    ServiceSchema::new("std_srvs", "Trigger", MessageSchema::empty(), MessageSchema::empty())
        .unwrap()
}

/// An array and a nested member around a mapped one
pub fn path() -> ServiceSchema {
    ServiceSchema::new(
        "nav",
        "Path",
        MessageSchema::with_members(vec![
            Member::new(
                "waypoints",
                TypeKind::array(TypeKind::primitive(PrimitiveType::Float64), ArraySize::Unbounded),
            ),
            int("count", PrimitiveType::UInt32),
            Member::new("origin", TypeKind::nested(Some("geometry"), "Point")),
        ])
        .unwrap(),
        MessageSchema::empty(),
    )
    .unwrap()
}
