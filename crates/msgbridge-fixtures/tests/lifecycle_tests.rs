//! Native message ownership: every constructed message is destroyed once.

#![allow(non_snake_case)]

use msgbridge_fixtures::add::{Add, AddRequest, AddResponse};
use msgbridge_fixtures::greet::GreetRequest;
use msgbridge_fixtures::label::{Label, LabelRequest};
use msgbridge_fixtures::ledger;
use msgbridge_fixtures::primitives::PrimitivesResponse;
use msgbridge_runtime::{
    MarshalError, Message, MessageDefinition, NativeMessage, ServiceType, message_type_support,
    service_type_support,
};

#[test]
fn Message___to_native_then_destroy___is_balanced() {
    ledger::reset();
    let request = AddRequest { a: 1, b: 2 };

    let handle = request.to_native().unwrap();
    request.destroy_native(handle);

    let report = ledger::report();
    assert_eq!(report.constructed, 1);
    assert_eq!(report.destroyed, 1);
    assert!(report.is_balanced());
}

#[test]
fn Message___read_from_native___overwrites_every_field() {
    ledger::reset();
    let source = LabelRequest {
        a: 10,
        b: "label".to_string(),
        c: 30,
    };
    let handle = source.to_native().unwrap();

    let mut target = LabelRequest {
        a: -1,
        b: "stale".to_string(),
        c: -1,
    };
    target.read_from_native(&handle).unwrap();
    source.destroy_native(handle);

    assert_eq!(target, source);
    assert_eq!(ledger::report().reads, 3);
    assert!(ledger::report().is_balanced());
}

#[test]
fn Message___works_as_trait_object() {
    ledger::reset();
    let messages: Vec<Box<dyn Message>> = vec![
        Box::new(AddRequest { a: 1, b: 2 }),
        Box::new(GreetRequest {
            name: "dyn".to_string(),
        }),
        Box::new(PrimitivesResponse {}),
    ];

    for message in &messages {
        let handle = message.to_native().unwrap();
        message.destroy_native(handle);
    }

    assert_eq!(ledger::report().constructed, 3);
    assert!(ledger::report().is_balanced());
}

#[test]
fn NativeMessage___drop___destroys_once() {
    ledger::reset();

    {
        let native = NativeMessage::new(&AddResponse { sum: 5 }).unwrap();
        assert_eq!(native.read().unwrap().sum, 5);
        assert_eq!(ledger::report().live, 1);
    }

    assert_eq!(ledger::report().destroyed, 1);
    assert!(ledger::report().is_balanced());
}

#[test]
fn NativeMessage___into_handle___transfers_ownership() {
    ledger::reset();

    let native = NativeMessage::new(&AddRequest { a: 4, b: 5 }).unwrap();
    let handle = native.into_handle();
    assert_eq!(ledger::report().destroyed, 0);

    <AddRequest as MessageDefinition>::destroy_native(handle);
    assert!(ledger::report().is_balanced());
}

#[test]
fn MessageDefinition___from_native___builds_fresh_message() {
    ledger::reset();
    let native = NativeMessage::new(&GreetRequest {
        name: "native".to_string(),
    })
    .unwrap();

    let request = GreetRequest::from_native(native.handle()).unwrap();
    drop(native);

    assert_eq!(request.name, "native");
    assert!(ledger::report().is_balanced());
}

#[test]
fn MessageDefinition___allocation_failure___is_reported() {
    ledger::reset();
    ledger::fail_next_allocation();

    let result = AddRequest::create_native(&AddRequest { a: 1, b: 1 });

    assert_eq!(
        result,
        Err(MarshalError::NativeAllocationFailure {
            type_name: "fixtures/srv/Add_Request"
        })
    );
    let report = ledger::report();
    assert_eq!(report.allocation_failures, 1);
    assert_eq!(report.constructed, 0);
    assert!(report.is_balanced());
}

#[test]
fn NativeMessage___allocation_failure_with_strings___leaks_nothing() {
    ledger::reset();
    ledger::fail_next_allocation();

    let result = NativeMessage::new(&LabelRequest {
        a: 1,
        b: "text".to_string(),
        c: 2,
    });

    assert!(matches!(result, Err(MarshalError::NativeAllocationFailure { .. })));
    assert!(ledger::report().is_balanced());
}

#[test]
fn NativeMessage___panic_while_held___still_destroys() {
    ledger::reset();

    let result = std::panic::catch_unwind(|| {
        let _native = NativeMessage::new(&AddRequest { a: 1, b: 2 }).unwrap();
        panic!("handler failed");
    });

    assert!(result.is_err());
    assert!(ledger::report().is_balanced());
}

#[test]
fn type_support___is_nonzero_and_stable() {
    let first = message_type_support::<AddRequest>();
    let second = message_type_support::<AddRequest>();

    assert_ne!(first, 0);
    assert_eq!(first, second);
    assert_eq!(first, AddRequest::get_type_support());
    assert_ne!(first, AddResponse::get_type_support());
}

#[test]
fn service_type_support___is_distinct_per_service() {
    let add = service_type_support::<Add>();
    let label = service_type_support::<Label>();

    assert_ne!(add, 0);
    assert_ne!(add, label);
    assert_eq!(<Add as ServiceType>::TYPE_NAME, "fixtures/srv/Add");
}
