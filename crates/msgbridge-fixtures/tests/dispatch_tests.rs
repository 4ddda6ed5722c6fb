//! Serving generated services through the runtime dispatcher.

#![allow(non_snake_case)]

use msgbridge_fixtures::add::{Add, AddRequest, AddResponse};
use msgbridge_fixtures::greet::{Greet, GreetRequest, GreetResponse};
use msgbridge_fixtures::label::{Label, LabelRequest, LabelResponse};
use msgbridge_fixtures::ledger;
use msgbridge_runtime::{MarshalError, NativeMessage, ServiceDispatcher};
use test_case::test_case;

fn add_dispatcher() -> ServiceDispatcher<Add> {
    ServiceDispatcher::new(|request: AddRequest| AddResponse {
        sum: request.a + request.b,
    })
}

#[test]
fn ServiceDispatcher___call___returns_handler_response() {
    ledger::reset();
    let dispatcher = add_dispatcher();

    let response = dispatcher.call(&AddRequest { a: 2, b: 40 }).unwrap();

    assert_eq!(response.sum, 42);
    assert_eq!(dispatcher.handled(), 1);
    assert_eq!(ledger::report().constructed, 2);
    assert!(ledger::report().is_balanced());
}

#[test]
fn ServiceDispatcher___dispatch___borrows_request() {
    ledger::reset();
    let dispatcher = add_dispatcher();
    let request = NativeMessage::new(&AddRequest { a: -5, b: 5 }).unwrap();

    let response = dispatcher.dispatch(&request).unwrap();
    let again = dispatcher.dispatch(&request).unwrap();

    assert_eq!(response.read().unwrap().sum, 0);
    assert_eq!(again.read().unwrap().sum, 0);
    drop((request, response, again));
    assert!(ledger::report().is_balanced());
}

#[test_case("Wörld", "Hello, Wörld!"; "multi byte")]
#[test_case("", "Hello, !"; "empty")]
fn ServiceDispatcher___strings___cross_both_ways(name: &str, expected: &str) {
    ledger::reset();
    let dispatcher: ServiceDispatcher<Greet> =
        ServiceDispatcher::new(|request: GreetRequest| GreetResponse {
            reply: format!("Hello, {}!", request.name),
        });

    let response = dispatcher
        .call(&GreetRequest {
            name: name.to_string(),
        })
        .unwrap();

    assert_eq!(response.reply, expected);
    assert!(ledger::report().is_balanced());
}

#[test_case(""; "empty")]
#[test_case("echo"; "ascii")]
fn ServiceDispatcher___echo___returns_name_unchanged(name: &str) {
    let dispatcher: ServiceDispatcher<Greet> =
        ServiceDispatcher::new(|request: GreetRequest| GreetResponse {
            reply: request.name,
        });

    let response = dispatcher
        .call(&GreetRequest {
            name: name.to_string(),
        })
        .unwrap();

    assert_eq!(response.reply, name);
}

#[test]
fn ServiceDispatcher___oversized_response___is_error_and_balanced() {
    ledger::reset();
    let dispatcher: ServiceDispatcher<Label> =
        ServiceDispatcher::new(|request: LabelRequest| LabelResponse {
            text: request.b.clone(),
            tag: request.b,
        });

    let result = dispatcher.call(&LabelRequest {
        a: 0,
        b: "far too long for the tag".to_string(),
        c: 0,
    });

    assert!(matches!(
        result,
        Err(MarshalError::BoundExceeded { member: "tag", .. })
    ));
    assert_eq!(dispatcher.handled(), 1);
    assert_eq!(dispatcher.failed(), 1);
    assert!(ledger::report().is_balanced());
}

#[test]
fn ServiceDispatcher___stateful_handler___sees_every_request() {
    let mut total = 0;
    let dispatcher: ServiceDispatcher<Add> = ServiceDispatcher::new(move |request: AddRequest| {
        total += request.a;
        AddResponse { sum: total }
    });

    for a in 1..=4 {
        dispatcher.call(&AddRequest { a, b: 0 }).unwrap();
    }
    let last = dispatcher.call(&AddRequest { a: 0, b: 0 }).unwrap();

    assert_eq!(last.sum, 10);
    assert_eq!(dispatcher.handled(), 5);
}
