#![allow(non_snake_case)]

use super::*;
use crate::error::MarshalError;
use crate::test_support::{self, Counter, Increment};

fn increment() -> ServiceDispatcher<Increment> {
    ServiceDispatcher::new(|request: Counter| Counter {
        value: request.value + 1,
    })
}

#[test]
fn ServiceDispatcher___call___runs_handler() {
    let dispatcher = increment();

    let response = dispatcher.call(&Counter { value: 41 }).unwrap();

    assert_eq!(response.value, 42);
    assert_eq!(dispatcher.handled(), 1);
    assert_eq!(dispatcher.failed(), 0);
}

#[test]
fn ServiceDispatcher___call___destroys_every_native_message() {
    let dispatcher = increment();
    let created = test_support::created();
    let destroyed = test_support::destroyed();

    for value in 0..5 {
        dispatcher.call(&Counter { value }).unwrap();
    }

    assert_eq!(test_support::created() - created, 10);
    assert_eq!(test_support::destroyed() - destroyed, 10);
}

#[test]
fn ServiceDispatcher___dispatch___leaves_request_with_caller() {
    let dispatcher = increment();
    let request = NativeMessage::new(&Counter { value: 1 }).unwrap();

    let response = dispatcher.dispatch(&request).unwrap();

    assert_eq!(request.read().unwrap().value, 1);
    assert_eq!(response.read().unwrap().value, 2);
}

#[test]
fn ServiceDispatcher___handler_state___persists_between_calls() {
    let mut total = 0;
    let dispatcher = ServiceDispatcher::<Increment>::new(move |request: Counter| {
        total += request.value;
        Counter { value: total }
    });

    dispatcher.call(&Counter { value: 2 }).unwrap();
    let response = dispatcher.call(&Counter { value: 3 }).unwrap();

    assert_eq!(response.value, 5);
}

#[test]
fn ServiceDispatcher___call___request_allocation_failure_skips_handler() {
    let dispatcher = increment();
    test_support::fail_next_allocation();

    let result = dispatcher.call(&Counter { value: 1 });

    assert!(matches!(
        result,
        Err(MarshalError::NativeAllocationFailure { .. })
    ));
    assert_eq!(dispatcher.handled(), 0);
    assert_eq!(dispatcher.failed(), 1);
}

#[test]
fn ServiceDispatcher___response_allocation_failure___counts_after_handling() {
    let dispatcher = increment();
    let request = NativeMessage::new(&Counter { value: 1 }).unwrap();
    test_support::fail_next_allocation();

    let result = dispatcher.dispatch(&request);

    assert!(matches!(
        result,
        Err(MarshalError::NativeAllocationFailure { .. })
    ));
    assert_eq!(dispatcher.handled(), 1);
    assert_eq!(dispatcher.failed(), 1);
}
