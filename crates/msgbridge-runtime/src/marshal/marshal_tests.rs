#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;
use test_case::test_case;

// narrow_arg tests

#[test_case(""; "empty")]
#[test_case("hello"; "ascii")]
#[test_case("héllo wörld ✓"; "multi-byte")]
fn narrow_arg___round_trips_through_native_pointer(value: &str) {
    let arg = narrow_arg("name", value, None).unwrap();

    let copied = unsafe { narrow_from_native("name", arg.as_ptr()) }.unwrap();

    assert_eq!(copied, value);
}

#[test]
fn narrow_arg___interior_nul___reports_position() {
    let result = narrow_arg("name", "ab\0cd", None);

    assert_eq!(
        result,
        Err(MarshalError::InteriorNul {
            member: "name",
            position: 2
        })
    );
}

#[test]
fn narrow_arg___bound___counts_bytes() {
    assert!(narrow_arg("tag", "abcdefgh", Some(8)).is_ok());

    let result = narrow_arg("tag", "abcdefgé", Some(8));

    assert_eq!(
        result,
        Err(MarshalError::BoundExceeded {
            member: "tag",
            bound: 8,
            length: 9
        })
    );
}

// wide_arg tests

#[test]
fn wide_arg___appends_terminator() {
    let units = wide_arg("text", "hi", None).unwrap();

    assert_eq!(units, vec![u16::from(b'h'), u16::from(b'i'), 0]);
}

#[test]
fn wide_arg___surrogate_pairs___round_trip() {
    let value = "emoji 😀 and ünïcode";
    let units = wide_arg("text", value, None).unwrap();

    let copied = unsafe { wide_from_native("text", units.as_ptr()) }.unwrap();

    assert_eq!(copied, value);
}

#[test]
fn wide_arg___bound___counts_utf16_units() {
    assert!(wide_arg("text", "😀", Some(2)).is_ok());

    let result = wide_arg("text", "😀", Some(1));

    assert!(matches!(
        result,
        Err(MarshalError::BoundExceeded { length: 2, .. })
    ));
}

#[test]
fn wide_arg___interior_nul___is_rejected() {
    let result = wide_arg("text", "a\0", None);

    assert!(matches!(
        result,
        Err(MarshalError::InteriorNul { position: 1, .. })
    ));
}

// *_from_native tests

#[test]
fn narrow_from_native___null___is_error() {
    let result = unsafe { narrow_from_native("name", std::ptr::null()) };

    assert_eq!(result, Err(MarshalError::NullString { member: "name" }));
}

#[test]
fn narrow_from_native___invalid_utf8___is_error() {
    let bytes: [u8; 3] = [0xff, 0xfe, 0];

    let result = unsafe { narrow_from_native("name", bytes.as_ptr().cast()) };

    assert!(matches!(
        result,
        Err(MarshalError::InvalidEncoding {
            encoding: "UTF-8",
            ..
        })
    ));
}

#[test]
fn wide_from_native___unpaired_surrogate___is_error() {
    let units: [u16; 2] = [0xd800, 0];

    let result = unsafe { wide_from_native("text", units.as_ptr()) };

    assert!(matches!(
        result,
        Err(MarshalError::InvalidEncoding {
            encoding: "UTF-16",
            ..
        })
    ));
}

#[test]
fn wide_from_native___null___is_error() {
    let result = unsafe { wide_from_native("text", std::ptr::null()) };

    assert_eq!(result, Err(MarshalError::NullString { member: "text" }));
}

proptest! {
    #[test]
    fn narrow_arg___nul_free_strings_round_trip(value in "[^\\x00]{0,64}") {
        let arg = narrow_arg("name", &value, None).unwrap();
        let copied = unsafe { narrow_from_native("name", arg.as_ptr()) }.unwrap();
        prop_assert_eq!(copied, value);
    }

    #[test]
    fn wide_arg___nul_free_strings_round_trip(value in "[^\\x00]{0,64}") {
        let units = wide_arg("text", &value, None).unwrap();
        let copied = unsafe { wide_from_native("text", units.as_ptr()) }.unwrap();
        prop_assert_eq!(copied, value);
    }
}
