//! String conversion helpers for generated marshalling code
//!
//! Outbound helpers (`*_arg`) produce an owned, NUL-terminated buffer that
//! the generated code binds to a local for the duration of one native call.
//! Inbound helpers (`*_from_native`) copy a borrowed native buffer into a
//! fresh `String`.
//!
//! Bounds are measured in code units of the target encoding: bytes for
//! narrow strings, UTF-16 units for wide strings.

use crate::error::{MarshalError, MarshalResult};
use std::ffi::{CStr, CString, c_char};

/// Convert a narrow string member into a C string.
pub fn narrow_arg(member: &'static str, value: &str, bound: Option<usize>) -> MarshalResult<CString> {
    check_bound(member, value.len(), bound)?;
    CString::new(value).map_err(|e| MarshalError::InteriorNul {
        member,
        position: e.nul_position(),
    })
}

/// Convert a wide string member into NUL-terminated UTF-16.
pub fn wide_arg(member: &'static str, value: &str, bound: Option<usize>) -> MarshalResult<Vec<u16>> {
    let mut units: Vec<u16> = value.encode_utf16().collect();
    if let Some(position) = units.iter().position(|&unit| unit == 0) {
        return Err(MarshalError::InteriorNul { member, position });
    }
    check_bound(member, units.len(), bound)?;
    units.push(0);
    Ok(units)
}

/// Copy a native narrow string into a `String`.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated buffer that stays valid
/// and unmodified for the duration of the call.
pub unsafe fn narrow_from_native(member: &'static str, ptr: *const c_char) -> MarshalResult<String> {
    if ptr.is_null() {
        return Err(MarshalError::NullString { member });
    }
    let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| MarshalError::InvalidEncoding {
            member,
            encoding: "UTF-8",
            reason: e.to_string(),
        })
}

/// Copy a native wide string into a `String`.
///
/// # Safety
///
/// A non-null `ptr` must point to a buffer of UTF-16 code units terminated
/// by a zero unit, valid and unmodified for the duration of the call.
pub unsafe fn wide_from_native(member: &'static str, ptr: *const u16) -> MarshalResult<String> {
    if ptr.is_null() {
        return Err(MarshalError::NullString { member });
    }
    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    let units = unsafe { std::slice::from_raw_parts(ptr, len) };
    String::from_utf16(units).map_err(|e| MarshalError::InvalidEncoding {
        member,
        encoding: "UTF-16",
        reason: e.to_string(),
    })
}

fn check_bound(member: &'static str, length: usize, bound: Option<usize>) -> MarshalResult<()> {
    match bound {
        Some(bound) if length > bound => Err(MarshalError::BoundExceeded {
            member,
            bound,
            length,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "marshal/marshal_tests.rs"]
mod marshal_tests;
