//! In-process native double
//!
//! Defines, with the exact names and signatures the generated extern blocks
//! declare, every native entry point of the fixture services. Messages are
//! Rust structs owned by the [`ledger`](crate::ledger); string members are
//! stored as NUL-terminated buffers so reader pointers stay valid until the
//! message is destroyed.

use std::ffi::{CStr, CString, c_char};

/// Storage type of a member inside the native double.
macro_rules! storage {
    (direct $ty:ty) => { $ty };
    (narrow) => { ::std::ffi::CString };
    (wide) => { ::std::vec::Vec<u16> };
}

/// Constructor parameter type.
macro_rules! param {
    (direct $ty:ty) => { $ty };
    (narrow) => { *const ::std::ffi::c_char };
    (wide) => { *const u16 };
}

/// Copy a constructor argument into storage; `None` for a null string.
macro_rules! store {
    (direct, $value:expr) => {
        ::std::option::Option::Some($value)
    };
    (narrow, $value:expr) => {
        unsafe { $crate::native_double::copy_narrow($value) }
    };
    (wide, $value:expr) => {
        unsafe { $crate::native_double::copy_wide($value) }
    };
}

/// Reader return value from storage.
macro_rules! load {
    (direct, $value:expr) => { $value };
    (narrow, $value:expr) => { $value.as_ptr() };
    (wide, $value:expr) => { $value.as_ptr() };
}

/// Reader return value for a handle the ledger does not know.
macro_rules! fallback {
    (direct) => { ::std::default::Default::default() };
    (narrow) => { ::std::ptr::null() };
    (wide) => { ::std::ptr::null() };
}

/// Define the native entry points of one message.
macro_rules! native_message {
    ($prefix:ident { $($field:ident: $kind:ident($($ty:ty)?)),* $(,)? }) => {
        ::paste::paste! {
            #[allow(non_camel_case_types)]
            struct [<$prefix _Native>] {
                // Keeps every message sized, so each gets a distinct address.
                _serial: u64,
                $($field: storage!($kind $($ty)?),)*
            }

            #[allow(non_upper_case_globals)]
            static [<$prefix _TYPE_SUPPORT>]: u8 = 0;

            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub extern "C" fn [<$prefix _get_type_support>]() -> usize {
                ::std::ptr::addr_of!([<$prefix _TYPE_SUPPORT>]) as usize
            }

            /// # Safety
            ///
            /// String arguments must be null or NUL-terminated.
            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn [<$prefix _get_native_message>](
                $($field: param!($kind $($ty)?)),*
            ) -> usize {
                $(
                    let ::std::option::Option::Some($field) = store!($kind, $field) else {
                        return 0;
                    };
                )*
                $crate::ledger::construct([<$prefix _Native>] {
                    _serial: $crate::native_double::next_serial(),
                    $($field,)*
                })
            }

            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub extern "C" fn [<$prefix _destroy_native_message>](raw_message: usize) {
                $crate::ledger::destroy(raw_message)
            }

            $(
                #[allow(non_snake_case)]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<$prefix _ $field _read_handle>](
                    raw_message: usize,
                ) -> param!($kind $($ty)?) {
                    $crate::ledger::with_native(raw_message, |native: &[<$prefix _Native>]| {
                        load!($kind, native.$field)
                    })
                    .unwrap_or_else(|| fallback!($kind))
                }
            )*
        }
    };
}

/// Define the type support getter of one service.
macro_rules! native_service {
    ($prefix:ident) => {
        ::paste::paste! {
            #[allow(non_upper_case_globals)]
            static [<$prefix _TYPE_SUPPORT>]: u8 = 0;

            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub extern "C" fn [<$prefix _get_type_support>]() -> usize {
                ::std::ptr::addr_of!([<$prefix _TYPE_SUPPORT>]) as usize
            }
        }
    };
}

native_service!(fixtures__srv__Add);
native_message!(fixtures__srv__Add_Request { a: direct(i64), b: direct(i64) });
native_message!(fixtures__srv__Add_Response { sum: direct(i64) });

native_service!(fixtures__srv__Greet);
native_message!(fixtures__srv__Greet_Request { name: narrow() });
native_message!(fixtures__srv__Greet_Response { reply: narrow() });

native_service!(fixtures__srv__Primitives);
native_message!(fixtures__srv__Primitives_Request {
    flag: direct(bool),
    raw_byte: direct(u8),
    letter: direct(u8),
    int8_value: direct(i8),
    uint8_value: direct(u8),
    int16_value: direct(i16),
    uint16_value: direct(u16),
    int32_value: direct(i32),
    uint32_value: direct(u32),
    int64_value: direct(i64),
    uint64_value: direct(u64),
    float32_value: direct(f32),
    float64_value: direct(f64),
});
native_message!(fixtures__srv__Primitives_Response {});

native_service!(fixtures__srv__Label);
native_message!(fixtures__srv__Label_Request {
    a: direct(i32),
    b: narrow(),
    c: direct(i32),
});
native_message!(fixtures__srv__Label_Response {
    text: wide(),
    tag: narrow(),
});

thread_local! {
    static SERIAL: std::cell::Cell<u64> = const { std::cell::Cell::new(0) };
}

fn next_serial() -> u64 {
    SERIAL.with(|serial| {
        let next = serial.get() + 1;
        serial.set(next);
        next
    })
}

/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated buffer.
unsafe fn copy_narrow(ptr: *const c_char) -> Option<CString> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_owned())
}

/// # Safety
///
/// `ptr` must be null or point to code units terminated by a zero unit.
unsafe fn copy_wide(ptr: *const u16) -> Option<Vec<u16>> {
    if ptr.is_null() {
        return None;
    }
    let mut units = Vec::new();
    let mut cursor = ptr;
    loop {
        let unit = unsafe { *cursor };
        units.push(unit);
        if unit == 0 {
            return Some(units);
        }
        cursor = unsafe { cursor.add(1) };
    }
}
