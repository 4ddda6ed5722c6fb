//! A hand-written message with a heap-backed fake native side

use crate::error::MarshalResult;
use crate::handle::NativeHandle;
use crate::traits::{Message, MessageDefinition, ServiceType};
use std::cell::Cell;

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static DESTROYED: Cell<usize> = const { Cell::new(0) };
    static FAIL_NEXT: Cell<bool> = const { Cell::new(false) };
}

pub fn created() -> usize {
    CREATED.with(Cell::get)
}

pub fn destroyed() -> usize {
    DESTROYED.with(Cell::get)
}

pub fn fail_next_allocation() {
    FAIL_NEXT.with(|fail| fail.set(true));
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub value: i64,
}

impl Message for Counter {
    fn to_native(&self) -> MarshalResult<NativeHandle> {
        let raw = if FAIL_NEXT.with(|fail| fail.replace(false)) {
            0
        } else {
            CREATED.with(|c| c.set(c.get() + 1));
            Box::into_raw(Box::new(self.value)) as usize
        };
        unsafe { NativeHandle::from_raw(raw, Self::TYPE_NAME) }
    }

    fn destroy_native(&self, handle: NativeHandle) {
        DESTROYED.with(|c| c.set(c.get() + 1));
        drop(unsafe { Box::from_raw(handle.into_raw() as *mut i64) });
    }

    fn read_from_native(&mut self, handle: &NativeHandle) -> MarshalResult<()> {
        self.value = unsafe { *(handle.as_raw() as *const i64) };
        Ok(())
    }
}

impl MessageDefinition for Counter {
    const TYPE_NAME: &'static str = "test/msg/Counter";

    fn get_type_support() -> usize {
        0xC0
    }

    fn create_native(message: &Self) -> MarshalResult<NativeHandle> {
        message.to_native()
    }

    fn destroy_native(handle: NativeHandle) {
        Message::destroy_native(&Counter::default(), handle);
    }
}

pub struct Increment;

impl ServiceType for Increment {
    type Request = Counter;
    type Response = Counter;

    const TYPE_NAME: &'static str = "test/srv/Increment";

    fn get_type_support() -> usize {
        0x5E
    }
}
