//! Generic request/response dispatch over native messages
//!
//! Written once against the capabilities, so every generated service gets
//! the same lifecycle: read the request out of its native handle, run the
//! handler, marshal the response into an owned native message.

use crate::error::{MarshalError, MarshalResult};
use crate::native_message::NativeMessage;
use crate::traits::ServiceType;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

type Handler<S> = Box<
    dyn FnMut(<S as ServiceType>::Request) -> <S as ServiceType>::Response + Send,
>;

/// Serves one service type with a handler function
pub struct ServiceDispatcher<S: ServiceType> {
    handler: Mutex<Handler<S>>,
    handled: AtomicU64,
    failed: AtomicU64,
}

impl<S: ServiceType> ServiceDispatcher<S> {
    /// Create a dispatcher around `handler`
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(S::Request) -> S::Response + Send + 'static,
    {
        Self {
            handler: Mutex::new(Box::new(handler)),
            handled: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Handle a request held in native form.
    ///
    /// The request is only borrowed; the caller keeps ownership. The
    /// returned response owns its native message.
    pub fn dispatch(
        &self,
        request: &NativeMessage<S::Request>,
    ) -> MarshalResult<NativeMessage<S::Response>> {
        let request = request
            .read()
            .inspect_err(|error| self.record_failure("read request", error))?;
        tracing::debug!(service = S::TYPE_NAME, "dispatching request");

        let response = {
            let mut handler = self.handler.lock();
            (*handler)(request)
        };
        self.handled.fetch_add(1, Ordering::Relaxed);

        NativeMessage::new(&response)
            .inspect_err(|error| self.record_failure("marshal response", error))
    }

    /// Marshal `request`, dispatch it, and read the response back.
    ///
    /// Both native messages are destroyed before this returns.
    pub fn call(&self, request: &S::Request) -> MarshalResult<S::Response> {
        let native_request = NativeMessage::new(request)
            .inspect_err(|error| self.record_failure("marshal request", error))?;
        let native_response = self.dispatch(&native_request)?;
        native_response
            .read()
            .inspect_err(|error| self.record_failure("read response", error))
    }

    /// Number of requests handled so far
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    /// Number of marshalling failures so far
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    fn record_failure(&self, stage: &'static str, error: &MarshalError) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        if error.is_encoding_error() {
            tracing::debug!(
                service = S::TYPE_NAME,
                stage,
                code = error.error_code(),
                %error,
                "rejected message before any native call"
            );
        } else {
            tracing::warn!(
                service = S::TYPE_NAME,
                stage,
                code = error.error_code(),
                %error,
                "native marshalling failed"
            );
        }
    }
}

#[cfg(test)]
#[path = "dispatch/dispatch_tests.rs"]
mod dispatch_tests;
