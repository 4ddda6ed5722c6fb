//! Lifecycle ledger for native doubles
//!
//! Every native message the double constructs is recorded here, per thread.
//! Destroyed messages move to a retired set and stay allocated, so their
//! addresses are never reused and a second destroy or a late read is
//! detected rather than silently hitting a new message.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;

/// Counters observed on the current thread
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerReport {
    pub constructed: usize,
    pub destroyed: usize,
    pub reads: usize,
    pub allocation_failures: usize,
    pub double_destroys: usize,
    pub reads_after_destroy: usize,
    pub unknown_handles: usize,
    /// Constructed but not yet destroyed
    pub live: usize,
}

impl LedgerReport {
    /// Every construction matched by exactly one destroy, and no misuse.
    pub fn is_balanced(&self) -> bool {
        self.constructed == self.destroyed
            && self.live == 0
            && self.double_destroys == 0
            && self.reads_after_destroy == 0
            && self.unknown_handles == 0
    }
}

#[derive(Default)]
struct Ledger {
    live: HashMap<usize, Box<dyn Any>>,
    retired: HashMap<usize, Box<dyn Any>>,
    report: LedgerReport,
    fail_next: bool,
}

thread_local! {
    static LEDGER: RefCell<Ledger> = RefCell::new(Ledger::default());
}

/// Snapshot of the current thread's counters.
pub fn report() -> LedgerReport {
    LEDGER.with_borrow(|ledger| LedgerReport {
        live: ledger.live.len(),
        ..ledger.report.clone()
    })
}

/// Forget everything recorded on the current thread.
pub fn reset() {
    LEDGER.with_borrow_mut(|ledger| *ledger = Ledger::default());
}

/// Make the next construction on this thread fail with a null handle.
pub fn fail_next_allocation() {
    LEDGER.with_borrow_mut(|ledger| ledger.fail_next = true);
}

/// Record a new native message, returning its address or 0 on a
/// simulated allocation failure.
pub(crate) fn construct<T: Any>(native: T) -> usize {
    LEDGER.with_borrow_mut(|ledger| {
        if std::mem::take(&mut ledger.fail_next) {
            ledger.report.allocation_failures += 1;
            return 0;
        }

        let boxed: Box<dyn Any> = Box::new(native);
        let address = (&*boxed as *const dyn Any).cast::<()>() as usize;
        ledger.live.insert(address, boxed);
        ledger.report.constructed += 1;
        address
    })
}

pub(crate) fn destroy(address: usize) {
    LEDGER.with_borrow_mut(|ledger| {
        if let Some(native) = ledger.live.remove(&address) {
            ledger.retired.insert(address, native);
            ledger.report.destroyed += 1;
        } else if ledger.retired.contains_key(&address) {
            ledger.report.double_destroys += 1;
        } else {
            ledger.report.unknown_handles += 1;
        }
    })
}

/// Run `read` against the native message at `address`.
///
/// Returns `None` for an address that was never constructed or holds a
/// different message type.
pub(crate) fn with_native<T: Any, R>(address: usize, read: impl FnOnce(&T) -> R) -> Option<R> {
    LEDGER.with_borrow_mut(|ledger| {
        ledger.report.reads += 1;

        let native = match ledger.live.get(&address) {
            Some(native) => native,
            None => match ledger.retired.get(&address) {
                Some(native) => {
                    ledger.report.reads_after_destroy += 1;
                    native
                }
                None => {
                    ledger.report.unknown_handles += 1;
                    return None;
                }
            },
        };

        match native.downcast_ref::<T>() {
            Some(native) => Some(read(native)),
            None => {
                ledger.report.unknown_handles += 1;
                None
            }
        }
    })
}
