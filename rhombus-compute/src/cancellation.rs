use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation poll.
///
/// Polled once per rectangle and once per scanned row. Must not block:
/// return immediately when nothing is pending.
pub trait CancellationChecker {
    /// Returns true if computation should be cancelled
    fn is_cancelled(&self) -> bool;
}

/// Never cancels - for batch renders and tests
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancellationChecker for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Checks an atomic boolean flag for cancellation
#[derive(Clone, Debug)]
pub struct AtomicBoolChecker {
    flag: Arc<AtomicBool>,
}

impl AtomicBoolChecker {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl CancellationChecker for AtomicBoolChecker {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Adapts a host poll such as "is a key pending?" into a checker.
#[derive(Clone, Copy)]
pub struct PollFn<F>(pub F);

impl<F: Fn() -> bool> CancellationChecker for PollFn<F> {
    fn is_cancelled(&self) -> bool {
        (self.0)()
    }
}
