//! lock scopes: run a block with a borrowed mutex held, releasing it on
//! every path out of the block
//!
//! the lock is never owned by the scope, only borrowed for its
//! duration, and release goes through the same drop discipline as the
//! scope guards. No ordering is imposed across distinct lock scopes;
//! avoiding deadlock between them is the caller's responsibility.

use std::time::Duration;

use log::trace;
use parking_lot::Mutex;

/// how a lock scope tries to take the lock
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AcquirePolicy {
    /// wait until the lock is handed over; cannot fail, and an always
    /// contended lock blocks forever
    Block,
    /// exactly one non-blocking attempt
    Try,
    /// wait at most the given duration
    Timed(Duration),
}

/// run `body` with `lock` held under the given policy
///
/// returns `None` when the lock could not be taken, which only the
/// `Try` and `Timed` policies can produce, and in their case only
/// through contention: a `&Mutex` cannot be invalid, so there is no
/// second failure kind to distinguish. On success the lock is released
/// exactly once when the guard drops, on every path out of `body`
/// including panic unwind.
pub fn with_lock<T, R, F>(lock: &Mutex<T>, policy: AcquirePolicy, body: F) -> Option<R>
where
    T: ?Sized,
    F: FnOnce(&mut T) -> R,
{
    let mut guard = match policy {
        AcquirePolicy::Block => lock.lock(),
        AcquirePolicy::Try => match lock.try_lock() {
            Some(guard) => guard,
            None => {
                trace!("lock scope: single attempt missed");
                return None;
            }
        },
        AcquirePolicy::Timed(dur) => match lock.try_lock_for(dur) {
            Some(guard) => guard,
            None => {
                trace!("lock scope: gave up after {:?}", dur);
                return None;
            }
        },
    };
    Some(body(&mut guard))
}

/// run `body` with the lock held, waiting as long as it takes
///
/// there is no failure branch, acquisition of a blocking lock scope
/// cannot fail
pub fn synchronized<T, R, F>(lock: &Mutex<T>, body: F) -> R
where
    T: ?Sized,
    F: FnOnce(&mut T) -> R,
{
    let mut guard = lock.lock();
    body(&mut guard)
}

/// make one attempt at the lock: run `body` if it was free, `or_else`
/// if it was held, never touching the lock in the latter case
pub fn try_synchronized<T, R, F, E>(lock: &Mutex<T>, body: F, or_else: E) -> R
where
    T: ?Sized,
    F: FnOnce(&mut T) -> R,
    E: FnOnce() -> R,
{
    match with_lock(lock, AcquirePolicy::Try, body) {
        Some(r) => r,
        None => or_else(),
    }
}

/// wait at most `timeout` for the lock: run `body` once acquired,
/// `or_else` on timeout
///
/// a zero timeout degrades to a single attempt and never blocks
pub fn timed_synchronized<T, R, F, E>(lock: &Mutex<T>, timeout: Duration, body: F, or_else: E) -> R
where
    T: ?Sized,
    F: FnOnce(&mut T) -> R,
    E: FnOnce() -> R,
{
    match with_lock(lock, AcquirePolicy::Timed(timeout), body) {
        Some(r) => r,
        None => or_else(),
    }
}
