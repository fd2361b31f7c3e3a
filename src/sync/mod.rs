mod synchronized;

pub use self::synchronized::{
    synchronized, timed_synchronized, try_synchronized, with_lock, AcquirePolicy,
};

// the mutual exclusion primitive lock scopes borrow; re-exported so
// callers need no direct parking_lot dependency
pub use parking_lot::{Mutex, MutexGuard};
