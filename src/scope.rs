use std::cell::RefCell;
use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::panic::{self, AssertUnwindSafe};

use log::error;
use smallvec::SmallVec;

use crate::hint::unlikely;

// cleanup failures stop here, they never travel up the unwind path
fn run_cleanup<F: FnOnce()>(f: F) {
    if unlikely(panic::catch_unwind(AssertUnwindSafe(f)).is_err()) {
        error!("cleanup action panicked, ignoring it");
    }
}

/// scope guard that may own a protected value
///
/// when the guard is dropped the cleanup closure runs exactly once with
/// the owned value, no matter how the scope is left: fallthrough, early
/// return, early loop exit or panic unwind. It does not run when the
/// process aborts or when the guard is leaked with `mem::forget`.
///
/// the rest of the scope can still reach the protected value through
/// the `Deref`/`DerefMut` impls
pub struct Guard<T, F: FnOnce(T)> {
    value: ManuallyDrop<T>,
    dropfn: ManuallyDrop<F>,
}

/// create a new [`Guard`] owning `value`, running `dropfn` at scope exit
pub fn guard<T, F: FnOnce(T)>(value: T, dropfn: F) -> Guard<T, F> {
    Guard {
        value: ManuallyDrop::new(value),
        dropfn: ManuallyDrop::new(dropfn),
    }
}

impl<T, F: FnOnce(T)> Deref for Guard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, F: FnOnce(T)> DerefMut for Guard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T, F: FnOnce(T)> Drop for Guard<T, F> {
    fn drop(&mut self) {
        // drop runs at most once, both fields are still live here
        let value = unsafe { ManuallyDrop::take(&mut self.value) };
        let dropfn = unsafe { ManuallyDrop::take(&mut self.dropfn) };
        run_cleanup(move || dropfn(value));
    }
}

impl<T: fmt::Debug, F: FnOnce(T)> fmt::Debug for Guard<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Guard {{ value: {:?} }}", &*self.value)
    }
}

type DeferFn<'a> = Box<dyn FnOnce() + 'a>;

/// a lexical region that cleanup actions can be registered on
///
/// actions registered with [`defer`](Scope::defer) run exactly once
/// when the scope is exited, in reverse registration order
pub struct Scope<'a> {
    dtors: RefCell<SmallVec<[DeferFn<'a>; 4]>>,
}

/// create a new `Scope` for deferred cleanup actions
///
/// ```
/// use restep::scope;
///
/// let mut order = vec![];
/// scope(|s| {
///     s.defer(|| println!("last out"));
///     order.push("body");
/// });
/// ```
pub fn scope<'a, F, R>(f: F) -> R
where
    F: FnOnce(&Scope<'a>) -> R,
{
    let scope = Scope {
        dtors: RefCell::new(SmallVec::new()),
    };
    let ret = f(&scope);
    scope.drop_all();
    ret
}

impl<'a> Scope<'a> {
    /// schedule code to be executed when exiting the scope
    ///
    /// this is akin to having a destructor on the stack, except that it
    /// is *guaranteed* to be run
    pub fn defer<F>(&self, f: F)
    where
        F: FnOnce() + 'a,
    {
        self.dtors.borrow_mut().push(Box::new(f));
    }

    // written in a transactional style: the borrow is relinquished
    // before each action runs, so an action registering further cleanup
    // or a panic resuming in the unwinding drop both stay sound
    fn drop_all(&self) {
        loop {
            let dtor = match self.dtors.borrow_mut().pop() {
                Some(dtor) => dtor,
                None => return,
            };
            run_cleanup(dtor);
        }
    }
}

impl<'a> fmt::Debug for Scope<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Scope {{ ... }}")
    }
}

impl<'a> Drop for Scope<'a> {
    fn drop(&mut self) {
        self.drop_all()
    }
}
