/// macro used to handle the failure of a test that should succeed
///
/// the else arm is written after the `otherwise` keyword, the success
/// path just falls through to the following statement
///
/// ```
/// use restep::should;
///
/// let mut status = "ok";
/// should!(1 + 1 == 2, otherwise { status = "broken"; });
/// assert_eq!(status, "ok");
/// ```
#[macro_export]
macro_rules! should {
    ($test:expr, otherwise $else_:block) => {
        if $crate::likely($test) {
        } else $else_
    };
}

/// return from the enclosing function if the test succeeds
///
/// ```
/// use restep::return_if;
///
/// fn clamp100(v: u32) -> u32 {
///     return_if!(v > 100, 100);
///     v
/// }
/// assert_eq!(clamp100(42), 42);
/// assert_eq!(clamp100(1000), 100);
/// ```
#[macro_export]
macro_rules! return_if {
    ($test:expr) => {
        if $test {
            return;
        }
    };
    ($test:expr, $val:expr) => {
        if $test {
            return $val;
        }
    };
}

/// return from the enclosing function if the test fails
#[macro_export]
macro_rules! return_if_not {
    ($test:expr) => {
        if !($test) {
            return;
        }
    };
    ($test:expr, $val:expr) => {
        if !($test) {
            return $val;
        }
    };
}

/// return from the enclosing function if the test should succeed but fails
#[macro_export]
macro_rules! return_if_fail {
    ($test:expr) => {
        if $crate::unlikely(!($test)) {
            return;
        }
    };
    ($test:expr, $val:expr) => {
        if $crate::unlikely(!($test)) {
            return $val;
        }
    };
}

/// break from the enclosing loop if the test succeeds
///
/// a loop label can be supplied to break an outer loop
#[macro_export]
macro_rules! break_if {
    ($label:lifetime, $test:expr) => {
        if $test {
            break $label;
        }
    };
    ($test:expr) => {
        if $test {
            break;
        }
    };
}

/// break from the enclosing loop if the test fails
#[macro_export]
macro_rules! break_if_not {
    ($label:lifetime, $test:expr) => {
        if !($test) {
            break $label;
        }
    };
    ($test:expr) => {
        if !($test) {
            break;
        }
    };
}

/// break from the enclosing loop if the test should succeed but fails
#[macro_export]
macro_rules! break_if_fail {
    ($label:lifetime, $test:expr) => {
        if $crate::unlikely(!($test)) {
            break $label;
        }
    };
    ($test:expr) => {
        if $crate::unlikely(!($test)) {
            break;
        }
    };
}

/// continue the enclosing loop if the test succeeds
#[macro_export]
macro_rules! continue_if {
    ($label:lifetime, $test:expr) => {
        if $test {
            continue $label;
        }
    };
    ($test:expr) => {
        if $test {
            continue;
        }
    };
}

/// continue the enclosing loop if the test fails
#[macro_export]
macro_rules! continue_if_not {
    ($label:lifetime, $test:expr) => {
        if !($test) {
            continue $label;
        }
    };
    ($test:expr) => {
        if !($test) {
            continue;
        }
    };
}

/// continue the enclosing loop if the test should succeed but fails
#[macro_export]
macro_rules! continue_if_fail {
    ($label:lifetime, $test:expr) => {
        if $crate::unlikely(!($test)) {
            continue $label;
        }
    };
    ($test:expr) => {
        if $crate::unlikely(!($test)) {
            continue;
        }
    };
}

/// execute a block of code when the current scope is exited
///
/// the block runs exactly once, on every path out of the scope, in
/// reverse registration order relative to other guards in the scope
///
/// ```
/// use std::cell::Cell;
/// use restep::defer;
///
/// let ran = Cell::new(false);
/// {
///     defer!(ran.set(true));
///     assert!(!ran.get());
/// }
/// assert!(ran.get());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::guard((), |_| {
            $($body)*
        });
    };
}

/// run a block of code with the lock held, releasing it when the block
/// is left on any path
///
/// this is a convenient wrapper for [`sync::synchronized`]
///
/// ```
/// use restep::sync::Mutex;
/// use restep::synchronized;
///
/// let counter = Mutex::new(0);
/// synchronized!(&counter, |n| *n += 1);
/// assert_eq!(*counter.lock(), 1);
/// ```
///
/// [`sync::synchronized`]: sync/fn.synchronized.html
#[macro_export]
macro_rules! synchronized {
    ($lock:expr, |$data:pat_param| $body:expr) => {
        $crate::sync::synchronized($lock, |$data| $body)
    };
}

/// make one attempt at the lock, running the else arm when it is
/// already held elsewhere
///
/// ```
/// use restep::sync::Mutex;
/// use restep::try_synchronized;
///
/// let counter = Mutex::new(0);
/// let hit = try_synchronized!(&counter, |n| { *n += 1; true }, else false);
/// assert!(hit);
/// ```
#[macro_export]
macro_rules! try_synchronized {
    ($lock:expr, |$data:pat_param| $body:expr, else $else_:expr) => {
        $crate::sync::try_synchronized($lock, |$data| $body, || $else_)
    };
    ($lock:expr, |$data:pat_param| $body:expr) => {
        $crate::sync::with_lock($lock, $crate::sync::AcquirePolicy::Try, |$data| $body)
    };
}

/// wait at most the given duration for the lock, running the else arm
/// on timeout
#[macro_export]
macro_rules! timed_synchronized {
    ($lock:expr, $dur:expr, |$data:pat_param| $body:expr, else $else_:expr) => {
        $crate::sync::timed_synchronized($lock, $dur, |$data| $body, || $else_)
    };
    ($lock:expr, $dur:expr, |$data:pat_param| $body:expr) => {
        $crate::sync::with_lock(
            $lock,
            $crate::sync::AcquirePolicy::Timed($dur),
            |$data| $body,
        )
    };
}

/// macro used to define the body of a resumable routine
///
/// the body is a sequence of segments; each segment is a block followed
/// by `suspend value;`, which records the resume position and hands the
/// value back to the caller. The next call with the same state enters
/// directly after that point. Segments are numbered densely in
/// definition order, the first one is the entry point. An optional
/// trailing `done { .. }` block runs on the completing pass.
///
/// every value that must survive a suspension has to live in caller
/// owned storage passed into the routine, the routine is re-entered as
/// a fresh call on each resumption.
///
/// ```
/// use restep::*;
///
/// fn counter(state: &mut SuspendState, n: &mut u32) -> Step<u32> {
///     resume!(state => {
///         { *n = 1; } suspend *n;
///         { *n += 1; } suspend *n;
///         { *n += 1; } suspend *n;
///     })
/// }
///
/// let mut state = SuspendState::new();
/// let mut n = 0;
/// assert_eq!(counter(&mut state, &mut n).suspended(), Some(1));
/// assert_eq!(counter(&mut state, &mut n).suspended(), Some(2));
/// assert_eq!(counter(&mut state, &mut n).suspended(), Some(3));
/// assert!(counter(&mut state, &mut n).is_complete());
/// ```
#[macro_export]
macro_rules! resume {
    // dispatch arms, one per segment, dense index match
    (@arm $state:ident, $pos:ident, $idx:expr; $body:block suspend ; $($rest:tt)*) => {
        if $pos == $idx {
            $body
            $state.advance($crate::StepId::new($idx + 1));
            return $crate::Step::Suspend(());
        } else {
            $crate::resume!(@arm $state, $pos, $idx + 1; $($rest)*)
        }
    };
    (@arm $state:ident, $pos:ident, $idx:expr; $body:block suspend $val:expr ; $($rest:tt)*) => {
        if $pos == $idx {
            $body
            $state.advance($crate::StepId::new($idx + 1));
            return $crate::Step::Suspend($val);
        } else {
            $crate::resume!(@arm $state, $pos, $idx + 1; $($rest)*)
        }
    };
    (@arm $state:ident, $pos:ident, $idx:expr; done $fin:block) => {
        if $pos == $idx {
            $fin
            $state.finish();
            return $crate::Step::Complete;
        } else {
            $crate::resume!(@arm $state, $pos, $idx;)
        }
    };
    (@arm $state:ident, $pos:ident, $idx:expr;) => {{
        if $pos == $idx {
            $state.finish();
            return $crate::Step::Complete;
        }
        panic!(
            "resumable routine driven with a position it never assigned: {}",
            $pos
        )
    }};

    ($state:expr => { $($rest:tt)* }) => {{
        let __state: &mut $crate::SuspendState = $state;
        let __pos = match __state.current() {
            ::std::option::Option::Some(__step) => __step.index(),
            // completion is sticky, a finished routine stays finished
            ::std::option::Option::None => return $crate::Step::Complete,
        };
        $crate::resume!(@arm __state, __pos, 0u32; $($rest)*)
    }};
}
