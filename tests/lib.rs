use std::cell::Cell;
use std::time::Duration;

use restep::sync::Mutex;
use restep::*;

#[test]
fn counter_scenario() {
    fn counter(state: &mut SuspendState, n: &mut u32) -> Step<u32> {
        resume!(state => {
            { *n = 1; } suspend *n;
            { *n += 1; } suspend *n;
            { *n += 1; } suspend *n;
        })
    }

    let mut state = SuspendState::new();
    let mut n = 0;
    assert_eq!(counter(&mut state, &mut n).suspended(), Some(1));
    assert_eq!(counter(&mut state, &mut n).suspended(), Some(2));
    assert_eq!(counter(&mut state, &mut n).suspended(), Some(3));
    // completion is sticky: the fourth call and every one after it
    // reports completion without running the routine again
    assert!(counter(&mut state, &mut n).is_complete());
    assert!(counter(&mut state, &mut n).is_complete());
    assert_eq!(n, 3);

    // reset is the explicit way to run from the top again
    state.reset();
    assert_eq!(counter(&mut state, &mut n).suspended(), Some(1));
}

#[derive(Default)]
struct TransferStore {
    chunks: Vec<&'static str>,
    assembled: String,
    flushed: bool,
}

fn transfer(state: &mut SuspendState, store: &mut TransferStore) -> Step<usize> {
    resume!(state => {
        {
            store.chunks = vec!["he", "llo", ", world"];
        } suspend store.chunks.len();
        {
            store.assembled = store.chunks.concat();
        } suspend store.assembled.len();
        done {
            store.flushed = true;
        }
    })
}

#[test]
fn routine_keeps_locals_in_the_store() {
    let mut state = SuspendState::new();
    let mut store = TransferStore::default();

    assert_eq!(transfer(&mut state, &mut store).suspended(), Some(3));
    // the routine is paused, the caller is free to look at the store
    assert_eq!(store.chunks.len(), 3);
    assert!(!store.flushed);

    assert_eq!(transfer(&mut state, &mut store).suspended(), Some(12));
    assert_eq!(store.assembled, "hello, world");

    assert!(transfer(&mut state, &mut store).is_complete());
    assert!(store.flushed);
}

#[test]
fn state_hands_off_between_threads_sequentially() {
    // one logical driver at a time, but that driver may change threads
    let mut state = SuspendState::new();
    let mut store = TransferStore::default();

    let (mut state, mut store) = std::thread::spawn(move || {
        assert_eq!(transfer(&mut state, &mut store).suspended(), Some(3));
        (state, store)
    })
    .join()
    .unwrap();

    assert_eq!(transfer(&mut state, &mut store).suspended(), Some(12));
    assert!(transfer(&mut state, &mut store).is_complete());
}

#[test]
fn driver_runs_a_routine_to_completion() {
    let driver = Driver::new(TransferStore::default(), transfer);
    let sizes: Vec<_> = driver.collect();
    assert_eq!(sizes, [3, 12]);
}

#[test]
fn lock_scope_with_deferred_cleanup_inside() {
    let m = Mutex::new(Vec::new());
    let order = Cell::new(0);

    sync::synchronized(&m, |v| {
        defer!({
            // cleanup registered inside the body runs while the lock is
            // still held
            assert!(m.is_locked());
            order.set(order.get() + 1);
        });
        v.push(1);
    });

    assert_eq!(order.get(), 1);
    assert!(!m.is_locked());
}

#[test]
fn lock_macros_cover_the_three_policies() {
    let m = Mutex::new(0);

    synchronized!(&m, |n| *n += 1);
    assert_eq!(*m.lock(), 1);

    let hit = try_synchronized!(&m, |n| { *n += 1; true }, else false);
    assert!(hit);
    assert_eq!(*m.lock(), 2);

    let hit = timed_synchronized!(&m, Duration::from_millis(5), |n| { *n += 1; true }, else false);
    assert!(hit);
    assert_eq!(*m.lock(), 3);

    // the else arms fire when the lock is already held
    let guard = m.lock();
    let hit = try_synchronized!(&m, |_| true, else false);
    assert!(!hit);
    let hit = timed_synchronized!(&m, Duration::ZERO, |_| true, else false);
    assert!(!hit);
    drop(guard);
}

#[test]
fn early_exit_sugar() {
    fn pick(v: i32) -> i32 {
        return_if!(v < 0, -1);
        return_if_not!(v < 100, 100);
        return_if_fail!(v != 13, 0);
        v
    }

    assert_eq!(pick(-5), -1);
    assert_eq!(pick(200), 100);
    assert_eq!(pick(13), 0);
    assert_eq!(pick(42), 42);

    let mut evens = Vec::new();
    for i in 0..20 {
        continue_if!(i % 2 == 1);
        break_if!(i > 8);
        evens.push(i);
    }
    assert_eq!(evens, [0, 2, 4, 6, 8]);
}

#[test]
fn labelled_sugar_exits_outer_loops() {
    let mut seen = Vec::new();
    'outer: for i in 0..5 {
        for j in 0..5 {
            continue_if!('outer, j > i);
            break_if!('outer, i + j == 6);
            seen.push((i, j));
        }
    }
    assert_eq!(seen, [(0, 0), (1, 0), (1, 1), (2, 0), (2, 1), (2, 2), (3, 0), (3, 1), (3, 2)]);
}

#[test]
fn should_otherwise_branches() {
    let mut status = "ok";
    should!(1 + 1 == 2, otherwise { status = "broken"; });
    assert_eq!(status, "ok");

    should!(1 + 1 == 3, otherwise { status = "broken"; });
    assert_eq!(status, "broken");
}

#[test]
fn hints_are_transparent() {
    assert!(likely(true));
    assert!(!likely(false));
    assert!(unlikely(true));
    assert!(!unlikely(false));
}

#[test]
fn guard_and_lock_share_the_exit_discipline() {
    // a guard carrying a value and a lock scope both release on the
    // early return path
    fn bail(m: &Mutex<u32>, flag: &Cell<bool>) -> u32 {
        sync::synchronized(m, |n| {
            let _g = guard((), |_| flag.set(true));
            if *n == 0 {
                return 0;
            }
            *n
        })
    }

    let m = Mutex::new(0);
    let flag = Cell::new(false);
    assert_eq!(bail(&m, &flag), 0);
    assert!(flag.get());
    assert!(!m.is_locked());
}
