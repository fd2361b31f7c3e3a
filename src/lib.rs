//! # Rust Resumable Routine Library
//!
//! Restep is a small control flow library built around a position addressed
//! state machine: routines that suspend at named points and resume later from
//! exactly that point, driven by a caller owned [`SuspendState`]. Around the
//! core it carries the two constructs that share the same run-on-exit
//! discipline, scope guards and lock scopes, plus the branch hint and early
//! exit sugar they are built from.
//!
//! ## Features
//!
//! * Resumable routines that suspend and resume at dense step ids
//! * O(1) dispatch to the recorded suspension point, never a scan
//! * Cross suspension values live in a caller owned store, not the stack
//! * `defer!` and scope guards that run exactly once on every exit path
//! * Lock scopes over `parking_lot` with blocking, single attempt and
//!   timed acquisition policies
//! * Branch prediction hints and early exit sugar macros
//! * All the constructs are plain functions and macros, no runtime
//!

#![cfg_attr(nightly, feature(core_intrinsics))]
#![cfg_attr(nightly, allow(internal_features))]

#[macro_use]
mod macros;

mod hint;
mod resume;
mod scope;

pub mod sync;

pub use hint::{likely, unlikely};
pub use resume::{Driver, Step, StepId, SuspendState};
pub use scope::{guard, scope, Guard, Scope};
