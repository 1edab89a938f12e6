//! Fixture runner
//!
//! Runs a test case through setup, body and teardown on a fresh fixture and
//! classifies the result. A body reports by returning a tagged
//! [`PhaseResult`]: an assertion failure, a condition of some declared kind,
//! or success. The case may declare one condition kind as expected, in which
//! case raising it is the pass criterion.
//!
//! Teardown runs on every path once setup has begun, including panics, and
//! each execution owns its fixture outright, so cases can run concurrently
//! without any locking.

mod assert;
mod case;
mod outcome;
mod pattern;
mod runner;
mod signal;
mod suite;

pub use assert::{assert_matches, assert_true, fail, probe_until};
pub use case::{Fixture, Runnable, TestCase};
pub use outcome::{Execution, Outcome, Phase, State};
pub use pattern::Pattern;
pub use runner::{execute, run};
pub use signal::{
    Condition, PhaseResult, Raised, Signal, ASSERTION_KIND, PANIC_KIND, TIMEOUT_KIND,
};
pub use suite::{HostOptions, Suite};
