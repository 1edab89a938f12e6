//! Fixture runner
//!
//! Drives one test case through setup, body and teardown, and classifies what
//! happened. Every phase is run behind `catch_unwind`, so a panic anywhere is
//! turned into a condition and teardown still runs.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::case::{Fixture, TestCase};
use super::outcome::{Execution, Outcome, Phase, State};
use super::signal::{Condition, PhaseResult, Raised};

/// Run a test case and return only its outcome
pub fn run<F: Fixture>(case: &TestCase<F>) -> Outcome {
    execute(case).outcome
}

/// Run a test case on a fresh fixture and record the full execution
pub fn execute<F: Fixture>(case: &TestCase<F>) -> Execution {
    let started = Instant::now();
    let mut trace = vec![State::Created];

    debug!(case = case.name(), "setting up");
    trace.push(State::SettingUp);

    let mut fixture = match guarded(|| Ok(case.fresh_fixture())) {
        Ok(fixture) => fixture,
        Err(raised) => {
            // No fixture exists, so the trace goes straight to Errored.
            let outcome = Outcome::unexpected(Phase::SetUp, raised.into_condition());
            warn!(case = case.name(), %outcome, "fixture construction failed");
            trace.push(outcome.terminal_state());
            return Execution {
                name: case.name().to_string(),
                outcome,
                trace,
                teardown_error: None,
                released: true,
                elapsed: started.elapsed(),
            };
        }
    };

    let mut outcome = match guarded(|| fixture.set_up()) {
        Err(raised) => {
            let error = raised.into_condition();
            warn!(case = case.name(), %error, "setup raised, skipping body");
            Outcome::unexpected(Phase::SetUp, error)
        }
        Ok(()) => {
            debug!(case = case.name(), "running body");
            trace.push(State::Running);
            let body = guarded(|| case.call_body(&mut fixture));
            classify(case.expects(), body)
        }
    };

    debug!(case = case.name(), "tearing down");
    trace.push(State::TearingDown);

    let mut teardown_error = None;
    if let Err(raised) = guarded(|| fixture.tear_down()) {
        let error = raised.into_condition();
        if outcome.is_pass() {
            outcome = Outcome::unexpected(Phase::TearDown, error.clone());
        } else {
            warn!(case = case.name(), %error, "teardown raised after a failing body");
        }
        teardown_error = Some(error);
    }

    let released = guarded(|| Ok(fixture.is_released())).unwrap_or(false);
    if !released {
        warn!(case = case.name(), "fixture still holds resources after teardown");
    }
    drop(fixture);

    trace.push(outcome.terminal_state());
    let elapsed = started.elapsed();
    info!(case = case.name(), %outcome, elapsed_ms = elapsed.as_millis() as u64, "finished");

    Execution {
        name: case.name().to_string(),
        outcome,
        trace,
        teardown_error,
        released,
        elapsed,
    }
}

/// Map what the body did onto an outcome
fn classify(expects: Option<&str>, body: PhaseResult) -> Outcome {
    match (body, expects) {
        (Ok(()), None) => Outcome::Pass,
        (Ok(()), Some(kind)) => {
            Outcome::assertion(format!("expected condition not thrown: {kind}"))
        }
        (Err(Raised::Assertion(message)), _) => Outcome::assertion(message),
        (Err(Raised::Condition(signal)), Some(kind)) if signal.is_kind(kind) => {
            Outcome::ExpectedFailure { signal }
        }
        (Err(Raised::Condition(error)), _) => Outcome::unexpected(Phase::Body, error),
    }
}

/// Run a phase, turning a panic into a raised condition
fn guarded<T>(phase: impl FnOnce() -> Result<T, Raised>) -> Result<T, Raised> {
    match panic::catch_unwind(AssertUnwindSafe(phase)) {
        Ok(result) => result,
        Err(payload) => Err(Raised::Condition(Condition::from_panic(payload))),
    }
}
