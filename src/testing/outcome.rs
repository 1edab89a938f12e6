//! Outcome and lifecycle state types

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::signal::Condition;

/// Lifecycle phase that raised a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SetUp,
    Body,
    TearDown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::SetUp => "setup",
            Phase::Body => "body",
            Phase::TearDown => "teardown",
        };
        f.write_str(s)
    }
}

/// Lifecycle state of one execution
///
/// `Created -> SettingUp -> Running -> TearingDown -> {Passed | Failed | Errored}`.
/// `Running` is skipped when setup raises. `TearingDown` is skipped only when
/// the fixture factory itself panicked, since then there is no fixture to
/// tear down: the trace is `[Created, SettingUp, Errored]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Created,
    SettingUp,
    Running,
    TearingDown,
    Passed,
    Failed,
    Errored,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Passed | State::Failed | State::Errored)
    }
}

/// Classified result of one execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Body completed and nothing was expected to be raised
    Pass,
    /// Body raised exactly the condition the case declared; this is a pass
    ExpectedFailure { signal: Condition },
    /// Something raised a condition nobody declared
    UnexpectedFailure { phase: Phase, error: Condition },
    /// An assertion was violated or a declared condition never occurred
    AssertionFailure { message: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass | Outcome::ExpectedFailure { .. })
    }

    /// Terminal lifecycle state this outcome leads to
    pub fn terminal_state(&self) -> State {
        match self {
            Outcome::Pass | Outcome::ExpectedFailure { .. } => State::Passed,
            Outcome::AssertionFailure { .. } => State::Failed,
            Outcome::UnexpectedFailure { .. } => State::Errored,
        }
    }

    pub(crate) fn unexpected(phase: Phase, error: Condition) -> Self {
        Outcome::UnexpectedFailure { phase, error }
    }

    pub(crate) fn assertion(message: impl Into<String>) -> Self {
        Outcome::AssertionFailure {
            message: message.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "passed"),
            Outcome::ExpectedFailure { signal } => {
                write!(f, "passed (raised expected {})", signal.kind)
            }
            Outcome::UnexpectedFailure { phase, error } => {
                write!(f, "error in {phase}: {error}")
            }
            Outcome::AssertionFailure { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Everything recorded about one execution
///
/// Normally the record comes from the worker that drove the lifecycle. When a
/// suite deadline expires, the host writes the record instead, before the
/// worker is done: its trace is the host-side `[Created, Errored]` (the host
/// never observes the worker's phases) and `released` is false because release
/// is not yet known. The worker still finishes and tears down afterwards, and
/// its late result is only logged.
#[derive(Debug, Clone, Serialize)]
pub struct Execution {
    pub name: String,
    pub outcome: Outcome,
    /// States visited, in order, ending with the terminal state
    pub trace: Vec<State>,
    /// Teardown failure, kept even when it did not decide the outcome
    pub teardown_error: Option<Condition>,
    /// Whether the fixture reported itself released after teardown; true when
    /// no fixture was ever built
    pub released: bool,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

impl Execution {
    pub fn state(&self) -> State {
        self.trace
            .last()
            .copied()
            .unwrap_or(State::Created)
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_pass()
    }
}

fn serialize_millis<S: serde::Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_failure_counts_as_pass() {
        let outcome = Outcome::ExpectedFailure {
            signal: Condition::new("EmptyStack", "stack is empty"),
        };
        assert!(outcome.is_pass());
        assert_eq!(outcome.terminal_state(), State::Passed);
    }

    #[test]
    fn test_terminal_states() {
        assert_eq!(
            Outcome::assertion("nope").terminal_state(),
            State::Failed
        );
        assert_eq!(
            Outcome::unexpected(Phase::Body, Condition::new("panic", "x")).terminal_state(),
            State::Errored
        );
        assert!(State::Errored.is_terminal());
        assert!(!State::TearingDown.is_terminal());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(Outcome::unexpected(
            Phase::SetUp,
            Condition::new("panic", "bad input"),
        ))
        .unwrap();
        assert_eq!(json["status"], "unexpected_failure");
        assert_eq!(json["phase"], "set_up");
        assert_eq!(json["error"]["kind"], "panic");
    }
}
