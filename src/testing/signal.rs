//! Raised conditions
//!
//! A phase (setup, body, teardown) either completes or raises. What it raises
//! is a tagged value: an assertion failure carrying its message, or a
//! [`Condition`] carrying the kind declared by whatever produced it. The runner
//! matches on that kind; it never inspects arbitrary error objects.

use std::any::Any;
use std::fmt;

use serde::Serialize;

/// Kind recorded for a panic caught at a phase boundary
pub const PANIC_KIND: &str = "panic";

/// Kind recorded when a host deadline expires
pub const TIMEOUT_KIND: &str = "timeout";

/// Kind recorded for an assertion raised outside the body
pub const ASSERTION_KIND: &str = "assertion";

/// Result of running one lifecycle phase
pub type PhaseResult = std::result::Result<(), Raised>;

/// An error type that a unit under test can raise from a test body.
///
/// `kind` is the stable identity a test case declares when it expects the
/// condition. Any `Signal` converts into [`Raised`], so bodies can use `?`.
pub trait Signal: fmt::Display {
    fn kind(&self) -> &'static str;
}

/// A raised condition with its identity and message intact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub kind: String,
    pub message: String,
}

impl Condition {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Build a condition from a `catch_unwind` payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::new(PANIC_KIND, message)
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// What a phase raised instead of completing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raised {
    /// An explicit assertion evaluated false
    Assertion(String),
    /// Any other condition, expected or not
    Condition(Condition),
}

impl Raised {
    pub fn condition(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Condition(Condition::new(kind, message))
    }

    /// Flatten into a condition, for phases where an assertion is not a
    /// meaningful verdict (setup and teardown)
    pub fn into_condition(self) -> Condition {
        match self {
            Raised::Assertion(message) => Condition::new(ASSERTION_KIND, message),
            Raised::Condition(condition) => condition,
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Assertion(message) => write!(f, "assertion failed: {message}"),
            Raised::Condition(condition) => fmt::Display::fmt(condition, f),
        }
    }
}

impl<S: Signal> From<S> for Raised {
    fn from(signal: S) -> Self {
        Raised::Condition(Condition::new(signal.kind(), signal.to_string()))
    }
}
