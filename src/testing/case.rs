//! Test case and fixture definitions

use super::outcome::{Execution, Outcome};
use super::runner;
use super::signal::PhaseResult;

/// Per-execution state prepared by setup and released by teardown.
///
/// A fixture value starts uninitialized, is populated in place by
/// [`set_up`](Fixture::set_up), handed to the body, and cleared by
/// [`tear_down`](Fixture::tear_down). Teardown runs even when setup raised
/// halfway, so it must tolerate fields that were never filled, and calling it
/// twice must be harmless.
pub trait Fixture: Send {
    fn set_up(&mut self) -> PhaseResult;

    fn tear_down(&mut self) -> PhaseResult;

    /// True once every owned resource has been dropped
    fn is_released(&self) -> bool;
}

type Factory<F> = dyn Fn() -> F + Send + Sync;
type Body<F> = dyn Fn(&mut F) -> PhaseResult + Send + Sync;

/// A named body bound to a fixture type.
///
/// The case owns a factory rather than a fixture: every execution gets a fresh
/// value, so nothing leaks from one run into the next.
pub struct TestCase<F> {
    name: String,
    expects: Option<&'static str>,
    factory: Box<Factory<F>>,
    body: Box<Body<F>>,
}

impl<F: Fixture + Default + 'static> TestCase<F> {
    /// Create a case whose fixture starts as `F::default()`
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&mut F) -> PhaseResult + Send + Sync + 'static,
    ) -> Self {
        Self::with_fixture(name, F::default, body)
    }
}

impl<F: Fixture> TestCase<F> {
    /// Create a case with an explicit fixture factory
    pub fn with_fixture(
        name: impl Into<String>,
        factory: impl Fn() -> F + Send + Sync + 'static,
        body: impl Fn(&mut F) -> PhaseResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            expects: None,
            factory: Box::new(factory),
            body: Box::new(body),
        }
    }

    /// Declare the condition kind whose occurrence is this case's success
    pub fn expecting(mut self, kind: &'static str) -> Self {
        self.expects = Some(kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expects(&self) -> Option<&'static str> {
        self.expects
    }

    pub(crate) fn fresh_fixture(&self) -> F {
        (self.factory)()
    }

    pub(crate) fn call_body(&self, fixture: &mut F) -> PhaseResult {
        (self.body)(fixture)
    }
}

impl<F> std::fmt::Debug for TestCase<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("expects", &self.expects)
            .finish_non_exhaustive()
    }
}

/// A test case with its fixture type erased, so cases over different fixtures
/// can share one suite.
pub trait Runnable: Send + Sync {
    fn name(&self) -> &str;

    fn execute(&self) -> Execution;

    fn run(&self) -> Outcome {
        self.execute().outcome
    }
}

impl<F: Fixture> Runnable for TestCase<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Execution {
        runner::execute(self)
    }
}
