//! Event-wrapper conformance fixture

use std::fmt;
use std::sync::Arc;

use crate::testing::{assert_matches, assert_true, Fixture, Pattern, PhaseResult, Raised, TestCase};

/// Name the wrapper uses in its textual form
pub const EVENT_TYPE_NAME: &str = "EventObject";

/// An event carrying the object it originated from
#[derive(Debug)]
pub struct EventObject<S> {
    source: Arc<S>,
}

impl<S> EventObject<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }
}

impl<S: fmt::Display> fmt::Display for EventObject<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{EVENT_TYPE_NAME}[source={}]", self.source)
    }
}

/// Opaque source object, rendered by identity
#[derive(Debug, Default)]
pub struct Source;

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source@{:p}", self as *const Self)
    }
}

/// A source object and an event wrapping it
#[derive(Debug, Default)]
pub struct EventFixture {
    source: Option<Arc<Source>>,
    event: Option<EventObject<Source>>,
}

impl EventFixture {
    /// The source object and the event, or an assertion if setup never ran
    pub fn parts(&self) -> Result<(&Arc<Source>, &EventObject<Source>), Raised> {
        match (&self.source, &self.event) {
            (Some(source), Some(event)) => Ok((source, event)),
            _ => Err(Raised::Assertion("event fixture was not set up".to_string())),
        }
    }
}

impl Fixture for EventFixture {
    fn set_up(&mut self) -> PhaseResult {
        let source = Arc::new(Source);
        self.event = Some(EventObject::new(Arc::clone(&source)));
        self.source = Some(source);
        Ok(())
    }

    fn tear_down(&mut self) -> PhaseResult {
        self.event = None;
        self.source = None;
        Ok(())
    }

    fn is_released(&self) -> bool {
        self.source.is_none() && self.event.is_none()
    }
}

pub fn constructed(name: &str) -> TestCase<EventFixture> {
    TestCase::new(name, |fixture: &mut EventFixture| {
        let (_, event) = fixture.parts()?;
        assert_true(
            "event holds a live source",
            Arc::strong_count(event.source()) >= 2,
        )
    })
}

pub fn returns_identical_source(name: &str) -> TestCase<EventFixture> {
    TestCase::new(name, |fixture: &mut EventFixture| {
        let (source, event) = fixture.parts()?;
        assert_true("Wrong source returned", Arc::ptr_eq(event.source(), source))
    })
}

pub fn display_matches(name: &str, pattern: Pattern) -> TestCase<EventFixture> {
    TestCase::new(name, move |fixture: &mut EventFixture| {
        let (_, event) = fixture.parts()?;
        assert_matches("Incorrect display returned", &pattern, &event.to_string())
    })
}

/// Cases contributed to the bundled suite
pub fn cases(display: Pattern) -> Vec<TestCase<EventFixture>> {
    vec![
        constructed("event_object::constructed"),
        returns_identical_source("event_object::returns_identical_source"),
        display_matches("event_object::display_matches_pattern", display),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{execute, run, Outcome};

    #[test]
    fn test_bundled_cases_pass() {
        let pattern = Pattern::parse("glob:EventObject[source=Source@*]").unwrap();
        for case in cases(pattern) {
            let execution = execute(&case);
            assert_eq!(execution.outcome, Outcome::Pass, "{}", case.name());
            assert!(execution.released);
        }
    }

    #[test]
    fn test_display_embeds_source() {
        let source = Arc::new(Source);
        let event = EventObject::new(Arc::clone(&source));
        assert_eq!(event.to_string(), format!("EventObject[source={source}]"));
        assert!(source.to_string().starts_with("Source@0x"));
    }

    #[test]
    fn test_display_pattern_mismatch_fails() {
        let pattern = Pattern::parse("prefix:Event[").unwrap();
        match run(&display_matches("strict", pattern)) {
            Outcome::AssertionFailure { message } => {
                assert!(message.starts_with("Incorrect display returned"));
            }
            other => panic!("Expected assertion failure, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_pattern_against_rendered_source() {
        // The address is only known once the fixture exists, so build the
        // exact pattern inside the body.
        let case = TestCase::new("exact", |fixture: &mut EventFixture| {
            let (source, event) = fixture.parts()?;
            let pattern = Pattern::parse(&format!("exact:EventObject[source={source}]"))
                .map_err(|e| Raised::condition("pattern", e.to_string()))?;
            assert_matches("exact display", &pattern, &event.to_string())
        });
        assert_eq!(run(&case), Outcome::Pass);
    }

    #[test]
    fn test_distinct_source_is_not_identical() {
        let case = TestCase::new("impostor", |fixture: &mut EventFixture| {
            let (_, event) = fixture.parts()?;
            let impostor = Arc::new(Source);
            assert_true("Wrong source returned", Arc::ptr_eq(event.source(), &impostor))
        });
        assert_eq!(
            run(&case),
            Outcome::AssertionFailure {
                message: "Wrong source returned".to_string()
            }
        );
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut fixture = EventFixture::default();
        fixture.set_up().unwrap();
        assert!(!fixture.is_released());
        assert_eq!(fixture.tear_down(), Ok(()));
        assert_eq!(fixture.tear_down(), Ok(()));
        assert!(fixture.is_released());
        assert!(fixture.parts().is_err());
    }
}
