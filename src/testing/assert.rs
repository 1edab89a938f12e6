//! Assertion primitives for test bodies
//!
//! Each returns a [`PhaseResult`], so a body chains them with `?` and the first
//! violated expectation becomes the case's `AssertionFailure`.

use super::pattern::Pattern;
use super::signal::{PhaseResult, Raised, Signal};

/// Fail with `message` unless `condition` holds
pub fn assert_true(message: impl Into<String>, condition: bool) -> PhaseResult {
    if condition {
        Ok(())
    } else {
        fail(message)
    }
}

/// Fail unconditionally
pub fn fail(message: impl Into<String>) -> PhaseResult {
    Err(Raised::Assertion(message.into()))
}

/// Fail unless `text` matches `pattern`; the failure message includes the text
pub fn assert_matches(message: &str, pattern: &Pattern, text: &str) -> PhaseResult {
    assert_true(
        format!("{message}: {text:?} does not match {pattern}"),
        pattern.matches(text),
    )
}

/// Retry `op` up to `bound` times and raise the first signal it returns.
///
/// Completing every attempt without a signal returns `Ok(())`; a case that
/// declared the signal then fails with "expected condition not thrown". To
/// probe an edge, pass a bound one past the known capacity.
pub fn probe_until<T, E: Signal>(
    bound: usize,
    mut op: impl FnMut() -> Result<T, E>,
) -> PhaseResult {
    for _ in 0..bound {
        op()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Exhausted;

    impl fmt::Display for Exhausted {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("no more items")
        }
    }

    impl Signal for Exhausted {
        fn kind(&self) -> &'static str {
            "Exhausted"
        }
    }

    fn countdown(mut remaining: usize) -> impl FnMut() -> Result<usize, Exhausted> {
        move || {
            if remaining == 0 {
                return Err(Exhausted);
            }
            remaining -= 1;
            Ok(remaining)
        }
    }

    #[test]
    fn test_assert_true() {
        assert_eq!(assert_true("never shown", true), Ok(()));
        assert_eq!(
            assert_true("Wrong source returned", false),
            Err(Raised::Assertion("Wrong source returned".into()))
        );
    }

    #[test]
    fn test_fail() {
        assert_eq!(fail("stop"), Err(Raised::Assertion("stop".into())));
    }

    #[test]
    fn test_assert_matches_reports_text() {
        let pattern = Pattern::parse("prefix:Event").unwrap();
        assert_eq!(assert_matches("bad display", &pattern, "EventObject"), Ok(()));

        let err = assert_matches("bad display", &pattern, "Other").unwrap_err();
        match err {
            Raised::Assertion(message) => {
                assert!(message.starts_with("bad display: \"Other\""));
                assert!(message.contains("prefix:Event"));
            }
            other => panic!("Expected assertion, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_past_capacity_raises() {
        let mut calls = 0;
        let mut op = countdown(10);
        let result = probe_until(11, || {
            calls += 1;
            op()
        });
        assert_eq!(result, Err(Raised::condition("Exhausted", "no more items")));
        assert_eq!(calls, 11);
    }

    #[test]
    fn test_probe_at_capacity_never_raises() {
        assert_eq!(probe_until(10, countdown(10)), Ok(()));
    }

    #[test]
    fn test_probe_stops_at_first_signal() {
        let mut calls = 0;
        let mut op = countdown(2);
        let result = probe_until(100, || {
            calls += 1;
            op()
        });
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }
}
