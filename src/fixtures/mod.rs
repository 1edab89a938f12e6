//! Bundled conformance fixtures
//!
//! Two small suites exercising the runner end to end: an empty-stack probe
//! that passes by raising an expected signal, and an event wrapper checked by
//! identity and by its textual form.

pub mod event;
pub mod stack;

use crate::common::config::FixtureConfig;
use crate::common::Result;
use crate::testing::{Pattern, Suite};

/// Build the bundled suite from configuration
pub fn builtin(config: &FixtureConfig) -> Result<Suite> {
    let display = Pattern::parse(&config.event_display)?;

    let mut suite = Suite::new();
    for case in stack::cases(config.stack_size) {
        suite.add(case);
    }
    for case in event::cases(display) {
        suite.add(case);
    }
    Ok(suite)
}
