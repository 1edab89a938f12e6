//! Suite host
//!
//! Holds many cases and runs them either one after another or concurrently on
//! tokio's blocking pool. Cases never share fixtures, so concurrent execution
//! needs no locking; the host only bounds how many run at once and, when
//! asked, how long each may take.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use super::case::{Fixture, Runnable, TestCase};
use super::outcome::{Execution, Outcome, Phase, State};
use super::signal::{Condition, TIMEOUT_KIND};
use crate::common::{Error, Result};

/// Options for concurrent execution
#[derive(Debug, Clone, Copy)]
pub struct HostOptions {
    /// Maximum number of cases running at once
    pub jobs: usize,
    /// Per-case deadline; an expired case is reported as a timeout
    pub deadline: Option<Duration>,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            jobs: 4,
            deadline: None,
        }
    }
}

/// An ordered collection of test cases
#[derive(Default, Clone)]
pub struct Suite {
    cases: Vec<Arc<dyn Runnable>>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: Fixture + 'static>(&mut self, case: TestCase<F>) -> &mut Self {
        self.cases.push(Arc::new(case));
        self
    }

    pub fn extend(&mut self, other: Suite) {
        self.cases.extend(other.cases);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.name())
    }

    /// Keep only cases whose name contains `filter`
    pub fn filtered(&self, filter: &str) -> Result<Suite> {
        let cases: Vec<_> = self
            .cases
            .iter()
            .filter(|case| case.name().contains(filter))
            .cloned()
            .collect();
        if cases.is_empty() {
            return Err(Error::NoMatchingCases(filter.to_string()));
        }
        Ok(Suite { cases })
    }

    /// Run every case on the calling thread, in registration order
    pub fn run_sequential(&self) -> Vec<Execution> {
        self.cases.iter().map(|case| case.execute()).collect()
    }

    /// Run cases concurrently; results keep registration order
    pub async fn run_parallel(&self, options: HostOptions) -> Result<Vec<Execution>> {
        let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));
        let mut handles = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            let case = Arc::clone(case);
            let semaphore = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Internal(e.to_string()))?;
                run_hosted(case, permit, options.deadline).await
            }));
        }

        let mut executions = Vec::with_capacity(handles.len());
        for handle in handles {
            let execution = handle
                .await
                .map_err(|e| Error::Internal(format!("suite task failed: {e}")))??;
            executions.push(execution);
        }
        Ok(executions)
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Run one case on the blocking pool.
///
/// The permit moves into the worker closure, so a job slot stays taken until
/// the worker has torn its fixture down, even after the host gave up waiting.
async fn run_hosted(
    case: Arc<dyn Runnable>,
    permit: OwnedSemaphorePermit,
    deadline: Option<Duration>,
) -> Result<Execution> {
    let name = case.name().to_string();
    let started = Instant::now();
    debug!(case = %name, "dispatching to worker");

    let mut worker = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        case.execute()
    });
    let joined = match deadline {
        None => worker.await,
        Some(limit) => {
            let waited = tokio::time::timeout(limit, &mut worker).await;
            match waited {
                Ok(joined) => joined,
                Err(_) => {
                    warn!(case = %name, deadline_ms = limit.as_millis() as u64, "deadline expired");
                    tokio::spawn(report_late(name.clone(), worker));
                    return Ok(timed_out(name, limit, started.elapsed()));
                }
            }
        }
    };
    joined.map_err(|e| Error::worker_failed(&name, e))
}

/// Log what a timed-out worker did once it finally returns
async fn report_late(name: String, worker: tokio::task::JoinHandle<Execution>) {
    match worker.await {
        Ok(late) if late.released => {
            debug!(case = %name, outcome = %late.outcome, "timed-out worker finished");
        }
        Ok(late) => {
            warn!(
                case = %name,
                outcome = %late.outcome,
                "timed-out worker left its fixture unreleased"
            );
        }
        Err(e) => warn!(case = %name, error = %e, "timed-out worker failed"),
    }
}

/// Host-side record for an expired deadline; see [`Execution`] for why the
/// trace is short and `released` is false
fn timed_out(name: String, limit: Duration, elapsed: Duration) -> Execution {
    let error = Condition::new(
        TIMEOUT_KIND,
        format!("exceeded deadline of {} ms", limit.as_millis()),
    );
    Execution {
        name,
        outcome: Outcome::UnexpectedFailure {
            phase: Phase::Body,
            error,
        },
        trace: vec![State::Created, State::Errored],
        teardown_error: None,
        released: false,
        elapsed,
    }
}
