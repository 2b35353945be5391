use std::sync::Mutex;
use std::time::Duration;

/// Outcome of one unit of work: a single probe against the target.
/// Produced exactly once per dispatched unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub ok: bool,
    /// Elapsed time of the probe in milliseconds. Meaningless when `ok`
    /// is false.
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl RequestOutcome {
    #[must_use]
    pub fn success(elapsed: Duration) -> Self {
        Self {
            ok: true,
            elapsed_ms: elapsed.as_millis() as u64,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            elapsed_ms: 0,
            error: Some(error.into()),
        }
    }
}

/// Frozen view of a run's accumulated outcomes plus the wall-clock span
/// of the run that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSnapshot {
    outcomes: Vec<RequestOutcome>,
    wall_clock: Duration,
}

impl ResultSnapshot {
    #[must_use]
    pub fn new(outcomes: Vec<RequestOutcome>, wall_clock: Duration) -> Self {
        Self {
            outcomes,
            wall_clock,
        }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[RequestOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn wall_clock(&self) -> Duration {
        self.wall_clock
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[derive(Debug, Default)]
struct CollectorInner {
    outcomes: Vec<RequestOutcome>,
    sealed: bool,
}

/// Thread-safe append-only accumulator shared by a run's workers.
///
/// `record` and `snapshot` are the only two operations; the underlying
/// storage is never handed out. `snapshot` seals the collector, so an
/// outcome arriving after it (a probe that outlived the run timeout) is
/// discarded — each run's results are consumed at most once.
#[derive(Debug, Default)]
pub struct ResultCollector {
    inner: Mutex<CollectorInner>,
}

impl ResultCollector {
    #[must_use]
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            inner: Mutex::new(CollectorInner {
                outcomes: Vec::with_capacity(expected),
                sealed: false,
            }),
        }
    }

    pub fn record(&self, outcome: RequestOutcome) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if inner.sealed {
            return;
        }
        inner.outcomes.push(outcome);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .outcomes
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal the collector and copy out whatever has arrived. Fewer
    /// outcomes than dispatched units (the timeout case) is a legitimate
    /// state, not an error.
    #[must_use]
    pub fn snapshot(&self, wall_clock: Duration) -> ResultSnapshot {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.sealed = true;
        ResultSnapshot::new(inner.outcomes.clone(), wall_clock)
    }
}
