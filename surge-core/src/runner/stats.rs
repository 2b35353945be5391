use hdrhistogram::Histogram;

use super::collector::ResultSnapshot;

/// Summary statistics derived from a frozen [`ResultSnapshot`].
///
/// A value object: computing it twice over the same snapshot yields an
/// identical value.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: f64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
    pub wall_clock_ms: u64,
    /// Requests per second over the run's wall-clock span. Individual
    /// latencies overlap under concurrency, so their sum is not the span.
    pub throughput_per_sec: f64,
}

impl Statistics {
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total: 0,
            success_count: 0,
            error_count: 0,
            min_ms: 0,
            max_ms: 0,
            avg_ms: 0.0,
            p50_ms: 0,
            p90_ms: 0,
            p99_ms: 0,
            wall_clock_ms: 0,
            throughput_per_sec: 0.0,
        }
    }
}

fn new_latency_histogram() -> Histogram<u64> {
    // Track up to 1h in milliseconds (with 3 sigfigs).
    Histogram::<u64>::new_with_bounds(1, 3_600_000, 3)
        .unwrap_or_else(|err| panic!("failed to init histogram: {err}"))
}

/// Single pass over a snapshot's outcomes.
///
/// An empty snapshot (or one with no successes) yields zeroed latency
/// fields rather than an error, and a zero wall-clock span yields zero
/// throughput.
#[must_use]
pub fn compute_statistics(snapshot: &ResultSnapshot) -> Statistics {
    let mut success_count = 0u64;
    let mut error_count = 0u64;
    let mut min_ms = u64::MAX;
    let mut max_ms = 0u64;
    let mut sum_ms = 0u64;
    let mut hist = new_latency_histogram();

    for outcome in snapshot.outcomes() {
        if !outcome.ok {
            error_count += 1;
            continue;
        }

        success_count += 1;
        min_ms = min_ms.min(outcome.elapsed_ms);
        max_ms = max_ms.max(outcome.elapsed_ms);
        sum_ms = sum_ms.saturating_add(outcome.elapsed_ms);
        if outcome.elapsed_ms != 0 {
            let _ = hist.record(outcome.elapsed_ms);
        }
    }

    let total = success_count + error_count;

    let (min_ms, avg_ms) = if success_count == 0 {
        (0, 0.0)
    } else {
        (min_ms, (sum_ms as f64) / (success_count as f64))
    };

    let (p50_ms, p90_ms, p99_ms) = if hist.is_empty() {
        (0, 0, 0)
    } else {
        (
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.90),
            hist.value_at_quantile(0.99),
        )
    };

    let wall_clock_ms = snapshot.wall_clock().as_millis() as u64;
    let throughput_per_sec = if wall_clock_ms == 0 {
        0.0
    } else {
        (total as f64) * 1000.0 / (wall_clock_ms as f64)
    };

    Statistics {
        total,
        success_count,
        error_count,
        min_ms,
        max_ms,
        avg_ms,
        p50_ms,
        p90_ms,
        p99_ms,
        wall_clock_ms,
        throughput_per_sec,
    }
}
