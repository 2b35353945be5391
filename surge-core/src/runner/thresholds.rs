use super::config::SlaThresholds;
use super::degradation::DegradationReport;
use super::stats::Statistics;

/// Pass/fail outcome of grading statistics against SLA bounds.
///
/// Every failed check contributes one violation; evaluation never stops
/// at the first failure, so callers see the full picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaVerdict {
    pub passed: bool,
    pub violations: Vec<String>,
}

impl SlaVerdict {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
        }
    }
}

/// Grade a single run's statistics: success ratio, error ratio, average
/// latency, in that order.
#[must_use]
pub fn validate_run(stats: &Statistics, sla: &SlaThresholds) -> SlaVerdict {
    SlaVerdict::from_violations(run_violations(stats, sla))
}

fn run_violations(stats: &Statistics, sla: &SlaThresholds) -> Vec<String> {
    let mut violations = Vec::new();

    let required = ((stats.total as f64) * sla.success_ratio).ceil() as u64;
    if stats.success_count < required {
        violations.push(format!(
            "success ratio below {:.2}: {}/{} requests succeeded (need at least {required})",
            sla.success_ratio, stats.success_count, stats.total
        ));
    }

    // Inclusive at the boundary: with success_count + error_count == total,
    // a strict check here would contradict the success check above.
    let allowed_errors = (stats.total as f64) * sla.error_ratio;
    if (stats.error_count as f64) > allowed_errors {
        violations.push(format!(
            "error ratio above {:.2}: {}/{} requests failed",
            sla.error_ratio, stats.error_count, stats.total
        ));
    }

    if stats.avg_ms >= sla.avg_ms {
        violations.push(format!(
            "average latency {:.1}ms is not below {:.1}ms",
            stats.avg_ms, sla.avg_ms
        ));
    }

    violations
}

/// Grade a ramp: the run checks apply to the final (highest-load) level,
/// then the slowdown across levels is bounded.
#[must_use]
pub fn validate_ramp(report: &DegradationReport, sla: &SlaThresholds) -> SlaVerdict {
    let mut violations = report
        .levels
        .last()
        .map_or_else(Vec::new, |last| run_violations(&last.stats, sla));

    if report.degradation_pct >= sla.degradation_pct {
        violations.push(format!(
            "degradation {:.2}% is not below {:.2}%",
            report.degradation_pct, sla.degradation_pct
        ));
    }

    SlaVerdict::from_violations(violations)
}
