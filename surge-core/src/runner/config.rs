use std::time::Duration;

use super::error::{Error, Result};

/// One benchmark scenario: how many probes to send, how many may be in
/// flight at once, and what counts as a success.
///
/// Immutable once a run starts; each run owns its own pool and collector,
/// so scenarios can be sequenced or parallelized freely by the caller.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub requests: u64,
    pub concurrency: u64,

    /// Request path probed on the target, e.g. `/api/v1/clients`.
    pub target_path: String,

    /// Upper bound for the whole run. Probes still in flight when it
    /// elapses are abandoned (but not interrupted).
    pub run_timeout: Duration,

    pub success_status: u16,
}

impl ScenarioConfig {
    /// One request per simulated user at the given concurrency level.
    #[must_use]
    pub fn per_user(
        level: u64,
        target_path: &str,
        run_timeout: Duration,
        success_status: u16,
    ) -> Self {
        Self {
            requests: level,
            concurrency: level,
            target_path: target_path.to_string(),
            run_timeout,
            success_status,
        }
    }

    /// Configuration misuse is rejected here, before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.requests == 0 {
            return Err(Error::InvalidRequests);
        }
        if self.concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }
        if self.run_timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        Ok(())
    }
}

/// Degradation analysis plan: the same target probed at increasing
/// concurrency levels, one request per simulated user per level.
#[derive(Debug, Clone)]
pub struct RampConfig {
    /// Concurrency levels, lowest first. The report compares the first
    /// against the last entry.
    pub levels: Vec<u64>,
    pub target_path: String,
    /// Per-level run timeout; every level gets the full budget.
    pub run_timeout: Duration,
    pub success_status: u16,
}

impl RampConfig {
    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() || self.levels.iter().any(|&level| level == 0) {
            return Err(Error::InvalidLevels);
        }
        if self.run_timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        Ok(())
    }
}

/// SLA bounds a run's statistics must satisfy.
///
/// The defaults are deliberately loose bounds for runs under heavy load;
/// operators are expected to tighten them per target.
#[derive(Debug, Clone)]
pub struct SlaThresholds {
    /// Minimum fraction of requests that must succeed.
    pub success_ratio: f64,
    /// Maximum fraction of requests that may fail.
    pub error_ratio: f64,
    /// Maximum acceptable average latency in milliseconds.
    pub avg_ms: f64,
    /// Maximum acceptable slowdown between the lowest and highest ramp
    /// levels, in percent.
    pub degradation_pct: f64,
}

impl Default for SlaThresholds {
    fn default() -> Self {
        Self {
            success_ratio: 0.95,
            error_ratio: 0.05,
            avg_ms: 10_000.0,
            degradation_pct: 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ScenarioConfig {
        ScenarioConfig {
            requests: 10,
            concurrency: 2,
            target_path: "/hello".to_string(),
            run_timeout: Duration::from_secs(30),
            success_status: 200,
        }
    }

    #[test]
    fn validate_rejects_zero_requests() {
        let cfg = ScenarioConfig {
            requests: 0,
            ..scenario()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidRequests)));
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let cfg = ScenarioConfig {
            concurrency: 0,
            ..scenario()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConcurrency)));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = ScenarioConfig {
            run_timeout: Duration::ZERO,
            ..scenario()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidTimeout)));
    }

    #[test]
    fn per_user_issues_one_request_per_simulated_user() {
        let cfg = ScenarioConfig::per_user(25, "/hello", Duration::from_secs(30), 200);
        assert_eq!(cfg.requests, 25);
        assert_eq!(cfg.concurrency, 25);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn ramp_rejects_empty_and_zero_levels() {
        let cfg = RampConfig {
            levels: Vec::new(),
            target_path: "/hello".to_string(),
            run_timeout: Duration::from_secs(30),
            success_status: 200,
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidLevels)));

        let cfg = RampConfig {
            levels: vec![1, 0, 10],
            ..cfg
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidLevels)));
    }
}
