use super::config::{RampConfig, ScenarioConfig};
use super::error::Result;
use super::probe::EndpointClient;
use super::run::run_scenario;
use super::stats::Statistics;

/// Statistics observed at one concurrency level of a ramp.
#[derive(Debug, Clone)]
pub struct LevelReport {
    pub concurrency: u64,
    pub drained: bool,
    pub stats: Statistics,
}

/// Ordered per-level results plus the relative slowdown between the
/// first and last level.
#[derive(Debug, Clone)]
pub struct DegradationReport {
    pub levels: Vec<LevelReport>,
    pub degradation_pct: f64,
}

/// Relative slowdown in percent between a baseline and a high-load
/// average latency. A zero baseline leaves nothing to compare against,
/// so the slowdown is defined as 0 instead of dividing by zero.
#[must_use]
pub fn degradation_between(baseline_avg_ms: f64, high_load_avg_ms: f64) -> f64 {
    if baseline_avg_ms <= 0.0 {
        return 0.0;
    }
    (high_load_avg_ms - baseline_avg_ms) * 100.0 / baseline_avg_ms
}

/// Run the full pipeline once per concurrency level, one request per
/// simulated user. Every level gets a fresh pool and collector, so a
/// slow level cannot corrupt the measurement of another.
pub async fn run_ramp(endpoint: &EndpointClient, cfg: &RampConfig) -> Result<DegradationReport> {
    cfg.validate()?;

    let mut levels = Vec::with_capacity(cfg.levels.len());
    for &level in &cfg.levels {
        let scenario =
            ScenarioConfig::per_user(level, &cfg.target_path, cfg.run_timeout, cfg.success_status);
        let report = run_scenario(endpoint, &scenario).await?;
        levels.push(LevelReport {
            concurrency: level,
            drained: report.drained,
            stats: report.stats,
        });
    }

    let baseline = levels.first().map_or(0.0, |l| l.stats.avg_ms);
    let high_load = levels.last().map_or(0.0, |l| l.stats.avg_ms);

    Ok(DegradationReport {
        degradation_pct: degradation_between(baseline, high_load),
        levels,
    })
}
