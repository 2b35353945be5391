use std::sync::Arc;
use std::time::Instant;

use super::collector::ResultCollector;
use super::config::ScenarioConfig;
use super::error::Result;
use super::pool::WorkerPool;
use super::probe::EndpointClient;
use super::stats::{Statistics, compute_statistics};

/// What a single scenario run returns.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: Statistics,
    /// False when the run timed out before every unit completed; the
    /// statistics then cover the partial snapshot.
    pub drained: bool,
}

/// Drive one scenario: fan `requests` probes through a pool of
/// `concurrency` workers, wait for drain or timeout, then freeze and
/// summarize whatever the collector received.
pub async fn run_scenario(endpoint: &EndpointClient, cfg: &ScenarioConfig) -> Result<RunReport> {
    cfg.validate()?;

    let pool = WorkerPool::new(cfg.concurrency)?;
    let collector = Arc::new(ResultCollector::with_capacity(cfg.requests as usize));
    let path: Arc<str> = Arc::from(cfg.target_path.as_str());
    let endpoint = endpoint.clone();

    let started = Instant::now();
    let drained = {
        let collector = collector.clone();
        pool.drain(cfg.requests, cfg.run_timeout, move |_unit| {
            let endpoint = endpoint.clone();
            let path = path.clone();
            let collector = collector.clone();
            async move {
                collector.record(endpoint.call(&path).await);
            }
        })
        .await?
    };

    let snapshot = collector.snapshot(started.elapsed());
    Ok(RunReport {
        stats: compute_statistics(&snapshot),
        drained,
    })
}
