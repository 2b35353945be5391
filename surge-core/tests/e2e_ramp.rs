use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use surge_core::runner::{self, EndpointClient, RampConfig, SlaThresholds};
use surge_core::{ClientConfig, HttpClient};
use surge_testserver::{PATH_HELLO, PATH_SLOW, TestServer};

fn endpoint(server: &TestServer) -> EndpointClient {
    let client = Arc::new(HttpClient::new(&ClientConfig::default()));
    EndpointClient::new(client, server.base_url(), 200, None)
}

#[tokio::test(flavor = "multi_thread")]
async fn ramp_runs_every_level_independently() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let endpoint = endpoint(&server);

    let cfg = RampConfig {
        levels: vec![1, 5, 10],
        target_path: PATH_HELLO.to_string(),
        run_timeout: Duration::from_secs(30),
        success_status: 200,
    };

    let report = runner::run_ramp(&endpoint, &cfg).await?;

    let server_seen = server.stats().requests_total();
    server.shutdown().await;

    anyhow::ensure!(report.levels.len() == 3, "levels={}", report.levels.len());
    for (expected, level) in cfg.levels.iter().zip(&report.levels) {
        anyhow::ensure!(level.concurrency == *expected);
        anyhow::ensure!(level.drained, "level {} timed out", level.concurrency);
        anyhow::ensure!(
            level.stats.total == *expected,
            "level {}: total={}",
            level.concurrency,
            level.stats.total
        );
    }
    anyhow::ensure!(
        report.degradation_pct.is_finite(),
        "degradation={}",
        report.degradation_pct
    );
    anyhow::ensure!(server_seen == 16, "server saw {server_seen} requests");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn constant_latency_target_shows_no_meaningful_degradation() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let endpoint = endpoint(&server);

    // The target sleeps a fixed 40ms regardless of load, so the averages
    // per level only differ by scheduling noise. The generous bound keeps
    // the assertion meaningful (a serialization bug would multiply the
    // high-load average) without flaking on a busy machine.
    let cfg = RampConfig {
        levels: vec![1, 2, 4],
        target_path: format!("{PATH_SLOW}?ms=40"),
        run_timeout: Duration::from_secs(30),
        success_status: 200,
    };

    let report = runner::run_ramp(&endpoint, &cfg).await?;

    server.shutdown().await;

    for level in &report.levels {
        anyhow::ensure!(
            level.stats.success_count == level.concurrency,
            "level {}: success={}",
            level.concurrency,
            level.stats.success_count
        );
    }
    anyhow::ensure!(
        report.degradation_pct.abs() < 100.0,
        "expected near-constant latency across levels, degradation={:.2}%",
        report.degradation_pct
    );

    let verdict = runner::validate_ramp(&report, &SlaThresholds::default());
    anyhow::ensure!(verdict.passed, "violations: {:?}", verdict.violations);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_level_list_is_rejected_before_any_probe() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let endpoint = endpoint(&server);

    let cfg = RampConfig {
        levels: Vec::new(),
        target_path: PATH_HELLO.to_string(),
        run_timeout: Duration::from_secs(30),
        success_status: 200,
    };

    let err = match runner::run_ramp(&endpoint, &cfg).await {
        Ok(_) => anyhow::bail!("expected an invalid-levels error"),
        Err(err) => err,
    };
    anyhow::ensure!(matches!(err, runner::Error::InvalidLevels));

    let server_seen = server.stats().requests_total();
    server.shutdown().await;
    anyhow::ensure!(server_seen == 0, "server saw {server_seen} requests");
    Ok(())
}
