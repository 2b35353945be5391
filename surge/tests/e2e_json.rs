use std::process::Command;

use anyhow::Context as _;
use serde::Deserialize;
use surge_testserver::TestServer;

#[derive(Debug, Deserialize)]
struct JsonStats {
    total: u64,
    success_count: u64,
    error_count: u64,
    min_ms: u64,
    max_ms: u64,
    avg_ms: f64,
    throughput_per_sec: f64,
}

#[derive(Debug, Deserialize)]
struct JsonVerdict {
    passed: bool,
    violations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JsonRunLine {
    kind: String,
    drained: bool,
    stats: JsonStats,
    sla: JsonVerdict,
}

#[derive(Debug, Deserialize)]
struct JsonLevel {
    concurrency: u64,
    stats: JsonStats,
}

#[derive(Debug, Deserialize)]
struct JsonRampLine {
    kind: String,
    levels: Vec<JsonLevel>,
    degradation_pct: f64,
    sla: JsonVerdict,
}

async fn run_surge(args: Vec<String>) -> anyhow::Result<std::process::Output> {
    let exe = env!("CARGO_BIN_EXE_surge");
    tokio::task::spawn_blocking(move || Command::new(exe).args(&args).output())
        .await
        .context("spawn_blocking join")?
        .context("run surge binary")
}

fn single_json_line(stdout: &str) -> anyhow::Result<&str> {
    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());
    let line = lines.next().context("expected a json line on stdout")?;
    anyhow::ensure!(
        lines.next().is_none(),
        "expected exactly one json line\nstdout:\n{stdout}"
    );
    Ok(line)
}

#[tokio::test]
async fn e2e_run_json_summary_matches_server_observed_totals() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let base_url = server.base_url().to_string();

    let output = run_surge(vec![
        "run".into(),
        base_url,
        "--path".into(),
        "/hello".into(),
        "--requests".into(),
        "30".into(),
        "--concurrency".into(),
        "10".into(),
        "--output".into(),
        "json".into(),
    ])
    .await?;

    let server_seen = server.stats().requests_total();
    server.shutdown().await;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    anyhow::ensure!(
        output.status.success(),
        "surge exited with {}\nstdout:\n{stdout}\nstderr:\n{stderr}",
        output.status
    );

    let line = single_json_line(&stdout)?;
    let parsed: JsonRunLine =
        serde_json::from_str(line).with_context(|| format!("failed to parse json line: {line}"))?;

    anyhow::ensure!(parsed.kind == "run", "kind={}", parsed.kind);
    anyhow::ensure!(parsed.drained, "expected the run to drain");
    anyhow::ensure!(parsed.stats.total == 30, "total={}", parsed.stats.total);
    anyhow::ensure!(
        parsed.stats.success_count + parsed.stats.error_count == parsed.stats.total,
        "success={} error={} total={}",
        parsed.stats.success_count,
        parsed.stats.error_count,
        parsed.stats.total
    );
    anyhow::ensure!(
        parsed.stats.min_ms as f64 <= parsed.stats.avg_ms
            && parsed.stats.avg_ms <= parsed.stats.max_ms as f64,
        "min={} avg={} max={}",
        parsed.stats.min_ms,
        parsed.stats.avg_ms,
        parsed.stats.max_ms
    );
    anyhow::ensure!(parsed.stats.throughput_per_sec >= 0.0);
    anyhow::ensure!(parsed.sla.passed, "violations: {:?}", parsed.sla.violations);
    anyhow::ensure!(server_seen == 30, "server saw {server_seen} requests");
    Ok(())
}

#[tokio::test]
async fn e2e_sla_violations_exit_with_the_dedicated_code() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let base_url = server.base_url().to_string();

    // /error answers 500 every time, so the success-ratio check must fail.
    let output = run_surge(vec![
        "run".into(),
        base_url,
        "--path".into(),
        "/error".into(),
        "--requests".into(),
        "10".into(),
        "--concurrency".into(),
        "5".into(),
        "--output".into(),
        "json".into(),
    ])
    .await?;

    server.shutdown().await;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    anyhow::ensure!(
        output.status.code() == Some(10),
        "expected exit code 10, got {:?}\nstdout:\n{stdout}",
        output.status.code()
    );

    let line = single_json_line(&stdout)?;
    let parsed: JsonRunLine =
        serde_json::from_str(line).with_context(|| format!("failed to parse json line: {line}"))?;

    anyhow::ensure!(!parsed.sla.passed);
    anyhow::ensure!(parsed.stats.error_count == 10, "errors={}", parsed.stats.error_count);
    anyhow::ensure!(
        parsed
            .sla
            .violations
            .iter()
            .any(|v| v.contains("success ratio")),
        "violations: {:?}",
        parsed.sla.violations
    );
    Ok(())
}

#[tokio::test]
async fn e2e_ramp_reports_every_level() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let base_url = server.base_url().to_string();

    let output = run_surge(vec![
        "ramp".into(),
        base_url,
        "--path".into(),
        "/hello".into(),
        "--levels".into(),
        "1,2,4".into(),
        "--output".into(),
        "json".into(),
    ])
    .await?;

    let server_seen = server.stats().requests_total();
    server.shutdown().await;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    anyhow::ensure!(
        output.status.success(),
        "surge exited with {}\nstdout:\n{stdout}\nstderr:\n{stderr}",
        output.status
    );

    let line = single_json_line(&stdout)?;
    let parsed: JsonRampLine =
        serde_json::from_str(line).with_context(|| format!("failed to parse json line: {line}"))?;

    anyhow::ensure!(parsed.kind == "ramp", "kind={}", parsed.kind);
    anyhow::ensure!(parsed.levels.len() == 3, "levels={}", parsed.levels.len());
    for (expected, level) in [1u64, 2, 4].iter().zip(&parsed.levels) {
        anyhow::ensure!(level.concurrency == *expected);
        anyhow::ensure!(
            level.stats.total == *expected,
            "level {}: total={}",
            level.concurrency,
            level.stats.total
        );
    }
    anyhow::ensure!(parsed.degradation_pct.is_finite());
    anyhow::ensure!(parsed.sla.passed, "violations: {:?}", parsed.sla.violations);
    anyhow::ensure!(server_seen == 7, "server saw {server_seen} requests");
    Ok(())
}
