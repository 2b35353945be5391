use serde::Serialize;
use std::io::Write as _;

use surge_core::runner::{DegradationReport, RunReport, SlaVerdict, Statistics};

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_run(&self, report: &RunReport, verdict: &SlaVerdict) -> anyhow::Result<()> {
        emit_json_line(&JsonRunLine {
            kind: "run",
            drained: report.drained,
            stats: JsonStats::from(&report.stats),
            sla: JsonVerdict::from(verdict),
        })
    }

    fn print_ramp(&self, report: &DegradationReport, verdict: &SlaVerdict) -> anyhow::Result<()> {
        emit_json_line(&JsonRampLine {
            kind: "ramp",
            levels: report
                .levels
                .iter()
                .map(|level| JsonLevel {
                    concurrency: level.concurrency,
                    drained: level.drained,
                    stats: JsonStats::from(&level.stats),
                })
                .collect(),
            degradation_pct: report.degradation_pct,
            sla: JsonVerdict::from(verdict),
        })
    }
}

#[derive(Debug, Serialize)]
struct JsonStats {
    total: u64,
    success_count: u64,
    error_count: u64,
    min_ms: u64,
    max_ms: u64,
    avg_ms: f64,
    p50_ms: u64,
    p90_ms: u64,
    p99_ms: u64,
    wall_clock_ms: u64,
    throughput_per_sec: f64,
}

impl From<&Statistics> for JsonStats {
    fn from(stats: &Statistics) -> Self {
        Self {
            total: stats.total,
            success_count: stats.success_count,
            error_count: stats.error_count,
            min_ms: stats.min_ms,
            max_ms: stats.max_ms,
            avg_ms: stats.avg_ms,
            p50_ms: stats.p50_ms,
            p90_ms: stats.p90_ms,
            p99_ms: stats.p99_ms,
            wall_clock_ms: stats.wall_clock_ms,
            throughput_per_sec: stats.throughput_per_sec,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonVerdict {
    passed: bool,
    violations: Vec<String>,
}

impl From<&SlaVerdict> for JsonVerdict {
    fn from(verdict: &SlaVerdict) -> Self {
        Self {
            passed: verdict.passed,
            violations: verdict.violations.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRunLine {
    kind: &'static str,
    drained: bool,
    stats: JsonStats,
    sla: JsonVerdict,
}

#[derive(Debug, Serialize)]
struct JsonLevel {
    concurrency: u64,
    drained: bool,
    stats: JsonStats,
}

#[derive(Debug, Serialize)]
struct JsonRampLine {
    kind: &'static str,
    levels: Vec<JsonLevel>,
    degradation_pct: f64,
    sla: JsonVerdict,
}

fn emit_json_line<T: Serialize>(line: &T) -> anyhow::Result<()> {
    let mut buf = serde_json::to_vec(line)?;
    buf.push(b'\n');

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;
    Ok(())
}
