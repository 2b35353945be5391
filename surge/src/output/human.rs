use std::fmt::Write as _;

use surge_core::runner::{DegradationReport, RunReport, SlaVerdict, Statistics};

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput;

impl OutputFormatter for HumanReadableOutput {
    fn print_run(&self, report: &RunReport, verdict: &SlaVerdict) -> anyhow::Result<()> {
        let mut out = String::new();
        out.push_str("summary\n");
        render_stats(&report.stats, "  ", &mut out);
        if !report.drained {
            out.push_str("  note: run timed out; statistics cover a partial snapshot\n");
        }
        render_verdict(verdict, &mut out);
        print!("{out}");
        Ok(())
    }

    fn print_ramp(&self, report: &DegradationReport, verdict: &SlaVerdict) -> anyhow::Result<()> {
        let mut out = String::new();
        out.push_str("ramp\n");

        for level in &report.levels {
            writeln!(&mut out, "level: {} users", level.concurrency).ok();
            render_stats(&level.stats, "  ", &mut out);
            if !level.drained {
                out.push_str("  note: level timed out; statistics cover a partial snapshot\n");
            }
        }

        if let (Some(first), Some(last)) = (report.levels.first(), report.levels.last()) {
            writeln!(
                &mut out,
                "baseline: {} users -> {:.1}ms avg",
                first.concurrency, first.stats.avg_ms
            )
            .ok();
            writeln!(
                &mut out,
                "high load: {} users -> {:.1}ms avg",
                last.concurrency, last.stats.avg_ms
            )
            .ok();
        }
        writeln!(&mut out, "degradation: {:.2}%", report.degradation_pct).ok();

        render_verdict(verdict, &mut out);
        print!("{out}");
        Ok(())
    }
}

fn render_stats(stats: &Statistics, indent: &str, out: &mut String) {
    writeln!(
        out,
        "{indent}requests: {} (ok {}, failed {})",
        stats.total, stats.success_count, stats.error_count
    )
    .ok();
    writeln!(
        out,
        "{indent}latency: min={}ms avg={:.1}ms max={}ms p50={}ms p90={}ms p99={}ms",
        stats.min_ms, stats.avg_ms, stats.max_ms, stats.p50_ms, stats.p90_ms, stats.p99_ms
    )
    .ok();
    writeln!(out, "{indent}duration: {}ms", stats.wall_clock_ms).ok();
    writeln!(out, "{indent}throughput: {:.1} req/s", stats.throughput_per_sec).ok();
}

fn render_verdict(verdict: &SlaVerdict, out: &mut String) {
    if verdict.passed {
        out.push_str("sla: passed\n");
        return;
    }

    writeln!(out, "sla: failed ({} violations)", verdict.violations.len()).ok();
    for violation in &verdict.violations {
        writeln!(out, "  violation: {violation}").ok();
    }
}
